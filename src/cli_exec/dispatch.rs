use super::analyses::handle_analysis_command;
use super::cases::handle_case_command;
use super::collections::handle_collection_command;
use super::collectors::handle_collector_command;
use super::dashboard::{
    handle_cases_command, handle_disk_usage_command, handle_info_command, handle_init_command,
    handle_profiles_command,
};
use super::terminal::TerminalDialogs;
use super::workspace::with_session;
use super::*;

pub(super) async fn handle_command(command: Commands, assume_yes: bool) -> Result<()> {
    let dialogs = TerminalDialogs::new(assume_yes);
    match command {
        Commands::Init {
            url,
            token,
            api_prefix,
            disk_usage_ttl,
            force,
            path,
        } => handle_init_command(url, token, api_prefix, disk_usage_ttl, force, path)?,
        Commands::Info { json } => with_session(|s| handle_info_command(s, json)).await?,
        Commands::Cases { search, json } => {
            with_session(|s| handle_cases_command(s, search, json)).await?
        }
        Commands::DiskUsage { json } => {
            with_session(|s| handle_disk_usage_command(s, json)).await?
        }
        Commands::Profiles { opsystem, json } => {
            with_session(|s| handle_profiles_command(s, opsystem, json)).await?
        }
        Commands::Case { command } => {
            with_session(|s| async move { handle_case_command(&s, &dialogs, command).await })
                .await?
        }
        Commands::Collector { command } => {
            with_session(|s| async move { handle_collector_command(&s, &dialogs, command).await })
                .await?
        }
        Commands::Collection { command } => {
            with_session(|s| async move { handle_collection_command(&s, &dialogs, command).await })
                .await?
        }
        Commands::Analysis { command } => {
            with_session(|s| async move { handle_analysis_command(&s, command).await }).await?
        }
    }
    Ok(())
}
