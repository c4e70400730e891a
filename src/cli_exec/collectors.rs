use helium::model::{CollectorImport, NewCollector};
use helium::session::DeleteOutcome;

use super::terminal::TerminalDialogs;
use super::workspace::open_case;
use super::*;

pub(super) async fn handle_collector_command(
    session: &Client,
    dialogs: &TerminalDialogs,
    command: CollectorCommands,
) -> Result<()> {
    match command {
        CollectorCommands::Add {
            case,
            arch,
            opsystem,
            profile,
            device,
            memdump,
            description,
        } => {
            open_case(session, &case).await?;
            let created = session
                .add_collector(&NewCollector {
                    arch,
                    opsystem,
                    profile,
                    device,
                    memdump,
                    description,
                    ..NewCollector::default()
                })
                .await?;
            println!("{}", created.guid);
        }
        CollectorCommands::Import {
            case,
            arch,
            opsystem,
            fingerprint,
            secret_file,
            key_file,
            description,
        } => {
            let secret = tokio::fs::read_to_string(&secret_file)
                .await
                .with_context(|| format!("read {}", secret_file.display()))?;
            let key_pem = tokio::fs::read_to_string(&key_file)
                .await
                .with_context(|| format!("read {}", key_file.display()))?;
            open_case(session, &case).await?;
            let imported = session
                .import_collector(&CollectorImport {
                    arch,
                    opsystem,
                    secret: secret.trim().to_string(),
                    key_pem,
                    fingerprint,
                    description,
                })
                .await?;
            println!("{}", imported.guid);
        }
        CollectorCommands::Secrets {
            case,
            collector,
            json,
        } => {
            open_case(session, &case).await?;
            let secrets = session.collector_secrets(&collector).await?;
            if json {
                return print_json(&secrets, "collector secrets");
            }
            println!("secret: {}", secrets.secret);
            println!("{}", secrets.crt_pem.trim_end());
            println!("{}", secrets.key_pem.trim_end());
        }
        CollectorCommands::Download { case, collector } => {
            open_case(session, &case).await?;
            println!("{}", session.collector_download(&collector).await?);
        }
        CollectorCommands::Delete { case, collector } => {
            open_case(session, &case).await?;
            let target = session.collector_target(&collector)?;
            match session.delete(dialogs, target).await? {
                DeleteOutcome::Deleted => println!("Deleted collector {}", collector),
                DeleteOutcome::Cancelled => println!("Not deleted"),
            }
        }
    }
    Ok(())
}
