use anyhow::{Context, Result};

use helium::notice::NoticeLevel;
use helium::remote::RemoteClient;
use helium::session::Session;
use helium::store::LocalStore;

use crate::{AnalysisCommands, CaseCommands, CollectionCommands, CollectorCommands, Commands};

mod analyses;
mod cases;
mod collections;
mod collectors;
mod dashboard;
mod dispatch;
mod terminal;
mod workspace;

pub(super) async fn handle_command(command: Commands, assume_yes: bool) -> Result<()> {
    dispatch::handle_command(command, assume_yes).await
}

pub(super) type Client = Session<RemoteClient>;

fn print_notices(session: &Client) {
    for notice in session.drain_notices() {
        let level = match notice.level {
            NoticeLevel::Success => "ok",
            NoticeLevel::Error => "error",
        };
        eprintln!("[{}] {}: {}", level, notice.title, notice.message);
    }
}

fn print_json<T: serde::Serialize>(value: &T, what: &str) -> Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(value).with_context(|| format!("serialize {} json", what))?
    );
    Ok(())
}
