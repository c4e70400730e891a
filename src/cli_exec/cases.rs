use helium::mirror::CaseAction;
use helium::model::{CaseUpdate, NewCase};
use helium::session::DeleteOutcome;

use super::terminal::TerminalDialogs;
use super::workspace::open_case;
use super::*;

pub(super) async fn handle_case_command(
    session: &Client,
    dialogs: &TerminalDialogs,
    command: CaseCommands,
) -> Result<()> {
    match command {
        CaseCommands::Show { case, json } => {
            open_case(session, &case).await?;
            show_case(session, json)?;
        }
        CaseCommands::Create {
            name,
            description,
            tsid,
            acs,
        } => {
            let created = session
                .create_case(&NewCase {
                    name,
                    description,
                    tsid,
                    acs,
                })
                .await?;
            println!("{}", created.guid);
        }
        CaseCommands::Edit {
            case,
            name,
            description,
            tsid,
        } => {
            open_case(session, &case).await?;
            let menu = session.case_menu(&case)?;
            if menu
                .iter()
                .any(|i| i.action == CaseAction::Edit && !i.enabled)
            {
                anyhow::bail!("case {} is closed; reopen it before editing", case);
            }
            let update = CaseUpdate {
                name,
                description,
                tsid,
                ..CaseUpdate::default()
            };
            let updated = session.update_case(&case, &update).await?;
            println!("Updated {}", updated.guid);
        }
        CaseCommands::Close { case } => {
            let updated = session.close_case(&case).await?;
            println!("Closed {}", updated.guid);
        }
        CaseCommands::Reopen { case } => {
            let updated = session.reopen_case(&case).await?;
            println!("Reopened {}", updated.guid);
        }
        CaseCommands::Delete { case } => {
            open_case(session, &case).await?;
            let target = session.case_target(&case)?;
            match session.delete(dialogs, target).await? {
                DeleteOutcome::Deleted => println!("Deleted case {}", case),
                DeleteOutcome::Cancelled => println!("Not deleted"),
            }
        }
    }
    Ok(())
}

fn show_case(session: &Client, json: bool) -> Result<()> {
    let mirror = session.mirror();
    let view = mirror.view().context("case view closed")?;
    if json {
        return print_json(
            &serde_json::json!({
                "case": view.case(),
                "collectors": view.collectors(),
                "collections": view.collections(),
                "usage": view.usage(),
            }),
            "case",
        );
    }

    let case = view.case();
    println!("guid: {}", case.guid);
    println!("name: {}", case.name);
    if let Some(description) = case.description.as_deref().filter(|d| !d.is_empty()) {
        println!("description: {}", description);
    }
    if let Some(tsid) = case.tsid.as_deref().filter(|t| !t.is_empty()) {
        println!("tsid: {}", tsid);
    }
    println!("status: {}", if case.is_closed() { "closed" } else { "open" });
    if let Some(usage) = view.usage() {
        println!(
            "usage: {}",
            super::dashboard::human_bytes(usage.total())
        );
    }

    println!("collectors: {}", view.collectors().len());
    for c in view.collectors() {
        println!(
            "  {} {}/{} {}",
            c.guid,
            c.opsystem,
            c.arch,
            c.fingerprint.as_deref().unwrap_or("-")
        );
    }
    println!("collections: {}", view.collections().len());
    for c in view.collections() {
        let orphan = if view.is_orphaned(c) { " [orphaned]" } else { "" };
        println!(
            "  {} {} {}{}",
            c.guid,
            c.hostname.as_deref().unwrap_or("-"),
            c.tags.join(","),
            orphan
        );
    }
    Ok(())
}
