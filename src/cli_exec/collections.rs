use std::io::Write;

use helium::remote::UploadFile;
use helium::session::DeleteOutcome;
use helium::upload::UploadOutcome;

use super::terminal::TerminalDialogs;
use super::workspace::open_case;
use super::*;

pub(super) async fn handle_collection_command(
    session: &Client,
    dialogs: &TerminalDialogs,
    command: CollectionCommands,
) -> Result<()> {
    match command {
        CollectionCommands::Upload { case, file } => {
            let file = UploadFile::open(&file)?;
            open_case(session, &case).await?;
            match upload_with_progress(session, dialogs, file).await? {
                UploadOutcome::Declined => println!("Upload cancelled"),
                UploadOutcome::Committed { collection, edited } => {
                    let note = if edited { " (edited)" } else { "" };
                    println!("{}{}", collection.guid, note);
                }
            }
        }
        CollectionCommands::Edit { case, collection } => {
            open_case(session, &case).await?;
            match session.edit_collection_with(dialogs, &collection).await? {
                Some(updated) => println!("Updated {}", updated.guid),
                None => println!("Unchanged"),
            }
        }
        CollectionCommands::Delete { case, collection } => {
            open_case(session, &case).await?;
            let target = session.collection_target(&collection)?;
            match session.delete(dialogs, target).await? {
                DeleteOutcome::Deleted => println!("Deleted collection {}", collection),
                DeleteOutcome::Cancelled => println!("Not deleted"),
            }
        }
        CollectionCommands::EvictCache { case, collection } => {
            open_case(session, &case).await?;
            if !session.evict_cache(dialogs, &collection).await? {
                println!("Cache kept");
            }
        }
        CollectionCommands::Download { case, collection } => {
            open_case(session, &case).await?;
            println!("{}", session.collection_download(&collection).await?);
        }
    }
    Ok(())
}

/// Drives the upload while redrawing its progress label on stderr.
async fn upload_with_progress(
    session: &Client,
    dialogs: &TerminalDialogs,
    file: UploadFile,
) -> Result<UploadOutcome> {
    let mut status = session.uploads().subscribe();
    let upload = session.upload_collection(dialogs, file);
    tokio::pin!(upload);

    let mut drawn = false;
    let outcome = loop {
        tokio::select! {
            outcome = &mut upload => break outcome,
            Ok(()) = status.changed() => {
                let label = status.borrow_and_update().label();
                if !label.is_empty() {
                    eprint!("\r{}", label);
                    let _ = std::io::stderr().flush();
                    drawn = true;
                }
            }
        }
    };
    if drawn {
        eprintln!();
    }
    Ok(outcome?)
}
