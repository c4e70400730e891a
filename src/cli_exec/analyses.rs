use serde_json::json;

use super::workspace::open_case;
use super::*;

pub(super) async fn handle_analysis_command(
    session: &Client,
    command: AnalysisCommands,
) -> Result<()> {
    match command {
        AnalysisCommands::List {
            case,
            collection,
            json,
        } => {
            open_case(session, &case).await?;
            session.open_collection(&collection).await?;
            let rows = session.analyzer_rows(&collection)?;
            if json {
                let rows: Vec<_> = rows
                    .iter()
                    .map(|r| {
                        let actions: Vec<&str> = r
                            .menu
                            .iter()
                            .filter(|i| i.enabled)
                            .map(|i| i.action.label())
                            .collect();
                        json!({
                            "analyzer": r.analyzer.name,
                            "version": r.analyzer.version,
                            "state": r.state.as_str(),
                            "actions": actions,
                        })
                    })
                    .collect();
                return print_json(&rows, "analyses");
            }
            for r in rows {
                let actions: Vec<&str> = r
                    .menu
                    .iter()
                    .map(|i| {
                        if i.enabled {
                            i.action.label()
                        } else {
                            "(start unavailable: orphaned)"
                        }
                    })
                    .collect();
                println!(
                    "{} {} {} [{}]",
                    r.analyzer.name,
                    r.analyzer.version,
                    r.state.as_str(),
                    actions.join(", ")
                );
            }
        }
        AnalysisCommands::Start {
            case,
            collection,
            analyzer,
        } => {
            open_case(session, &case).await?;
            session.open_collection(&collection).await?;
            let record = session.start_analysis(&collection, &analyzer).await?;
            println!("{} {}", record.analyzer, record.status.as_str());
        }
        AnalysisCommands::Restart {
            case,
            collection,
            analyzer,
        } => {
            open_case(session, &case).await?;
            session.open_collection(&collection).await?;
            let record = session.restart_analysis(&collection, &analyzer).await?;
            println!("{} {}", record.analyzer, record.status.as_str());
        }
        AnalysisCommands::Log {
            case,
            collection,
            analyzer,
        } => {
            open_case(session, &case).await?;
            session.open_collection(&collection).await?;
            print!("{}", session.analysis_log(&collection, &analyzer).await?);
        }
        AnalysisCommands::Download {
            case,
            collection,
            analyzer,
        } => {
            open_case(session, &case).await?;
            session.open_collection(&collection).await?;
            println!("{}", session.analysis_download(&collection, &analyzer).await?);
        }
    }
    Ok(())
}
