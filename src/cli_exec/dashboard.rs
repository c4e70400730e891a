use std::path::PathBuf;

use serde_json::json;

use helium::model::ClientConfig;

use super::*;

pub(super) fn handle_init_command(
    url: String,
    token: Option<String>,
    api_prefix: String,
    disk_usage_ttl: Option<u64>,
    force: bool,
    path: Option<PathBuf>,
) -> Result<()> {
    let root = path.unwrap_or(std::env::current_dir().context("get current dir")?);
    let mut cfg = ClientConfig::new(url);
    cfg.token = token;
    cfg.api_prefix = api_prefix;
    cfg.disk_usage_ttl_secs = disk_usage_ttl;
    LocalStore::init(&root, &cfg, force)?;
    println!("Initialized Helium workspace at {}", root.display());
    Ok(())
}

pub(super) async fn handle_info_command(session: Client, json: bool) -> Result<()> {
    let info = session.info().await?;
    // Best effort: the banner lives in the constants payload.
    if let Err(err) = session.reload_constants().await {
        tracing::debug!(error = %err, "constants unavailable");
    }
    if json {
        return print_json(
            &json!({ "api": info.api, "version": info.version, "banner": session.banner() }),
            "info",
        );
    }
    println!("api: {}", info.api);
    println!("version: {}", info.version);
    if let Some(banner) = session.banner() {
        println!("banner: {}", banner);
    }
    Ok(())
}

pub(super) async fn handle_cases_command(
    session: Client,
    search: Option<String>,
    json: bool,
) -> Result<()> {
    list_cases(&session, search.as_deref(), json).await
}

async fn list_cases(session: &Client, search: Option<&str>, json: bool) -> Result<()> {
    session.load_cases().await?;
    if let Err(err) = session.refresh_usage().await {
        eprintln!("warning: disk usage unavailable: {}", err);
    }
    let summaries = session.case_summaries(search);

    if json {
        let rows: Vec<_> = summaries
            .iter()
            .map(|s| {
                json!({
                    "case": s.case,
                    "total": s.total,
                    "quota": {
                        "collectors": s.quota.collectors,
                        "collections": s.quota.collections,
                        "analyses": s.quota.analyses,
                    },
                    "unseen_new": s.unseen_new,
                })
            })
            .collect();
        return print_json(&rows, "cases");
    }

    if summaries.is_empty() {
        println!("No cases");
        return Ok(());
    }
    for s in summaries {
        let mut flags = Vec::new();
        if s.unseen_new {
            flags.push("new");
        }
        if s.case.is_closed() {
            flags.push("closed");
        }
        let flags = if flags.is_empty() {
            String::new()
        } else {
            format!(" [{}]", flags.join(","))
        };
        println!(
            "{} {}{} {}",
            s.case.guid,
            s.case.name,
            flags,
            human_bytes(s.total)
        );
    }
    Ok(())
}

pub(super) async fn handle_disk_usage_command(session: Client, json: bool) -> Result<()> {
    session.load_cases().await?;
    let report = session.disk_usage_report().await?;
    if json {
        let rows: Vec<_> = report
            .rows
            .iter()
            .map(|r| json!({ "guid": r.guid, "name": r.name, "usage": r.usage }))
            .collect();
        return print_json(
            &json!({
                "cases": rows,
                "total": report.total,
                "quota": report.quota,
                "updated": report.updated,
            }),
            "disk usage",
        );
    }
    for row in &report.rows {
        println!(
            "{} {} collectors={} collections={} analyses={}",
            row.guid,
            row.name,
            human_bytes(row.usage.collectors),
            human_bytes(row.usage.collections),
            human_bytes(row.usage.analyses)
        );
    }
    if report.quota > 0 {
        println!(
            "total: {} of {}",
            human_bytes(report.total),
            human_bytes(report.quota)
        );
    } else {
        println!("total: {}", human_bytes(report.total));
    }
    Ok(())
}

pub(super) async fn handle_profiles_command(
    session: Client,
    opsystem: String,
    json: bool,
) -> Result<()> {
    let profiles = session.profiles(&opsystem).await?;
    if json {
        return print_json(&profiles, "profiles");
    }
    for p in profiles {
        println!("{} ({} targets)", p.name, p.targets.len());
    }
    Ok(())
}

pub(super) fn human_bytes(n: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KiB", "MiB", "GiB", "TiB"];
    let mut value = n as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} {}", n, UNITS[0])
    } else {
        format!("{:.1} {}", value, UNITS[unit])
    }
}
