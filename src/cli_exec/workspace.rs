use std::future::Future;

use super::*;

pub(super) fn discover_store() -> Result<LocalStore> {
    LocalStore::discover(&std::env::current_dir().context("get current dir")?)
}

pub(super) fn open_session(store: &LocalStore) -> Result<Client> {
    let cfg = store.read_config()?;
    let ttl = cfg.disk_usage_ttl();
    let client = RemoteClient::new(cfg)?;
    let session = Session::new(client, ttl);
    session.restore_seen(store.read_state()?.seen_cases);
    Ok(session)
}

/// Runs `f` against a session for the current workspace, then reports any
/// notices it raised, whether or not `f` succeeded. On success the seen-case
/// set is written back when the command changed it (listing or creating cases).
pub(super) async fn with_session<F, Fut>(f: F) -> Result<()>
where
    F: FnOnce(Client) -> Fut,
    Fut: Future<Output = Result<()>>,
{
    let store = discover_store()?;
    let session = open_session(&store)?;
    let seen_before = session.seen_cases();
    let result = f(session.clone()).await;
    print_notices(&session);
    result?;

    let seen = session.seen_cases();
    if seen != seen_before {
        store
            .set_seen_cases(seen)
            .context("store seen cases in state.json")?;
    }
    Ok(())
}

/// Opens `case` and warns about sections that failed to load.
pub(super) async fn open_case(session: &Client, case: &str) -> Result<()> {
    let report = session.open_case(case).await?;
    for (section, err) in &report.failed {
        eprintln!("warning: could not load {}: {}", section, err);
    }
    Ok(())
}
