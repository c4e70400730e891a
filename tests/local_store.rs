use std::collections::BTreeSet;
use std::time::Duration;

use anyhow::Result;
use helium::model::ClientConfig;
use helium::store::LocalStore;

#[test]
fn init_writes_config_and_empty_state() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let mut cfg = ClientConfig::new("https://helium.example/");
    cfg.token = Some("t0ken".to_string());
    cfg.disk_usage_ttl_secs = Some(60);

    let store = LocalStore::init(dir.path(), &cfg, false)?;
    assert!(LocalStore::helium_dir(dir.path()).is_dir());

    let read = store.read_config()?;
    assert_eq!(read.base_url, "https://helium.example/");
    assert_eq!(read.api_root(), "https://helium.example/api");
    assert_eq!(read.token.as_deref(), Some("t0ken"));
    assert_eq!(read.disk_usage_ttl(), Duration::from_secs(60));
    assert!(store.read_state()?.seen_cases.is_empty());
    Ok(())
}

#[test]
fn init_refuses_to_clobber_without_force() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let cfg = ClientConfig::new("http://a");
    LocalStore::init(dir.path(), &cfg, false)?;

    let err = match LocalStore::init(dir.path(), &ClientConfig::new("http://b"), false) {
        Ok(_) => panic!("second init should fail"),
        Err(err) => err,
    };
    assert!(err.to_string().contains("already exists"));

    let store = LocalStore::init(dir.path(), &ClientConfig::new("http://b"), true)?;
    assert_eq!(store.read_config()?.base_url, "http://b");
    Ok(())
}

#[test]
fn discover_walks_up_from_nested_directories() -> Result<()> {
    let dir = tempfile::tempdir()?;
    LocalStore::init(dir.path(), &ClientConfig::new("http://a"), false)?;
    let nested = dir.path().join("evidence").join("host01");
    std::fs::create_dir_all(&nested)?;

    let store = LocalStore::discover(&nested)?;
    assert_eq!(store.read_config()?.base_url, "http://a");

    let empty = tempfile::tempdir()?;
    assert!(LocalStore::open(empty.path()).is_err());
    Ok(())
}

#[test]
fn seen_cases_survive_reopen() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let store = LocalStore::init(dir.path(), &ClientConfig::new("http://a"), false)?;
    let seen: BTreeSet<String> = ["c1", "c2"].iter().map(|s| s.to_string()).collect();
    store.set_seen_cases(seen.clone())?;

    let reopened = LocalStore::open(dir.path())?;
    assert_eq!(reopened.read_state()?.seen_cases, seen);
    Ok(())
}

#[test]
fn unsupported_config_version_is_rejected() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let mut cfg = ClientConfig::new("http://a");
    cfg.version = 2;
    let store = LocalStore::init(dir.path(), &cfg, false)?;
    let err = store.read_config().unwrap_err();
    assert!(err.to_string().contains("unsupported config version"));
    Ok(())
}

#[test]
fn default_ttl_and_prefix_handling() {
    let mut cfg = ClientConfig::new("http://a");
    assert_eq!(cfg.disk_usage_ttl(), Duration::from_secs(300));
    cfg.api_prefix = "v2/".to_string();
    assert_eq!(cfg.api_root(), "http://a/v2");
    cfg.api_prefix = String::new();
    assert_eq!(cfg.api_root(), "http://a");
}
