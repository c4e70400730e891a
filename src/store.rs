use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};

use crate::model::{ClientConfig, LocalState};

const STORE_DIR: &str = ".helium";

#[derive(Clone)]
pub struct LocalStore {
    root: PathBuf,
}

impl LocalStore {
    pub fn helium_dir(root: &Path) -> PathBuf {
        root.join(STORE_DIR)
    }

    /// Finds the nearest `.helium` directory at or above `start`.
    pub fn discover(start: &Path) -> Result<Self> {
        for dir in start.ancestors() {
            if Self::helium_dir(dir).is_dir() {
                return Self::open(dir);
            }
        }
        Err(anyhow!(
            "No {} directory found at or above {} (run `helium init --url ...`)",
            STORE_DIR,
            start.display()
        ))
    }

    pub fn open(workspace_root: &Path) -> Result<Self> {
        let root = Self::helium_dir(workspace_root);
        if !root.is_dir() {
            return Err(anyhow!(
                "No {} directory found at {} (run `helium init --url ...`)",
                STORE_DIR,
                root.display()
            ));
        }
        Ok(Self { root })
    }

    pub fn init(workspace_root: &Path, config: &ClientConfig, force: bool) -> Result<Self> {
        let root = Self::helium_dir(workspace_root);
        if root.exists() && !force {
            return Err(anyhow!(
                "{} already exists at {} (use --force to re-init)",
                STORE_DIR,
                root.display()
            ));
        }
        fs::create_dir_all(&root).context("create store dir")?;

        let store = Self { root };
        store.write_config(config)?;
        store.write_state(&LocalState {
            version: 1,
            seen_cases: BTreeSet::new(),
        })?;
        Ok(store)
    }

    pub fn read_config(&self) -> Result<ClientConfig> {
        let bytes = fs::read(self.root.join("config.json")).context("read config.json")?;
        let cfg: ClientConfig = serde_json::from_slice(&bytes).context("parse config.json")?;
        if cfg.version != 1 {
            anyhow::bail!("unsupported config version {}", cfg.version);
        }
        Ok(cfg)
    }

    pub fn write_config(&self, cfg: &ClientConfig) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(cfg).context("serialize config")?;
        write_atomic(&self.root.join("config.json"), &bytes).context("write config.json")?;
        Ok(())
    }

    pub fn read_state(&self) -> Result<LocalState> {
        let path = self.root.join("state.json");
        if !path.exists() {
            return Ok(LocalState {
                version: 1,
                seen_cases: BTreeSet::new(),
            });
        }
        let bytes = fs::read(&path).context("read state.json")?;
        let st: LocalState = serde_json::from_slice(&bytes).context("parse state.json")?;
        Ok(st)
    }

    pub fn write_state(&self, st: &LocalState) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(st).context("serialize state")?;
        write_atomic(&self.root.join("state.json"), &bytes).context("write state.json")?;
        Ok(())
    }

    pub fn set_seen_cases(&self, seen: BTreeSet<String>) -> Result<()> {
        let mut st = self.read_state()?;
        st.seen_cases = seen;
        self.write_state(&st)
    }
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("create parent directories")?;
    }
    let tmp = path.with_extension(format!("tmp.{}", std::process::id()));
    fs::write(&tmp, bytes).with_context(|| format!("write temp file {}", tmp.display()))?;
    fs::rename(&tmp, path)
        .with_context(|| format!("rename {} -> {}", tmp.display(), path.display()))?;
    Ok(())
}
