use std::future::Future;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::Value;

use crate::error::GatewayError;
use crate::model::{ClientConfig, PendingDownloadKey};

mod api;
mod http_client;

pub use self::api::Api;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Verb {
    Get,
    Post,
    Put,
    Delete,
}

impl Verb {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verb::Get => "GET",
            Verb::Post => "POST",
            Verb::Put => "PUT",
            Verb::Delete => "DELETE",
        }
    }
}

/// A local file about to be sent as a multipart upload.
#[derive(Clone, Debug)]
pub struct UploadFile {
    pub path: PathBuf,
    pub name: String,
    pub size: u64,
}

impl UploadFile {
    pub fn open(path: &Path) -> Result<Self> {
        let meta = std::fs::metadata(path)
            .with_context(|| format!("stat {}", path.display()))?;
        if !meta.is_file() {
            anyhow::bail!("{} is not a regular file", path.display());
        }
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        Ok(Self {
            path: path.to_path_buf(),
            name,
            size: meta.len(),
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransferProgress {
    pub sent: u64,
    pub total: u64,
}

/// Transport seam between the synchronization layer and the REST surface.
///
/// Paths are relative to the API root (e.g. `/case/{guid}`). Each call
/// resolves exactly once.
pub trait Gateway {
    /// Issues a JSON request and returns the raw response body
    /// (`Value::Null` for an empty body).
    fn send(
        &self,
        verb: Verb,
        path: &str,
        body: Option<Value>,
    ) -> impl Future<Output = Result<Value, GatewayError>>;

    fn fetch_text(&self, path: &str) -> impl Future<Output = Result<String, GatewayError>>;

    /// Multipart upload of `file` under the `file` field. `progress` is
    /// called on the caller's task as bytes leave the client.
    fn upload(
        &self,
        path: &str,
        file: &UploadFile,
        progress: &mut dyn FnMut(TransferProgress),
    ) -> impl Future<Output = Result<Value, GatewayError>>;

    fn download_url(&self, key: &PendingDownloadKey) -> String;
}

pub struct RemoteClient {
    config: ClientConfig,
    client: reqwest::Client,
}

impl RemoteClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent("helium");
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("build reqwest client")?;
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}
