//! Process-wide cache of rarely changing, globally shared values.

use std::cell::RefCell;
use std::time::Duration;

use futures::FutureExt;

use crate::error::GatewayError;
use crate::model::{ApiDiskUsage, Constant, Info};
use crate::remote::{Api, Gateway};

mod cell;

pub use self::cell::{CacheCell, Expiry, Fetch};

pub struct CacheStore {
    info: CacheCell<Info>,
    constants: CacheCell<Constant>,
    disk_usage: CacheCell<ApiDiskUsage>,
    banner: RefCell<Option<String>>,
}

impl CacheStore {
    pub fn new(disk_usage_ttl: Duration) -> Self {
        Self {
            info: CacheCell::new("info", Expiry::Never),
            constants: CacheCell::new("constant", Expiry::Never),
            disk_usage: CacheCell::new("disk_usage", Expiry::After(disk_usage_ttl)),
            banner: RefCell::new(None),
        }
    }

    pub async fn info<G: Gateway + 'static>(&self, api: &Api<G>) -> Result<Info, GatewayError> {
        let api = api.clone();
        self.info
            .get(move || async move { api.info().await }.boxed_local())
            .await
    }

    pub async fn constants<G: Gateway + 'static>(
        &self,
        api: &Api<G>,
    ) -> Result<Constant, GatewayError> {
        let api = api.clone();
        let constant = self
            .constants
            .get(move || async move { api.constant().await }.boxed_local())
            .await?;
        self.sync_banner(&constant);
        Ok(constant)
    }

    /// Stores a constants payload returned by a write, in place of refetching.
    pub fn replace_constants(&self, constant: Constant) -> bool {
        self.sync_banner(&constant);
        self.constants.put(constant)
    }

    pub async fn disk_usage<G: Gateway + 'static>(
        &self,
        api: &Api<G>,
    ) -> Result<ApiDiskUsage, GatewayError> {
        let api = api.clone();
        self.disk_usage
            .get(move || async move { api.disk_usage().await }.boxed_local())
            .await
    }

    pub fn disk_usage_cell(&self) -> &CacheCell<ApiDiskUsage> {
        &self.disk_usage
    }

    pub fn banner(&self) -> Option<String> {
        self.banner.borrow().clone()
    }

    fn sync_banner(&self, constant: &Constant) -> bool {
        let Some(banner) = constant.banner.as_deref().filter(|b| !b.is_empty()) else {
            return false;
        };
        let mut current = self.banner.borrow_mut();
        if current.as_deref() == Some(banner) {
            return false;
        }
        *current = Some(banner.to_string());
        true
    }
}

#[cfg(test)]
#[path = "tests/cache_tests.rs"]
mod tests;
