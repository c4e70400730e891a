//! Typed endpoints over a [`Gateway`]: path construction and envelope decoding.

use std::rc::Rc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::*;
use crate::model::{
    AnalyzerInfo, ApiDiskUsage, CaseMetadata, CaseUpdate, Collection, CollectionAnalysis,
    Collector, CollectorImport, CollectorSecret, Constant, Envelope, Info, NewCase, NewCollector,
    Profile,
};

pub struct Api<G> {
    gateway: Rc<G>,
}

impl<G> Clone for Api<G> {
    fn clone(&self) -> Self {
        Self {
            gateway: Rc::clone(&self.gateway),
        }
    }
}

fn decode<T: DeserializeOwned>(path: &str, raw: Value) -> Result<T, GatewayError> {
    let env: Envelope<T> = serde_json::from_value(raw).map_err(|e| GatewayError::Decode {
        path: path.to_string(),
        message: e.to_string(),
    })?;
    Ok(env.data)
}

fn encode<T: Serialize>(path: &str, value: &T) -> Result<Value, GatewayError> {
    serde_json::to_value(value).map_err(|e| GatewayError::Decode {
        path: path.to_string(),
        message: e.to_string(),
    })
}

fn case_path(case: &str) -> String {
    format!("/case/{}", case)
}

fn collector_path(case: &str, collector: &str) -> String {
    format!("/case/{}/collector/{}", case, collector)
}

fn collection_path(case: &str, collection: &str) -> String {
    format!("/case/{}/collection/{}", case, collection)
}

fn analysis_path(case: &str, collection: &str, analyzer: &str) -> String {
    format!("/case/{}/collection/{}/analysis/{}", case, collection, analyzer)
}

impl<G: Gateway> Api<G> {
    pub fn new(gateway: Rc<G>) -> Self {
        Self { gateway }
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    async fn data<T: DeserializeOwned>(
        &self,
        verb: Verb,
        path: &str,
        body: Option<Value>,
    ) -> Result<T, GatewayError> {
        let raw = self.gateway.send(verb, path, body).await?;
        decode(path, raw)
    }

    async fn discard(&self, verb: Verb, path: &str) -> Result<(), GatewayError> {
        self.gateway.send(verb, path, None).await.map(|_| ())
    }

    async fn download_link(&self, path: &str) -> Result<String, GatewayError> {
        let key: PendingDownloadKey = self.data(Verb::Get, path, None).await?;
        Ok(self.gateway.download_url(&key))
    }

    pub async fn info(&self) -> Result<Info, GatewayError> {
        self.data(Verb::Get, "/info", None).await
    }

    pub async fn constant(&self) -> Result<Constant, GatewayError> {
        self.data(Verb::Get, "/constant", None).await
    }

    pub async fn disk_usage(&self) -> Result<ApiDiskUsage, GatewayError> {
        self.data(Verb::Get, "/disk_usage", None).await
    }

    pub async fn analyzers(&self) -> Result<Vec<AnalyzerInfo>, GatewayError> {
        self.data(Verb::Get, "/config/analyzers", None).await
    }

    pub async fn profiles(&self, opsystem: &str) -> Result<Vec<Profile>, GatewayError> {
        self.data(Verb::Get, &format!("/config/{}/profiles", opsystem), None)
            .await
    }

    pub async fn cases(&self) -> Result<Vec<CaseMetadata>, GatewayError> {
        self.data(Verb::Get, "/cases", None).await
    }

    pub async fn case(&self, case: &str) -> Result<CaseMetadata, GatewayError> {
        self.data(Verb::Get, &case_path(case), None).await
    }

    pub async fn create_case(&self, new_case: &NewCase) -> Result<CaseMetadata, GatewayError> {
        let body = encode("/case", new_case)?;
        self.data(Verb::Post, "/case", Some(body)).await
    }

    pub async fn update_case(
        &self,
        case: &str,
        update: &CaseUpdate,
    ) -> Result<CaseMetadata, GatewayError> {
        let path = case_path(case);
        let body = encode(&path, update)?;
        self.data(Verb::Put, &path, Some(body)).await
    }

    pub async fn delete_case(&self, case: &str) -> Result<(), GatewayError> {
        self.discard(Verb::Delete, &case_path(case)).await
    }

    pub async fn collectors(&self, case: &str) -> Result<Vec<Collector>, GatewayError> {
        self.data(Verb::Get, &format!("/case/{}/collectors", case), None)
            .await
    }

    pub async fn create_collector(
        &self,
        case: &str,
        collector: &NewCollector,
    ) -> Result<Collector, GatewayError> {
        let path = format!("/case/{}/collector", case);
        let body = encode(&path, collector)?;
        self.data(Verb::Post, &path, Some(body)).await
    }

    pub async fn import_collector(
        &self,
        case: &str,
        import: &CollectorImport,
    ) -> Result<Collector, GatewayError> {
        let path = format!("/case/{}/collector/import", case);
        let body = encode(&path, import)?;
        self.data(Verb::Post, &path, Some(body)).await
    }

    pub async fn delete_collector(&self, case: &str, collector: &str) -> Result<(), GatewayError> {
        self.discard(Verb::Delete, &collector_path(case, collector))
            .await
    }

    pub async fn collector_secrets(
        &self,
        case: &str,
        collector: &str,
    ) -> Result<CollectorSecret, GatewayError> {
        let path = format!("{}/secrets", collector_path(case, collector));
        self.data(Verb::Get, &path, None).await
    }

    pub async fn collector_download(&self, case: &str, collector: &str) -> Result<String, GatewayError> {
        self.download_link(&format!("{}/download", collector_path(case, collector)))
            .await
    }

    pub async fn collections(&self, case: &str) -> Result<Vec<Collection>, GatewayError> {
        self.data(Verb::Get, &format!("/case/{}/collections", case), None)
            .await
    }

    pub async fn upload_collection(
        &self,
        case: &str,
        file: &UploadFile,
        progress: &mut dyn FnMut(TransferProgress),
    ) -> Result<Collection, GatewayError> {
        let path = format!("/case/{}/collection", case);
        let raw = self.gateway.upload(&path, file, progress).await?;
        decode(&path, raw)
    }

    pub async fn update_collection(
        &self,
        case: &str,
        collection: &Collection,
    ) -> Result<Collection, GatewayError> {
        let path = collection_path(case, &collection.guid);
        let body = encode(&path, collection)?;
        self.data(Verb::Put, &path, Some(body)).await
    }

    pub async fn delete_collection(&self, case: &str, collection: &str) -> Result<(), GatewayError> {
        self.discard(Verb::Delete, &collection_path(case, collection))
            .await
    }

    pub async fn evict_collection_cache(
        &self,
        case: &str,
        collection: &str,
    ) -> Result<(), GatewayError> {
        let path = format!("{}/cache", collection_path(case, collection));
        self.discard(Verb::Delete, &path).await
    }

    pub async fn collection_download(
        &self,
        case: &str,
        collection: &str,
    ) -> Result<String, GatewayError> {
        self.download_link(&format!("{}/download", collection_path(case, collection)))
            .await
    }

    pub async fn analyses(
        &self,
        case: &str,
        collection: &str,
    ) -> Result<Vec<CollectionAnalysis>, GatewayError> {
        let path = format!("{}/analyses", collection_path(case, collection));
        self.data(Verb::Get, &path, None).await
    }

    pub async fn start_analysis(
        &self,
        case: &str,
        collection: &str,
        analyzer: &str,
    ) -> Result<CollectionAnalysis, GatewayError> {
        let path = format!("{}/analysis", collection_path(case, collection));
        let body = serde_json::json!({ "analyzer": analyzer });
        self.data(Verb::Post, &path, Some(body)).await
    }

    pub async fn restart_analysis(
        &self,
        case: &str,
        collection: &str,
        analyzer: &str,
    ) -> Result<CollectionAnalysis, GatewayError> {
        let path = analysis_path(case, collection, analyzer);
        self.data(Verb::Put, &path, Some(serde_json::json!({})))
            .await
    }

    pub async fn analysis_log(
        &self,
        case: &str,
        collection: &str,
        analyzer: &str,
    ) -> Result<String, GatewayError> {
        let path = format!("{}/log", analysis_path(case, collection, analyzer));
        self.gateway.fetch_text(&path).await
    }

    pub async fn analysis_download(
        &self,
        case: &str,
        collection: &str,
        analyzer: &str,
    ) -> Result<String, GatewayError> {
        self.download_link(&format!(
            "{}/download",
            analysis_path(case, collection, analyzer)
        ))
        .await
    }
}
