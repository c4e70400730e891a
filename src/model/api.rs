//! Service-level payloads: the response envelope and the global catalogs.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Every JSON response body is wrapped as `{data, count}`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
    #[serde(default)]
    pub count: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Info {
    pub api: String,
    pub version: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstantEnums {
    #[serde(default)]
    pub status: Vec<String>,
    #[serde(default)]
    pub opsystem: Vec<String>,
    #[serde(default)]
    pub priority: Vec<String>,
    #[serde(default)]
    pub architecture: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constant {
    #[serde(default)]
    pub enums: ConstantEnums,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub banner: Option<String>,

    /// Storage quota in bytes, when the server enforces one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quota: Option<u64>,

    /// Extra collector fields enabled per operating system.
    #[serde(default)]
    pub extra_fields: HashMap<String, Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_empty_acs: Option<bool>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiskUsage {
    pub guid: String,
    pub collectors: u64,
    pub collections: u64,
    pub analyses: u64,
}

impl DiskUsage {
    pub fn total(&self) -> u64 {
        self.collectors + self.collections + self.analyses
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiDiskUsage {
    pub cases: Vec<DiskUsage>,
    pub updated: String,
}

impl ApiDiskUsage {
    pub fn for_case(&self, case_guid: &str) -> Option<&DiskUsage> {
        self.cases.iter().find(|c| c.guid == case_guid)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzerInfo {
    pub name: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub version: String,
}

/// One-time key redeemed at `/download/{guid}/{token}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingDownloadKey {
    pub guid: String,
    pub token: String,
}
