use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collector {
    pub guid: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,

    pub arch: String,
    pub opsystem: String,

    /// Stable identity of the deployed agent, distinct from `guid`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,

    #[serde(default)]
    pub device: String,
    #[serde(default)]
    pub memdump: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dont_be_lazy: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vss_analysis_age: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_auto_accessor: Option<bool>,
    #[serde(default)]
    pub description: String,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct NewCollector {
    pub arch: String,
    pub opsystem: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
    pub device: String,
    pub memdump: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dont_be_lazy: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vss_analysis_age: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_auto_accessor: Option<bool>,
    pub description: String,
}

/// Material for registering a collector that was generated elsewhere.
#[derive(Clone, Debug, Serialize)]
pub struct CollectorImport {
    pub arch: String,
    pub opsystem: String,
    pub secret: String,
    pub key_pem: String,
    pub fingerprint: String,
    pub description: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectorSecret {
    pub secret: String,
    pub key_pem: String,
    pub crt_pem: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    #[serde(default)]
    pub targets: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    pub guid: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,

    /// Free-form labels; also select which analyzers apply.
    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opsystem: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collected: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,
    #[serde(default)]
    pub description: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisStatus {
    Pending,
    Processing,
    Success,
    Failure,
    #[serde(other)]
    Unknown,
}

impl AnalysisStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisStatus::Pending => "pending",
            AnalysisStatus::Processing => "processing",
            AnalysisStatus::Success => "success",
            AnalysisStatus::Failure => "failure",
            AnalysisStatus::Unknown => "unknown",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionAnalysis {
    pub guid: String,
    pub analyzer: String,
    pub status: AnalysisStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<String>,
    #[serde(default)]
    pub priority: String,
}
