use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseMetadata {
    pub guid: String,
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tsid: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<String>,

    /// Absent or empty means open; a timestamp means closed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub closed: Option<String>,

    #[serde(default)]
    pub acs: Vec<String>,
    #[serde(default)]
    pub managed: bool,
}

impl CaseMetadata {
    pub fn is_closed(&self) -> bool {
        super::is_set(self.closed.as_deref())
    }
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct NewCase {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tsid: Option<String>,
    pub acs: Vec<String>,
}

/// Partial case update; unset fields are left untouched by the server.
#[derive(Clone, Debug, Default, Serialize)]
pub struct CaseUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tsid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closed: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acs: Option<Vec<String>>,
}
