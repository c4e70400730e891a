use std::collections::BTreeSet;

use crate::model::{AnalyzerInfo, Collection};

/// Initial contents of the post-upload edit form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditDraft {
    pub collection: Collection,
    pub file_name: String,
    pub available_tags: Vec<String>,
}

/// Sorted union of every tag the analyzer catalog knows.
pub fn available_tags(catalog: &[AnalyzerInfo]) -> Vec<String> {
    catalog
        .iter()
        .flat_map(|a| a.tags.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

impl EditDraft {
    /// Draft for editing an existing collection, outside of an upload.
    pub fn for_collection(collection: &Collection, catalog: &[AnalyzerInfo]) -> Self {
        Self {
            collection: collection.clone(),
            file_name: String::new(),
            available_tags: available_tags(catalog),
        }
    }
}

/// Description defaults to the file name; tags default to the collection's
/// operating system when the catalog knows it as a tag.
pub fn prefill(collection: &Collection, file_name: &str, catalog: &[AnalyzerInfo]) -> EditDraft {
    let tags = available_tags(catalog);
    let mut draft = collection.clone();
    if draft.description.trim().is_empty() {
        draft.description = file_name.to_string();
    }
    if draft.tags.is_empty()
        && let Some(os) = draft.opsystem.as_deref()
        && tags.iter().any(|t| t == os)
    {
        draft.tags = vec![os.to_string()];
    }
    EditDraft {
        collection: draft,
        file_name: file_name.to_string(),
        available_tags: tags,
    }
}

pub fn upload_warning(file_name: &str) -> Option<String> {
    if file_name.to_lowercase().ends_with(".zip") {
        return None;
    }
    Some("Helium supports zip and your file extension is mismatching".to_string())
}
