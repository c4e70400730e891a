//! Scripted stand-ins for the gateway and the dialogs.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};

use serde::Serialize;
use serde_json::{Value, json};

use crate::dialogs::{ConfirmPrompt, Dialogs};
use crate::error::GatewayError;
use crate::model::{
    AnalysisStatus, AnalyzerInfo, CaseMetadata, Collection, CollectionAnalysis, Collector,
    PendingDownloadKey,
};
use crate::remote::{Gateway, TransferProgress, UploadFile, Verb};
use crate::upload::EditDraft;

#[derive(Clone, Debug)]
pub enum Reply {
    Json(Value),
    Text(String),
    Fail(GatewayError),
}

/// In-memory gateway. Each route holds a queue of replies; the last one is
/// repeated. Every call yields once before answering so concurrent callers
/// interleave the way they would on a real socket.
#[derive(Default)]
pub struct FakeGateway {
    routes: RefCell<HashMap<(Verb, String), VecDeque<Reply>>>,
    calls: RefCell<Vec<(Verb, String, Option<Value>)>>,
    upload_steps: RefCell<Vec<u64>>,
}

impl FakeGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(&self, verb: Verb, path: &str, reply: Reply) -> &Self {
        self.routes
            .borrow_mut()
            .entry((verb, path.to_string()))
            .or_default()
            .push_back(reply);
        self
    }

    /// Queues `data` wrapped in the response envelope.
    pub fn on<T: Serialize>(&self, verb: Verb, path: &str, data: T) -> &Self {
        self.reply(verb, path, Reply::Json(json!({ "data": data, "count": 0 })))
    }

    pub fn on_text(&self, verb: Verb, path: &str, text: &str) -> &Self {
        self.reply(verb, path, Reply::Text(text.to_string()))
    }

    pub fn fail(&self, verb: Verb, path: &str, status: u16) -> &Self {
        self.reply(
            verb,
            path,
            Reply::Fail(GatewayError::Status {
                status,
                path: path.to_string(),
            }),
        )
    }

    /// Byte counts reported to the progress callback during `upload`.
    pub fn upload_steps(&self, steps: &[u64]) -> &Self {
        *self.upload_steps.borrow_mut() = steps.to_vec();
        self
    }

    pub fn calls(&self, verb: Verb, path: &str) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|(v, p, _)| *v == verb && p == path)
            .count()
    }

    pub fn total_calls(&self) -> usize {
        self.calls.borrow().len()
    }

    pub fn last_body(&self, verb: Verb, path: &str) -> Option<Value> {
        self.calls
            .borrow()
            .iter()
            .rev()
            .find(|(v, p, _)| *v == verb && p == path)
            .and_then(|(_, _, body)| body.clone())
    }

    fn next(&self, verb: Verb, path: &str) -> Reply {
        let mut routes = self.routes.borrow_mut();
        let Some(queue) = routes.get_mut(&(verb, path.to_string())) else {
            return Reply::Fail(GatewayError::Status {
                status: 404,
                path: path.to_string(),
            });
        };
        if queue.len() > 1 {
            queue.pop_front().unwrap()
        } else {
            queue.front().cloned().unwrap()
        }
    }

    fn record(&self, verb: Verb, path: &str, body: Option<Value>) {
        self.calls.borrow_mut().push((verb, path.to_string(), body));
    }
}

impl Gateway for FakeGateway {
    async fn send(&self, verb: Verb, path: &str, body: Option<Value>) -> Result<Value, GatewayError> {
        self.record(verb, path, body);
        tokio::task::yield_now().await;
        match self.next(verb, path) {
            Reply::Json(v) => Ok(v),
            Reply::Text(t) => Ok(Value::String(t)),
            Reply::Fail(e) => Err(e),
        }
    }

    async fn fetch_text(&self, path: &str) -> Result<String, GatewayError> {
        self.record(Verb::Get, path, None);
        tokio::task::yield_now().await;
        match self.next(Verb::Get, path) {
            Reply::Text(t) => Ok(t),
            Reply::Json(v) => Ok(v.to_string()),
            Reply::Fail(e) => Err(e),
        }
    }

    async fn upload(
        &self,
        path: &str,
        file: &UploadFile,
        progress: &mut dyn FnMut(TransferProgress),
    ) -> Result<Value, GatewayError> {
        self.record(Verb::Post, path, None);
        let steps = self.upload_steps.borrow().clone();
        for sent in steps {
            progress(TransferProgress {
                sent,
                total: file.size,
            });
            tokio::task::yield_now().await;
        }
        match self.next(Verb::Post, path) {
            Reply::Json(v) => Ok(v),
            Reply::Text(t) => Ok(Value::String(t)),
            Reply::Fail(e) => Err(e),
        }
    }

    fn download_url(&self, key: &PendingDownloadKey) -> String {
        format!("http://fake/api/download/{}/{}", key.guid, key.token)
    }
}

#[derive(Clone, Debug)]
pub enum EditReply {
    Dismiss,
    AcceptDraft,
    Replace(Collection),
}

/// Dialogs answering from queues. Exhausted queues answer "no".
#[derive(Default)]
pub struct ScriptedDialogs {
    confirms: RefCell<VecDeque<bool>>,
    typed: RefCell<VecDeque<Option<String>>>,
    edits: RefCell<VecDeque<EditReply>>,
    pub prompts: RefCell<Vec<ConfirmPrompt>>,
    pub drafts: RefCell<Vec<EditDraft>>,
}

impl ScriptedDialogs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answer_confirm(self, yes: bool) -> Self {
        self.confirms.borrow_mut().push_back(yes);
        self
    }

    pub fn answer_typed(self, answer: Option<&str>) -> Self {
        self.typed
            .borrow_mut()
            .push_back(answer.map(str::to_string));
        self
    }

    pub fn answer_edit(self, reply: EditReply) -> Self {
        self.edits.borrow_mut().push_back(reply);
        self
    }
}

impl Dialogs for ScriptedDialogs {
    async fn confirm(&self, prompt: &ConfirmPrompt) -> bool {
        self.prompts.borrow_mut().push(prompt.clone());
        self.confirms.borrow_mut().pop_front().unwrap_or(false)
    }

    async fn type_to_confirm(&self, prompt: &ConfirmPrompt, _token: &str) -> Option<String> {
        self.prompts.borrow_mut().push(prompt.clone());
        self.typed.borrow_mut().pop_front().flatten()
    }

    async fn edit_collection(&self, draft: &EditDraft) -> Option<Collection> {
        self.drafts.borrow_mut().push(draft.clone());
        match self.edits.borrow_mut().pop_front()? {
            EditReply::Dismiss => None,
            EditReply::AcceptDraft => Some(draft.collection.clone()),
            EditReply::Replace(c) => Some(c),
        }
    }
}

pub fn case(guid: &str, name: &str, created: &str) -> CaseMetadata {
    CaseMetadata {
        guid: guid.to_string(),
        name: name.to_string(),
        description: None,
        tsid: None,
        created: Some(created.to_string()),
        updated: None,
        closed: None,
        acs: Vec::new(),
        managed: false,
    }
}

pub fn collector(guid: &str, fingerprint: Option<&str>, created: &str) -> Collector {
    Collector {
        guid: guid.to_string(),
        created: Some(created.to_string()),
        profile: None,
        arch: "x64".to_string(),
        opsystem: "windows".to_string(),
        fingerprint: fingerprint.map(str::to_string),
        device: String::new(),
        memdump: false,
        dont_be_lazy: None,
        vss_analysis_age: None,
        use_auto_accessor: None,
        description: String::new(),
    }
}

pub fn collection(guid: &str, fingerprint: Option<&str>, created: &str) -> Collection {
    Collection {
        guid: guid.to_string(),
        created: Some(created.to_string()),
        tags: Vec::new(),
        device: None,
        version: None,
        opsystem: Some("windows".to_string()),
        hostname: Some(format!("host-{}", guid)),
        collected: None,
        fingerprint: fingerprint.map(str::to_string),
        description: String::new(),
    }
}

pub fn analyzer(name: &str, tags: &[&str]) -> AnalyzerInfo {
    AnalyzerInfo {
        name: name.to_string(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        version: "1.0.0".to_string(),
    }
}

pub fn analysis(collection: &str, analyzer: &str, status: AnalysisStatus) -> CollectionAnalysis {
    CollectionAnalysis {
        guid: collection.to_string(),
        analyzer: analyzer.to_string(),
        status,
        created: None,
        updated: None,
        priority: "medium".to_string(),
    }
}
