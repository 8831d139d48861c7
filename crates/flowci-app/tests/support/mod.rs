use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use anyhow::anyhow;
use serde_json::{Value, json};

use flowci_core::cache::{CacheError, CacheKey, CacheStore};
use flowci_core::exceptions::ExceptionSink;
use flowci_core::flow::{DeleteFlowRequest, Flow};
use flowci_core::navigator::Navigator;
use flowci_core::transport::FlowTransport;

#[derive(Debug, Clone, PartialEq)]
pub enum TransportCall {
    Edit(Flow),
    Delete(DeleteFlowRequest),
    FetchPlugins,
}

#[derive(Default)]
pub struct QueueTransport {
    responses: Mutex<VecDeque<anyhow::Result<Value>>>,
    calls: Mutex<Vec<TransportCall>>,
}

impl QueueTransport {
    pub fn new(responses: Vec<anyhow::Result<Value>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    #[allow(dead_code)]
    pub fn calls(&self) -> Vec<TransportCall> {
        self.calls.lock().expect("calls lock").clone()
    }

    fn next_response(&self, call: TransportCall) -> anyhow::Result<Value> {
        self.calls.lock().expect("calls lock").push(call);
        self.responses
            .lock()
            .expect("responses lock")
            .pop_front()
            .unwrap_or_else(|| Err(anyhow!("missing scripted response")))
    }
}

impl FlowTransport for QueueTransport {
    fn edit_flow(&self, flow: &Flow) -> anyhow::Result<Value> {
        self.next_response(TransportCall::Edit(flow.clone()))
    }

    fn delete_flow(&self, request: &DeleteFlowRequest) -> anyhow::Result<Value> {
        self.next_response(TransportCall::Delete(request.clone()))
    }

    fn fetch_plugins(&self) -> anyhow::Result<Value> {
        self.next_response(TransportCall::FetchPlugins)
    }
}

#[derive(Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<CacheKey, Value>>,
}

impl MemoryCache {
    pub fn seeded(entries: Vec<(CacheKey, Value)>) -> Self {
        Self {
            entries: Mutex::new(entries.into_iter().collect()),
        }
    }

    #[allow(dead_code)]
    pub fn entry(&self, key: CacheKey) -> Option<Value> {
        self.entries.lock().expect("entries lock").get(&key).cloned()
    }
}

impl CacheStore for MemoryCache {
    fn get(&self, key: CacheKey) -> Result<Option<Value>, CacheError> {
        Ok(self.entries.lock().expect("entries lock").get(&key).cloned())
    }

    fn set(&self, key: CacheKey, value: &Value) -> Result<(), CacheError> {
        self.entries
            .lock()
            .expect("entries lock")
            .insert(key, value.clone());
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingNavigator {
    visits: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn visits(&self) -> Vec<String> {
        self.visits.lock().expect("visits lock").clone()
    }
}

impl Navigator for RecordingNavigator {
    fn go_to(&self, path: &str) -> anyhow::Result<()> {
        self.visits.lock().expect("visits lock").push(path.to_string());
        Ok(())
    }

    fn go_back(&self) -> anyhow::Result<()> {
        self.visits
            .lock()
            .expect("visits lock")
            .push("(back)".to_string());
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingSink {
    reports: Mutex<Vec<(String, Value)>>,
}

impl RecordingSink {
    pub fn reports(&self) -> Vec<(String, Value)> {
        self.reports.lock().expect("reports lock").clone()
    }
}

impl ExceptionSink for RecordingSink {
    fn report_malformed(&self, action: &str, payload: &Value) {
        self.reports
            .lock()
            .expect("reports lock")
            .push((action.to_string(), payload.clone()));
    }
}

pub fn sample_flow_value() -> Value {
    json!({
        "id": "1",
        "name": "build-a",
        "userEmail": "dev@example.com",
        "repoOrigin": "https://github.com/dev/build-a",
        "repoId": 7,
        "hookId": 11,
        "platform": "github",
        "version": "1.0",
        "triggerPush": ["main"],
        "plugins": ["lint"],
        "needEnv": []
    })
}

#[allow(dead_code)]
pub fn sample_flow() -> Flow {
    serde_json::from_value(sample_flow_value()).expect("sample flow")
}

pub fn catalog_value(names: &[&str]) -> Value {
    let plugins: Vec<Value> = names
        .iter()
        .map(|name| json!({"scriptName": name, "describe": format!("{name} step")}))
        .collect();
    json!({"fetchedAt": "2026-08-28T00:00:00Z", "plugins": plugins})
}

#[allow(dead_code)]
pub fn account_value() -> Value {
    json!({
        "githubRepos": [
            {"id": 7, "branchs": ["main", "develop", "release"]},
            {"id": 8, "branchs": ["trunk"]}
        ]
    })
}

pub fn seeded_cache() -> MemoryCache {
    MemoryCache::seeded(vec![
        (CacheKey::Flows, json!([sample_flow_value()])),
        (CacheKey::ConnectedAccount, account_value()),
        (
            CacheKey::PluginCatalog,
            catalog_value(&["lint", "test", "deploy"]),
        ),
    ])
}
