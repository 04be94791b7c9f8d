//! Test doubles shared by unit tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use crate::database::{ExecutorError, ProcedureCall, ProcedureExecutor, Row};

type Outcome = Result<Vec<Row>, ExecutorError>;

/// Executor that replays queued outcomes in order and records every call.
/// An empty queue answers with zero rows.
#[derive(Default)]
pub struct ScriptedExecutor {
    outcomes: Mutex<VecDeque<Outcome>>,
    calls: Mutex<Vec<ProcedureCall>>,
    healthy: Mutex<bool>,
}

impl ScriptedExecutor {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            healthy: Mutex::new(true),
            ..Self::default()
        })
    }

    pub fn push_rows(&self, rows: Vec<Value>) {
        let rows = rows.into_iter().map(row).collect();
        self.outcomes.lock().unwrap().push_back(Ok(rows));
    }

    pub fn push_error(&self, err: ExecutorError) {
        self.outcomes.lock().unwrap().push_back(Err(err));
    }

    pub fn set_healthy(&self, healthy: bool) {
        *self.healthy.lock().unwrap() = healthy;
    }

    pub fn calls(&self) -> Vec<ProcedureCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn last_call(&self) -> ProcedureCall {
        self.calls.lock().unwrap().last().cloned().expect("no procedure was called")
    }
}

#[async_trait]
impl ProcedureExecutor for ScriptedExecutor {
    async fn execute(&self, call: &ProcedureCall) -> Result<Vec<Row>, ExecutorError> {
        self.calls.lock().unwrap().push(call.clone());
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn ping(&self) -> Result<(), ExecutorError> {
        if *self.healthy.lock().unwrap() {
            Ok(())
        } else {
            Err(ExecutorError::Pool("connection refused".into()))
        }
    }
}

/// Build a [`Row`] from a JSON object literal.
pub fn row(value: Value) -> Row {
    match value {
        Value::Object(map) => Row::new(map),
        other => panic!("row fixture must be a JSON object, got {other}"),
    }
}
