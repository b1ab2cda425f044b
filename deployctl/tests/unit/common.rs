//! Scripted collaborators

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use deployctl::app::options::AppOptions;
use deployctl::errors::{ExecError, PromptError};
use deployctl::exec::runner::{CommandRunner, Invocation};
use deployctl::prompt::DecisionSource;

/// How a scripted command answers
#[derive(Debug, Clone)]
pub enum Reply {
    Output(Vec<u8>),
    Fail(String),
    Missing,
}

impl Reply {
    pub fn json(body: &str) -> Self {
        Reply::Output(body.as_bytes().to_vec())
    }
}

/// Which runner entry point a command went through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Capture,
    Passthrough,
    Streaming,
}

/// Runner answering from a script of command-prefix replies.
/// Unscripted commands succeed with empty output.
#[derive(Default)]
pub struct ScriptedRunner {
    replies: Vec<(String, Reply)>,
    calls: Mutex<Vec<(Mode, String)>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(mut self, prefix: &str, reply: Reply) -> Self {
        self.replies.push((prefix.to_string(), reply));
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(_, command)| command.clone())
            .collect()
    }

    pub fn calls_with_mode(&self) -> Vec<(Mode, String)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn called(&self, prefix: &str) -> bool {
        self.calls().iter().any(|command| command.starts_with(prefix))
    }

    fn answer(&self, mode: Mode, invocation: &Invocation) -> Result<Vec<u8>, ExecError> {
        let command = invocation.to_string();
        self.calls.lock().unwrap().push((mode, command.clone()));

        let reply = self
            .replies
            .iter()
            .find(|(prefix, _)| command.starts_with(prefix.as_str()))
            .map(|(_, reply)| reply.clone())
            .unwrap_or(Reply::Output(Vec::new()));

        match reply {
            Reply::Output(body) => Ok(body),
            Reply::Fail(stderr) => Err(ExecError::Failed {
                command,
                code: Some(1),
                stderr,
            }),
            Reply::Missing => Err(ExecError::NotFound {
                program: invocation.program.clone(),
            }),
        }
    }
}

#[async_trait]
impl CommandRunner for ScriptedRunner {
    async fn run_json(&self, invocation: &Invocation) -> Result<Vec<u8>, ExecError> {
        self.answer(Mode::Capture, invocation)
    }

    async fn run(&self, invocation: &Invocation) -> Result<(), ExecError> {
        self.answer(Mode::Passthrough, invocation).map(|_| ())
    }

    async fn run_streaming(&self, invocation: &Invocation) -> Result<(), ExecError> {
        self.answer(Mode::Streaming, invocation).map(|_| ())
    }
}

/// Decision source with canned answers
pub struct ScriptedDecisions {
    confirm_answer: bool,
    selections: Mutex<VecDeque<Result<usize, PromptError>>>,
    confirm_calls: AtomicUsize,
    offered: Mutex<Vec<usize>>,
}

impl ScriptedDecisions {
    pub fn confirming(answer: bool) -> Self {
        Self {
            confirm_answer: answer,
            selections: Mutex::new(VecDeque::new()),
            confirm_calls: AtomicUsize::new(0),
            offered: Mutex::new(Vec::new()),
        }
    }

    pub fn selecting(selection: Result<usize, PromptError>) -> Self {
        let decisions = Self::confirming(false);
        decisions.selections.lock().unwrap().push_back(selection);
        decisions
    }

    pub fn confirm_calls(&self) -> usize {
        self.confirm_calls.load(Ordering::SeqCst)
    }

    /// Item counts passed to `select_index`, one per prompt
    pub fn offered(&self) -> Vec<usize> {
        self.offered.lock().unwrap().clone()
    }
}

#[async_trait]
impl DecisionSource for ScriptedDecisions {
    async fn confirm(&self, _question: &str) -> bool {
        self.confirm_calls.fetch_add(1, Ordering::SeqCst);
        self.confirm_answer
    }

    async fn select_index(&self, count: usize) -> Result<usize, PromptError> {
        self.offered.lock().unwrap().push(count);
        self.selections
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(PromptError::Cancelled))
    }
}

pub fn options() -> AppOptions {
    AppOptions::default()
}

pub fn shared<T: CommandRunner + 'static>(runner: &Arc<T>) -> Arc<dyn CommandRunner> {
    runner.clone()
}

pub const THREE_PODS: &str = r#"{"items":[
    {"metadata":{"name":"sample-app-5f7c9-aaaaa"},"status":{"phase":"Running"}},
    {"metadata":{"name":"sample-app-5f7c9-bbbbb"},"status":{"phase":"Running"}},
    {"metadata":{"name":"sample-app-5f7c9-ccccc"},"status":{"phase":"Pending"}}
]}"#;

pub const ONE_POD: &str =
    r#"{"items":[{"metadata":{"name":"sample-app-5f7c9-aaaaa"},"status":{"phase":"Running"}}]}"#;

pub const NO_PODS: &str = r#"{"apiVersion":"v1","items":[],"kind":"List"}"#;

pub const RELEASES: &str = r#"[
    {"name":"redis","namespace":"dev","revision":"2","status":"deployed"},
    {"name":"sample-app","namespace":"dev","revision":"3","status":"deployed"}
]"#;

pub const HISTORY: &str = r#"[
    {"revision":1,"updated":"2025-05-01T08:00:00.000000+00:00","status":"superseded","description":"Install complete"},
    {"revision":2,"updated":"2025-05-02T08:00:00.000000+00:00","status":"superseded","description":"Upgrade complete"},
    {"revision":3,"updated":"2025-05-03T08:00:00.000000+00:00","status":"deployed","description":"Upgrade complete"}
]"#;
