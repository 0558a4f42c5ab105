//! Shared test utilities: mock identity service, scripted prompter, stub HTTP server

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};

use infrasee::cli::wizard::{StepInput, WizardPrompter};
use infrasee::flows::{FlowError, PasswordResetStep};
use infrasee::services::{IdentityService, ServiceError};

// ============================================================================
// Mock identity service
// ============================================================================

/// Records every call and fails the ones queued with `fail_next`
#[derive(Default)]
pub struct MockIdentity {
    calls: RefCell<Vec<String>>,
    failures: RefCell<Vec<(&'static str, ServiceError)>>,
}

impl MockIdentity {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next call to `operation` fail with `error`
    pub fn fail_next(&self, operation: &'static str, error: ServiceError) {
        self.failures.borrow_mut().push((operation, error));
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn record(&self, operation: &'static str, detail: String) -> Result<(), ServiceError> {
        self.calls.borrow_mut().push(format!("{}:{}", operation, detail));
        let mut failures = self.failures.borrow_mut();
        match failures.iter().position(|(op, _)| *op == operation) {
            Some(index) => Err(failures.remove(index).1),
            None => Ok(()),
        }
    }
}

impl IdentityService for MockIdentity {
    fn request_reset(&self, email: &str) -> Result<(), ServiceError> {
        self.record("request_reset", email.to_string())
    }

    fn verify_code(&self, email: &str, code: &str) -> Result<(), ServiceError> {
        self.record("verify_code", format!("{}:{}", email, code))
    }

    fn set_new_password(
        &self,
        email: &str,
        code: &str,
        password: &str,
    ) -> Result<(), ServiceError> {
        self.record("set_new_password", format!("{}:{}:{}", email, code, password))
    }
}

pub fn service_down() -> ServiceError {
    ServiceError::Transport("connection refused".to_string())
}

pub fn bad_code() -> ServiceError {
    ServiceError::Rejected {
        status: 400,
        message: "invalid code".to_string(),
    }
}

// ============================================================================
// Scripted prompter
// ============================================================================

/// Answers wizard prompts from queues and records what it was shown
#[derive(Default)]
pub struct ScriptedPrompter {
    pub emails: VecDeque<StepInput<String>>,
    pub codes: VecDeque<StepInput<String>>,
    pub passwords: VecDeque<StepInput<(String, String)>>,
    pub retries: VecDeque<bool>,
    pub steps_seen: Vec<PasswordResetStep>,
    pub email_defaults: Vec<Option<String>>,
    pub errors: Vec<FlowError>,
    pub requests: Vec<(String, bool)>,
}

impl ScriptedPrompter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn email(mut self, email: &str) -> Self {
        self.emails.push_back(StepInput::Submit(email.to_string()));
        self
    }

    /// Leave the email blank, which cancels the wizard
    pub fn email_cancel(mut self) -> Self {
        self.emails.push_back(StepInput::Back);
        self
    }

    pub fn code(mut self, code: &str) -> Self {
        self.codes.push_back(StepInput::Submit(code.to_string()));
        self
    }

    pub fn code_back(mut self) -> Self {
        self.codes.push_back(StepInput::Back);
        self
    }

    pub fn password(mut self, password: &str, confirmation: &str) -> Self {
        self.passwords
            .push_back(StepInput::Submit((password.to_string(), confirmation.to_string())));
        self
    }

    pub fn password_back(mut self) -> Self {
        self.passwords.push_back(StepInput::Back);
        self
    }

    pub fn retry(mut self, again: bool) -> Self {
        self.retries.push_back(again);
        self
    }
}

impl WizardPrompter for ScriptedPrompter {
    fn step_started(&mut self, step: PasswordResetStep, _progress: (usize, usize)) {
        self.steps_seen.push(step);
    }

    fn email(&mut self, current: Option<&str>) -> anyhow::Result<StepInput<String>> {
        self.email_defaults.push(current.map(str::to_string));
        self.emails
            .pop_front()
            .ok_or_else(|| anyhow::anyhow!("script ran out of emails"))
    }

    fn code(&mut self, _email: &str) -> anyhow::Result<StepInput<String>> {
        self.codes
            .pop_front()
            .ok_or_else(|| anyhow::anyhow!("script ran out of codes"))
    }

    fn new_password(&mut self) -> anyhow::Result<StepInput<(String, String)>> {
        self.passwords
            .pop_front()
            .ok_or_else(|| anyhow::anyhow!("script ran out of passwords"))
    }

    fn begin_request(&mut self, message: &str) {
        self.requests.push((message.to_string(), false));
    }

    fn end_request(&mut self, succeeded: bool) {
        if let Some(last) = self.requests.last_mut() {
            last.1 = succeeded;
        }
    }

    fn step_failed(&mut self, error: &FlowError) -> anyhow::Result<bool> {
        self.errors.push(error.clone());
        self.retries
            .pop_front()
            .ok_or_else(|| anyhow::anyhow!("script ran out of retry answers"))
    }
}

// ============================================================================
// One-shot HTTP stub server
// ============================================================================

/// What the stub server received
#[derive(Debug)]
pub struct CapturedRequest {
    pub method: String,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl CapturedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        let name = name.to_ascii_lowercase();
        self.headers
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).expect("request body is JSON")
    }
}

pub struct StubServer {
    pub base_url: String,
    handle: JoinHandle<CapturedRequest>,
}

impl StubServer {
    /// Wait for the single request and return it
    pub fn finish(self) -> CapturedRequest {
        self.handle.join().expect("stub server thread panicked")
    }
}

/// Serve exactly one request with the given status and JSON body
pub fn serve_once(status: u16, body: &str) -> StubServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub server");
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    let body = body.to_string();

    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().expect("accept connection");
        let mut reader = BufReader::new(stream.try_clone().expect("clone stream"));

        let mut request_line = String::new();
        reader.read_line(&mut request_line).unwrap();
        let mut parts = request_line.split_whitespace();
        let method = parts.next().unwrap_or_default().to_string();
        let path = parts.next().unwrap_or_default().to_string();

        let mut headers = Vec::new();
        let mut content_length = 0usize;
        loop {
            let mut line = String::new();
            reader.read_line(&mut line).unwrap();
            let line = line.trim_end();
            if line.is_empty() {
                break;
            }
            if let Some((key, value)) = line.split_once(':') {
                let key = key.trim().to_ascii_lowercase();
                let value = value.trim().to_string();
                if key == "content-length" {
                    content_length = value.parse().unwrap_or(0);
                }
                headers.push((key, value));
            }
        }

        let mut buf = vec![0u8; content_length];
        reader.read_exact(&mut buf).unwrap();

        let response = format!(
            "HTTP/1.1 {} Stub\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        stream.write_all(response.as_bytes()).unwrap();
        stream.flush().unwrap();

        CapturedRequest {
            method,
            path,
            headers,
            body: String::from_utf8_lossy(&buf).into_owned(),
        }
    });

    StubServer { base_url, handle }
}
