// src/commands/types.rs
use async_trait::async_trait;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use crate::session::SessionState;

/// HTTP response for fetch callback
#[derive(Debug, Clone)]
pub struct FetchResponse {
    pub status: u16,
    pub status_text: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
    pub url: String,
}

/// Future returned by a FetchFn
pub type FetchFuture = Pin<Box<dyn Future<Output = Result<FetchResponse, String>> + Send>>;

/// Callback for HTTP requests (used by curl)
/// Parameters: url, method, headers, body
pub type FetchFn = Arc<dyn Fn(String, String, Vec<(String, String)>, Option<String>) -> FetchFuture + Send + Sync>;

/// Output that becomes available after the command has returned.
pub struct DeferredOutput(Pin<Box<dyn Future<Output = CommandResult> + Send>>);

impl DeferredOutput {
    pub fn new(future: impl Future<Output = CommandResult> + Send + 'static) -> Self {
        Self(Box::pin(future))
    }

    /// Wait for the output to settle.
    pub async fn wait(self) -> CommandResult {
        self.0.await
    }
}

impl fmt::Debug for DeferredOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DeferredOutput(..)")
    }
}

/// Notification for the host surrounding the shell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent {
    ClearScreen,
    Exit,
}

/// Result of running a command
#[derive(Debug)]
pub struct CommandResult {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
    pub event: Option<HostEvent>,
    /// Still-running part of the command; the prompt waits for it
    pub deferred: Option<DeferredOutput>,
}

impl CommandResult {
    pub fn success(stdout: String) -> Self {
        Self::with_exit_code(stdout, String::new(), 0)
    }

    pub fn error(stderr: String) -> Self {
        Self::with_exit_code(String::new(), stderr, 1)
    }

    pub fn with_exit_code(stdout: String, stderr: String, exit_code: i32) -> Self {
        Self { stdout, stderr, exit_code, event: None, deferred: None }
    }

    pub fn with_event(mut self, event: HostEvent) -> Self {
        self.event = Some(event);
        self
    }

    pub fn with_deferred(mut self, deferred: DeferredOutput) -> Self {
        self.deferred = Some(deferred);
        self
    }

    pub fn is_pending(&self) -> bool {
        self.deferred.is_some()
    }

    /// Wait for any deferred output and merge it into this result.
    pub async fn settle(mut self) -> CommandResult {
        if let Some(deferred) = self.deferred.take() {
            let later = deferred.wait().await;
            self.stdout.push_str(&later.stdout);
            self.stderr.push_str(&later.stderr);
            self.exit_code = later.exit_code;
            self.event = later.event.or(self.event);
        }
        self
    }
}

/// Command execution context
pub struct CommandContext<'a> {
    pub args: Vec<String>,
    pub state: &'a mut SessionState,
    pub fetch_fn: Option<FetchFn>,
}

/// Command trait
#[async_trait]
pub trait Command: Send + Sync {
    fn name(&self) -> &'static str;

    /// Extra names the command is registered under
    fn aliases(&self) -> &'static [&'static str] {
        &[]
    }

    async fn execute(&self, ctx: CommandContext<'_>) -> CommandResult;
}
