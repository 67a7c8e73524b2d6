//! Command check pipeline and in-flight request tracking.
//!
//! [`analyze`] runs one check end to end: validate the command, build the
//! prompt, call the model and normalize its reply. [`CheckerManager`] wraps it
//! for the UI, keeping at most one request outstanding and dropping replies
//! the UI is no longer waiting for.

use tokio::sync::mpsc::{Receiver, Sender};
use tracing::{debug, info, warn};

use crate::config::{KeySource, RequestConfig, Settings, Tier, env_api_key};
use crate::error::{CheckError, ValidationError};
use crate::event::{CheckData, CheckUpdate};
use crate::security::CommandAnalysis;

use super::client::{AiClient, CompletionInvoker};
use super::{parser, prompt};

pub type RequestId = u64;

/// Trimmed command, or [`ValidationError::EmptyCommand`] for blank input.
pub fn validate_command(command: &str) -> Result<&str, ValidationError> {
    let trimmed = command.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyCommand);
    }
    Ok(trimmed)
}

/// Check a single command against `model`.
pub async fn analyze<C: CompletionInvoker>(
    invoker: &C,
    command: &str,
    model: &str,
) -> Result<CommandAnalysis, CheckError> {
    let command = validate_command(command)?;
    let prompt = prompt::build_prompt(command);

    let raw = invoker.invoke(&prompt, model).await.inspect_err(|e| {
        warn!("Completion request failed: {}", e);
    })?;
    debug!(len = raw.len(), "Received completion");

    parser::normalize(&raw).map_err(|e| {
        warn!(kind = e.kind(), "Could not normalize completion: {}", e);
        CheckError::from(e)
    })
}

/// Outcome of [`CheckerManager::submit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    Started(RequestId),
    /// A request is already in flight; nothing was sent.
    Busy,
}

/// Runs checks in the background for the UI.
///
/// Owns both ends of the result channel: spawned tasks send into it and
/// [`CheckerManager::recv_update`] drains it from the main loop.
pub struct CheckerManager {
    check_tx: Sender<CheckData>,
    check_rx: Receiver<CheckData>,
    in_flight: Option<RequestId>,
    next_id: RequestId,
    env_key: KeySource,
}

impl Default for CheckerManager {
    fn default() -> Self {
        Self::new()
    }
}

impl CheckerManager {
    const CHANNEL_BUFFER: usize = 16;

    pub fn new() -> Self {
        Self::with_key_source(env_api_key)
    }

    /// Like [`CheckerManager::new`], with the fallback key read from
    /// `env_key` instead of `OPENAI_API_KEY`.
    pub fn with_key_source(env_key: KeySource) -> Self {
        let (check_tx, check_rx) = tokio::sync::mpsc::channel(Self::CHANNEL_BUFFER);
        Self {
            check_tx,
            check_rx,
            in_flight: None,
            next_id: 1,
            env_key,
        }
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Validate and start a check with the OpenAI-backed client.
    ///
    /// Blank commands and a missing API key fail here, before anything is
    /// spawned. Settings are read once; later edits do not affect the
    /// running request.
    pub fn submit(
        &mut self,
        command: &str,
        tier: Tier,
        settings: &Settings,
    ) -> Result<Submission, ValidationError> {
        if self.is_busy() {
            return Ok(Submission::Busy);
        }

        validate_command(command)?;
        let config = RequestConfig::resolve(settings, (self.env_key)())?;
        let client = AiClient::new(&config);
        let model = config.model_for(tier).to_string();

        Ok(self.submit_with(client, command, model))
    }

    /// Start a check with any completion provider.
    pub fn submit_with<C>(&mut self, invoker: C, command: &str, model: impl Into<String>) -> Submission
    where
        C: CompletionInvoker + Send + Sync + 'static,
    {
        if self.is_busy() {
            return Submission::Busy;
        }

        let request_id = self.next_id;
        self.next_id += 1;
        self.in_flight = Some(request_id);

        let command = command.trim().to_string();
        let model = model.into();
        info!(request_id, model = %model, command_len = command.len(), "Submitting command check");

        let tx = self.check_tx.clone();
        tokio::spawn(async move {
            let result = analyze(&invoker, &command, &model).await;
            let data = CheckData {
                request_id,
                command,
                model,
                result,
            };
            if let Err(e) = tx.send(data).await {
                warn!("Failed to deliver check result: {}", e);
            }
        });

        Submission::Started(request_id)
    }

    /// Stop waiting for the current request. Its reply is dropped on arrival.
    pub fn reset(&mut self) {
        if let Some(id) = self.in_flight.take() {
            debug!(request_id = id, "Abandoning in-flight check");
        }
    }

    /// Receive the next finished check.
    ///
    /// Returns `None` for replies that were abandoned with
    /// [`CheckerManager::reset`]. Call this in a `tokio::select!` branch of
    /// the main loop.
    pub async fn recv_update(&mut self) -> Option<CheckUpdate> {
        let data = self.check_rx.recv().await?;

        if self.in_flight != Some(data.request_id) {
            debug!(request_id = data.request_id, "Dropping stale check result");
            return None;
        }
        self.in_flight = None;

        Some(match data.result {
            Ok(analysis) => CheckUpdate::Completed {
                command: data.command,
                model: data.model,
                analysis,
            },
            Err(error) => CheckUpdate::Failed {
                message: error.user_message(),
                error,
            },
        })
    }
}
