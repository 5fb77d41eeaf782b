//! The four AO actions.
//!
//! `validate` is the host's "does this apply?" pre-check: pure, no side
//! effects. It parses the payload into an [`OperationRequest`] of the
//! action's kind, and that parse is the only schema check. `handle` expects
//! a payload that already passed `validate`; it calls exactly one adapter
//! operation and never returns an error, only a success or failure envelope.

use crate::envelope::ActionResponse;
use crate::error::{normalize, AoError};
use crate::format::format_outcome;
use crate::request::{OperationKind, OperationRequest, ValidationError};
use ao_adapter::AoService;
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::debug;

pub const SPAWN_AO_PROCESS: &str = "SPAWN_AO_PROCESS";
pub const SEND_AO_MESSAGE: &str = "SEND_AO_MESSAGE";
pub const READ_AO_RESULT: &str = "READ_AO_RESULT";
pub const DRY_RUN_AO: &str = "DRY_RUN_AO";

#[async_trait]
pub trait Action: Send + Sync {
    fn name(&self) -> &'static str;

    /// Alternative names the host may route by.
    fn similes(&self) -> &'static [&'static str];

    fn description(&self) -> &'static str;

    fn kind(&self) -> OperationKind;

    /// Parse `payload` as this action's request.
    fn check(&self, payload: &Value) -> Result<OperationRequest, ValidationError> {
        OperationRequest::parse(self.kind(), payload)
    }

    fn validate(&self, payload: &Value) -> bool {
        self.check(payload).is_ok()
    }

    /// Run the action on a payload that passed [`Action::validate`].
    ///
    /// An unvalidated payload that fails to parse still yields a failure
    /// envelope, with no adapter call.
    async fn handle(&self, service: &AoService, payload: &Value) -> ActionResponse {
        match self.check(payload) {
            Ok(request) => execute(service, request).await,
            Err(e) => ActionResponse::failure(failure_context(self.kind()), &AoError::from(e)),
        }
    }
}

fn failure_context(kind: OperationKind) -> &'static str {
    match kind {
        OperationKind::Spawn => "Failed to spawn AO process",
        OperationKind::SendMessage => "Failed to send AO message",
        OperationKind::ReadResult => "Failed to read AO result",
        OperationKind::DryRun => "Failed to dry run AO message",
    }
}

/// Invoke the adapter operation for a parsed request and build the envelope.
pub async fn execute(service: &AoService, request: OperationRequest) -> ActionResponse {
    let failed = failure_context(request.kind());
    match request {
        OperationRequest::Spawn(req) => {
            debug!(module = %req.module, scheduler = %req.scheduler, "handling spawn action");
            match service
                .spawn_process(req.module.clone(), req.scheduler.clone(), req.tags, req.data)
                .await
            {
                Ok(process_id) => ActionResponse::ok(
                    format!("Successfully spawned AO process with ID: {process_id}"),
                    json!({
                        "processId": process_id,
                        "module": req.module,
                        "scheduler": req.scheduler,
                    }),
                ),
                Err(e) => ActionResponse::failure(failed, &normalize(&e)),
            }
        }
        OperationRequest::SendMessage(req) => {
            debug!(process = %req.process, "handling send message action");
            match service
                .send_message(req.process.clone(), req.data, req.tags, req.anchor)
                .await
            {
                Ok(message_id) => ActionResponse::ok(
                    format!(
                        "Successfully sent message to process {}. Message ID: {message_id}",
                        req.process
                    ),
                    json!({
                        "messageId": message_id,
                        "process": req.process,
                    }),
                ),
                Err(e) => ActionResponse::failure(failed, &normalize(&e)),
            }
        }
        OperationRequest::ReadResult(req) => {
            debug!(
                process = %req.process,
                message_id = %req.message_id,
                "handling read result action"
            );
            match service
                .read_result(req.process.clone(), req.message_id.clone())
                .await
            {
                Ok(outcome) => ActionResponse::ok(
                    format!(
                        "Result for message {} on process {}:\n{}",
                        req.message_id,
                        req.process,
                        format_outcome(&outcome)
                    ),
                    json!({
                        "process": req.process,
                        "messageId": req.message_id,
                        "result": outcome,
                    }),
                ),
                Err(e) => ActionResponse::failure(failed, &normalize(&e)),
            }
        }
        OperationRequest::DryRun(req) => {
            debug!(process = %req.process, "handling dry run action");
            match service
                .dry_run(req.process.clone(), req.data, req.tags, req.anchor)
                .await
            {
                Ok(outcome) => ActionResponse::ok(
                    format!(
                        "Dry run result for process {}:\n{}",
                        req.process,
                        format_outcome(&outcome)
                    ),
                    json!({
                        "process": req.process,
                        "result": outcome,
                    }),
                ),
                Err(e) => ActionResponse::failure(failed, &normalize(&e)),
            }
        }
    }
}

pub struct SpawnProcessAction;

impl Action for SpawnProcessAction {
    fn name(&self) -> &'static str {
        SPAWN_AO_PROCESS
    }

    fn similes(&self) -> &'static [&'static str] {
        &["CREATE_AO_PROCESS", "NEW_AO_PROCESS", "LAUNCH_AO_PROCESS"]
    }

    fn description(&self) -> &'static str {
        "Spawn a new AO process from a module and scheduler"
    }

    fn kind(&self) -> OperationKind {
        OperationKind::Spawn
    }
}

pub struct SendMessageAction;

impl Action for SendMessageAction {
    fn name(&self) -> &'static str {
        SEND_AO_MESSAGE
    }

    fn similes(&self) -> &'static [&'static str] {
        &["MESSAGE_AO_PROCESS", "SEND_TO_AO", "AO_SEND"]
    }

    fn description(&self) -> &'static str {
        "Send a signed message to an AO process"
    }

    fn kind(&self) -> OperationKind {
        OperationKind::SendMessage
    }
}

pub struct ReadResultAction;

impl Action for ReadResultAction {
    fn name(&self) -> &'static str {
        READ_AO_RESULT
    }

    fn similes(&self) -> &'static [&'static str] {
        &["GET_AO_RESULT", "FETCH_AO_RESULT", "AO_RESULT"]
    }

    fn description(&self) -> &'static str {
        "Read the evaluation result of a message sent to an AO process"
    }

    fn kind(&self) -> OperationKind {
        OperationKind::ReadResult
    }
}

pub struct DryRunAction;

impl Action for DryRunAction {
    fn name(&self) -> &'static str {
        DRY_RUN_AO
    }

    fn similes(&self) -> &'static [&'static str] {
        &["SIMULATE_AO_MESSAGE", "AO_DRY_RUN", "TEST_AO_MESSAGE"]
    }

    fn description(&self) -> &'static str {
        "Evaluate a message against an AO process without persisting it"
    }

    fn kind(&self) -> OperationKind {
        OperationKind::DryRun
    }
}

/// Actions by name, with simile fallback.
#[derive(Clone)]
pub struct ActionRegistry {
    actions: Vec<Arc<dyn Action>>,
}

impl Default for ActionRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl ActionRegistry {
    pub fn with_defaults() -> Self {
        Self {
            actions: vec![
                Arc::new(SpawnProcessAction),
                Arc::new(SendMessageAction),
                Arc::new(ReadResultAction),
                Arc::new(DryRunAction),
            ],
        }
    }

    /// Case-insensitive lookup by name, then by simile.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Action>> {
        let wanted = name.to_ascii_uppercase();
        self.actions
            .iter()
            .find(|a| a.name() == wanted)
            .or_else(|| {
                self.actions
                    .iter()
                    .find(|a| a.similes().iter().any(|s| *s == wanted))
            })
            .cloned()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.actions.iter().map(|a| a.name()).collect()
    }
}
