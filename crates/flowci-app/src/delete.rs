use anyhow::Result;
use thiserror::Error;

use flowci_core::flow::{DeleteFlowRequest, Flow};

use crate::App;
use crate::commit::{ResponseShape, classify};

/// Session-local state gating the destructive delete behind an explicit
/// confirmation. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteState {
    Idle,
    AwaitingConfirmation,
    InFlight,
    Succeeded,
    Failed { message: String },
}

impl DeleteState {
    fn label(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::AwaitingConfirmation => "awaiting confirmation",
            Self::InFlight => "in flight",
            Self::Succeeded => "succeeded",
            Self::Failed { .. } => "failed",
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DeleteStateError {
    #[error("'{event}' is not a valid delete transition while {state}")]
    InvalidTransition {
        event: &'static str,
        state: &'static str,
    },
}

#[derive(Debug, Error)]
pub enum DeleteError {
    #[error("flow '{name}' has never been saved and cannot be deleted")]
    UnsavedFlow { name: String },
}

/// The confirm/commit state machine. Exactly one path leads to the network:
/// `request` -> `begin` -> `succeed`/`fail`. `Succeeded` is terminal; a
/// failed attempt must be `reset` before a new `request`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteConfirmation {
    state: DeleteState,
}

impl Default for DeleteConfirmation {
    fn default() -> Self {
        Self::new()
    }
}

impl DeleteConfirmation {
    pub fn new() -> Self {
        Self {
            state: DeleteState::Idle,
        }
    }

    pub fn state(&self) -> &DeleteState {
        &self.state
    }

    fn rejected(&self, event: &'static str) -> DeleteStateError {
        DeleteStateError::InvalidTransition {
            event,
            state: self.state.label(),
        }
    }

    /// The user asks to delete; no network call yet.
    pub fn request(&mut self) -> Result<(), DeleteStateError> {
        if self.state != DeleteState::Idle {
            return Err(self.rejected("request"));
        }
        self.state = DeleteState::AwaitingConfirmation;
        Ok(())
    }

    pub fn cancel(&mut self) -> Result<(), DeleteStateError> {
        if self.state != DeleteState::AwaitingConfirmation {
            return Err(self.rejected("cancel"));
        }
        self.state = DeleteState::Idle;
        Ok(())
    }

    /// The user confirmed; the delete request may now be issued. Re-entry
    /// while a request is in flight is rejected here.
    pub fn begin(&mut self) -> Result<(), DeleteStateError> {
        if self.state != DeleteState::AwaitingConfirmation {
            return Err(self.rejected("confirm"));
        }
        self.state = DeleteState::InFlight;
        Ok(())
    }

    pub fn succeed(&mut self) -> Result<(), DeleteStateError> {
        if self.state != DeleteState::InFlight {
            return Err(self.rejected("success"));
        }
        self.state = DeleteState::Succeeded;
        Ok(())
    }

    pub fn fail(&mut self, message: String) -> Result<(), DeleteStateError> {
        if self.state != DeleteState::InFlight {
            return Err(self.rejected("failure"));
        }
        self.state = DeleteState::Failed { message };
        Ok(())
    }

    /// Returns a failed attempt to `Idle` so the user may start over.
    pub fn reset(&mut self) -> Result<(), DeleteStateError> {
        if !matches!(self.state, DeleteState::Failed { .. }) {
            return Err(self.rejected("reset"));
        }
        self.state = DeleteState::Idle;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    Rejected { message: String },
    Malformed,
}

impl<'a> App<'a> {
    /// The user declined the confirmation. Returns the machine to `Idle` and
    /// navigates back to wherever the delete was requested from.
    pub fn cancel_delete(&self, confirmation: &mut DeleteConfirmation) -> Result<()> {
        confirmation.cancel()?;
        self.navigator.go_back()?;
        Ok(())
    }

    /// Issues the confirmed delete and drives the machine to its terminal
    /// state. Success is discriminated by a non-null `code` field and
    /// navigates to the dashboard.
    pub fn confirm_delete(
        &self,
        confirmation: &mut DeleteConfirmation,
        flow: &Flow,
    ) -> Result<DeleteOutcome> {
        let Some(id) = flow.id.clone() else {
            return Err(DeleteError::UnsavedFlow {
                name: flow.name.clone(),
            }
            .into());
        };

        confirmation.begin()?;

        let request = DeleteFlowRequest {
            id,
            hook_id: flow.hook_id,
            repo_id: flow.repo_id,
        };

        let value = match self.transport.delete_flow(&request) {
            Ok(value) => value,
            Err(error) => {
                let message = format!("the delete request could not be completed: {error:#}");
                confirmation.fail(message.clone())?;
                return Ok(DeleteOutcome::Rejected { message });
            }
        };

        match classify(&value, "code") {
            ResponseShape::Success => {
                confirmation.succeed()?;
                self.navigator.go_to("/dashboard")?;
                Ok(DeleteOutcome::Deleted)
            }
            ResponseShape::DomainError { message } => {
                confirmation.fail(message.clone())?;
                Ok(DeleteOutcome::Rejected { message })
            }
            ResponseShape::Malformed => {
                confirmation
                    .fail("the delete response did not match any known shape".to_string())?;
                self.exceptions.report_malformed("deleting flow", &value);
                Ok(DeleteOutcome::Malformed)
            }
        }
    }
}
