use anyhow::Result;
use serde_json::Value;

use flowci_core::flow::Flow;

use crate::App;
use crate::editor::EditorSession;

/// Result of an edit commit. `Rejected` carries the user-visible message for
/// both server-reported domain errors and transport failures; neither is
/// retried automatically.
#[derive(Debug, Clone, PartialEq)]
pub enum EditOutcome {
    Saved { flow: Flow },
    Rejected { message: String },
    Malformed,
}

pub(crate) enum ResponseShape {
    Success,
    DomainError { message: String },
    Malformed,
}

/// Tri-state classification shared by every backend response: a non-null
/// success discriminant field wins, then an explicit error/message pair,
/// then the malformed fallback.
pub(crate) fn classify(value: &Value, success_field: &str) -> ResponseShape {
    let succeeded = value
        .get(success_field)
        .is_some_and(|field| !field.is_null());
    if succeeded {
        return ResponseShape::Success;
    }

    if let Some(error) = value.get("error").filter(|field| !field.is_null()) {
        // Some endpoints send a human-readable `message` next to `error`;
        // others only send `error`. Never surface an empty message.
        let message = match value.get("message").and_then(Value::as_str) {
            Some(message) => message.to_string(),
            None => match error.as_str() {
                Some(text) => text.to_string(),
                None => error.to_string(),
            },
        };
        return ResponseShape::DomainError { message };
    }

    ResponseShape::Malformed
}

impl<'a> App<'a> {
    /// Sends the assembled flow to the backend. On success, navigates to the
    /// flow's detail view; on a domain error, surfaces the message and stays
    /// put; on anything else, hands the payload to the exception sink.
    pub fn commit_edit(&self, session: &EditorSession) -> Result<EditOutcome> {
        let flow = session.build_updated_flow();

        let value = match self.transport.edit_flow(&flow) {
            Ok(value) => value,
            Err(error) => {
                return Ok(EditOutcome::Rejected {
                    message: format!("the edit request could not be completed: {error:#}"),
                });
            }
        };

        match classify(&value, "id") {
            ResponseShape::Success => {
                let Ok(saved) = serde_json::from_value::<Flow>(value.clone()) else {
                    self.exceptions.report_malformed("editing flow", &value);
                    return Ok(EditOutcome::Malformed);
                };

                self.navigator.go_to(&format!("/flow/{}", saved.name))?;
                Ok(EditOutcome::Saved { flow: saved })
            }
            ResponseShape::DomainError { message } => Ok(EditOutcome::Rejected { message }),
            ResponseShape::Malformed => {
                self.exceptions.report_malformed("editing flow", &value);
                Ok(EditOutcome::Malformed)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn shape(value: Value, success_field: &str) -> &'static str {
        match classify(&value, success_field) {
            ResponseShape::Success => "success",
            ResponseShape::DomainError { .. } => "domain-error",
            ResponseShape::Malformed => "malformed",
        }
    }

    #[test]
    fn non_null_discriminant_wins() {
        assert_eq!(shape(json!({"id": "9", "name": "a"}), "id"), "success");
        assert_eq!(shape(json!({"code": 200}), "code"), "success");
    }

    #[test]
    fn null_discriminant_with_error_is_a_domain_error() {
        let value = json!({"id": null, "error": "conflict", "message": "name taken"});
        let ResponseShape::DomainError { message } = classify(&value, "id") else {
            panic!("expected domain error");
        };
        assert_eq!(message, "name taken");
    }

    #[test]
    fn error_without_message_falls_back_to_the_error_text() {
        let ResponseShape::DomainError { message } = classify(&json!({"error": "locked"}), "code")
        else {
            panic!("expected domain error");
        };
        assert_eq!(message, "locked");
    }

    #[test]
    fn non_string_error_without_message_falls_back_to_its_json_text() {
        let value = json!({"id": null, "error": {"reason": "conflict"}});
        let ResponseShape::DomainError { message } = classify(&value, "id") else {
            panic!("expected domain error");
        };
        assert_eq!(message, r#"{"reason":"conflict"}"#);
    }

    #[test]
    fn missing_both_discriminants_is_malformed() {
        assert_eq!(shape(json!({"unexpected": true}), "id"), "malformed");
        assert_eq!(shape(json!({"id": null, "error": null}), "id"), "malformed");
    }
}
