mod support;

use anyhow::anyhow;
use flowci_app::{App, EditOutcome};
use serde_json::json;

use support::{
    QueueTransport, RecordingNavigator, RecordingSink, TransportCall, sample_flow_value,
    seeded_cache,
};

#[test]
fn successful_edit_navigates_once_to_the_flow_detail_view() {
    let mut saved = sample_flow_value();
    saved["id"] = json!("9");
    let transport = QueueTransport::new(vec![Ok(saved)]);
    let cache = seeded_cache();
    let navigator = RecordingNavigator::default();
    let sink = RecordingSink::default();
    let app = App::new(&transport, &cache, &navigator, &sink);

    let session = app.open_editor("build-a").expect("session");
    let outcome = app.commit_edit(&session).expect("outcome");

    let EditOutcome::Saved { flow } = outcome else {
        panic!("expected saved outcome");
    };
    assert_eq!(flow.id, Some("9".to_string()));
    assert_eq!(navigator.visits(), vec!["/flow/build-a".to_string()]);
    assert!(sink.reports().is_empty());
}

#[test]
fn edit_sends_the_assembled_flow_over_the_transport() {
    let transport = QueueTransport::new(vec![Ok(sample_flow_value())]);
    let cache = seeded_cache();
    let navigator = RecordingNavigator::default();
    let sink = RecordingSink::default();
    let app = App::new(&transport, &cache, &navigator, &sink);

    let mut session = app.open_editor("build-a").expect("session");
    session.set_env_var("TOKEN", "abc").expect("set env");
    session.set_branch_checked("develop", true);
    app.commit_edit(&session).expect("outcome");

    let calls = transport.calls();
    assert_eq!(calls.len(), 1);
    let TransportCall::Edit(sent) = &calls[0] else {
        panic!("expected an edit call");
    };
    assert_eq!(sent.need_env, vec!["TOKEN===abc".to_string()]);
    assert_eq!(
        sent.trigger_push,
        vec!["main".to_string(), "develop".to_string()]
    );
}

#[test]
fn domain_error_surfaces_the_message_without_navigating() {
    let transport = QueueTransport::new(vec![Ok(json!({
        "id": null,
        "error": "conflict",
        "message": "name already in use"
    }))]);
    let cache = seeded_cache();
    let navigator = RecordingNavigator::default();
    let sink = RecordingSink::default();
    let app = App::new(&transport, &cache, &navigator, &sink);

    let session = app.open_editor("build-a").expect("session");
    let outcome = app.commit_edit(&session).expect("outcome");

    assert_eq!(
        outcome,
        EditOutcome::Rejected {
            message: "name already in use".to_string()
        }
    );
    assert!(navigator.visits().is_empty());
    assert!(sink.reports().is_empty());
}

#[test]
fn malformed_response_is_reported_to_the_exception_sink() {
    let transport = QueueTransport::new(vec![Ok(json!({"unexpected": true}))]);
    let cache = seeded_cache();
    let navigator = RecordingNavigator::default();
    let sink = RecordingSink::default();
    let app = App::new(&transport, &cache, &navigator, &sink);

    let session = app.open_editor("build-a").expect("session");
    let outcome = app.commit_edit(&session).expect("outcome");

    assert_eq!(outcome, EditOutcome::Malformed);
    assert!(navigator.visits().is_empty());
    let reports = sink.reports();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].0, "editing flow");
}

#[test]
fn transport_failure_is_a_rejection_with_a_generic_message() {
    let transport = QueueTransport::new(vec![Err(anyhow!("connection refused"))]);
    let cache = seeded_cache();
    let navigator = RecordingNavigator::default();
    let sink = RecordingSink::default();
    let app = App::new(&transport, &cache, &navigator, &sink);

    let session = app.open_editor("build-a").expect("session");
    let outcome = app.commit_edit(&session).expect("outcome");

    let EditOutcome::Rejected { message } = outcome else {
        panic!("expected rejected outcome");
    };
    assert!(message.contains("could not be completed"));
    assert!(navigator.visits().is_empty());
    assert!(sink.reports().is_empty());
}
