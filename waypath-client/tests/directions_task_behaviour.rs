//! Behavioural tests for [`DirectionsClient::calculate`] and its task handle.
//!
//! These tests use [`StubTransport`] so no directions service is needed.
//! Clients are built outside any runtime and therefore drive requests on
//! their own runtime.

mod support;

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use serde_json::Value;
use std::cell::RefCell;
use std::sync::mpsc;
use std::time::Duration;
use waypath_client::test_support::{ANNOTATION_FIXTURE, StubTransport};
use waypath_client::{DirectionsError, DirectionsTask, TaskState, TransportError};
use waypath_core::{Attribute, DecodeError, DirectionsResponse};

use support::{annotation_options, client_with};

/// Longest wait for a completion callback.
const COMPLETION_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Default)]
struct Outcome {
    task: Option<DirectionsTask>,
    result: Option<Result<DirectionsResponse, DirectionsError>>,
    late_cancel_accepted: Option<bool>,
}

#[fixture]
fn transport() -> RefCell<Option<StubTransport>> {
    RefCell::new(None)
}

#[fixture]
fn outcome() -> RefCell<Outcome> {
    RefCell::new(Outcome::default())
}

fn fixture_without_congestion() -> String {
    let mut body: Value = serde_json::from_str(ANNOTATION_FIXTURE).expect("fixture is JSON");
    if let Some(Value::Object(annotation)) = body.pointer_mut("/routes/0/legs/0/annotation") {
        annotation.remove("congestion");
    }
    body.to_string()
}

/// What the caller does right after starting a calculation.
#[derive(Debug, Clone, Copy)]
enum AfterStart {
    Wait,
    CancelTask,
    DropClient,
}

fn run(
    transport: &RefCell<Option<StubTransport>>,
    outcome: &RefCell<Outcome>,
    after_start: AfterStart,
) {
    let stub = transport
        .borrow()
        .clone()
        .expect("transport must be initialised");
    let client = client_with(stub);
    let (tx, rx) = mpsc::channel();

    let task = client.calculate(annotation_options(), move |result| {
        let _ = tx.send(result);
    });
    match after_start {
        AfterStart::Wait => {}
        AfterStart::CancelTask => {
            task.cancel();
        }
        AfterStart::DropClient => {
            std::thread::sleep(Duration::from_millis(50));
            drop(client);
        }
    }
    let result = rx
        .recv_timeout(COMPLETION_TIMEOUT)
        .expect("completion must run");

    let mut outcome = outcome.borrow_mut();
    outcome.task = Some(task);
    outcome.result = Some(result);
}

fn task_state(outcome: &RefCell<Outcome>) -> TaskState {
    outcome
        .borrow()
        .task
        .as_ref()
        .expect("a task must have been started")
        .state()
}

// --- Given steps ---

#[given("a directions service that answers slowly")]
fn slow_service(#[from(transport)] transport: &RefCell<Option<StubTransport>>) {
    *transport.borrow_mut() = Some(
        StubTransport::with_body(ANNOTATION_FIXTURE).with_delay(Duration::from_millis(200)),
    );
}

#[given("a directions service that answers with the recorded route")]
fn recorded_service(#[from(transport)] transport: &RefCell<Option<StubTransport>>) {
    *transport.borrow_mut() = Some(StubTransport::with_body(ANNOTATION_FIXTURE));
}

#[given("a directions service that times out")]
fn timeout_service(#[from(transport)] transport: &RefCell<Option<StubTransport>>) {
    *transport.borrow_mut() = Some(StubTransport::with_error(TransportError::Timeout {
        url: "https://api.mapbox.com/directions/v5/mapbox/driving-traffic/x.json".to_owned(),
        timeout_secs: 30,
    }));
}

#[given("a directions service whose route lacks congestion levels")]
fn service_without_congestion(#[from(transport)] transport: &RefCell<Option<StubTransport>>) {
    *transport.borrow_mut() = Some(StubTransport::with_body(fixture_without_congestion()));
}

// --- When steps ---

#[when("a route is calculated and cancelled straight away")]
fn calculate_and_cancel(
    #[from(transport)] transport: &RefCell<Option<StubTransport>>,
    #[from(outcome)] outcome: &RefCell<Outcome>,
) {
    run(transport, outcome, AfterStart::CancelTask);
}

#[when("a route is calculated and cancelled after it completes")]
fn calculate_then_cancel(
    #[from(transport)] transport: &RefCell<Option<StubTransport>>,
    #[from(outcome)] outcome: &RefCell<Outcome>,
) {
    run(transport, outcome, AfterStart::Wait);
    let accepted = outcome
        .borrow()
        .task
        .as_ref()
        .expect("a task must have been started")
        .cancel();
    outcome.borrow_mut().late_cancel_accepted = Some(accepted);
}

#[when("a route is calculated and the client is dropped before it completes")]
fn calculate_then_drop_client(
    #[from(transport)] transport: &RefCell<Option<StubTransport>>,
    #[from(outcome)] outcome: &RefCell<Outcome>,
) {
    run(transport, outcome, AfterStart::DropClient);
}

#[when("a route is calculated")]
fn calculate(
    #[from(transport)] transport: &RefCell<Option<StubTransport>>,
    #[from(outcome)] outcome: &RefCell<Outcome>,
) {
    run(transport, outcome, AfterStart::Wait);
}

// --- Then steps ---

#[then("the completion receives a cancellation error")]
fn cancellation_error(#[from(outcome)] outcome: &RefCell<Outcome>) {
    let borrowed = outcome.borrow();
    let result = borrowed.result.as_ref().expect("completion must have run");
    assert!(
        matches!(result, Err(DirectionsError::Cancelled)),
        "expected Cancelled, got {result:?}"
    );
}

#[then("the completion receives the decoded route")]
fn decoded_route(#[from(outcome)] outcome: &RefCell<Outcome>) {
    let borrowed = outcome.borrow();
    let response = borrowed
        .result
        .as_ref()
        .expect("completion must have run")
        .as_ref()
        .expect("expected a decoded response");
    assert_eq!(response.routes[0].coordinates.len(), 128);
}

#[then("the late cancellation is ignored")]
fn late_cancel_ignored(#[from(outcome)] outcome: &RefCell<Outcome>) {
    assert_eq!(outcome.borrow().late_cancel_accepted, Some(false));
}

#[then("the completion receives a timeout error")]
fn timeout_error(#[from(outcome)] outcome: &RefCell<Outcome>) {
    let borrowed = outcome.borrow();
    let result = borrowed.result.as_ref().expect("completion must have run");
    assert!(
        matches!(
            result,
            Err(DirectionsError::Transport(TransportError::Timeout {
                timeout_secs: 30,
                ..
            }))
        ),
        "expected Timeout, got {result:?}"
    );
}

#[then("the completion receives a missing congestion error")]
fn missing_congestion(#[from(outcome)] outcome: &RefCell<Outcome>) {
    let borrowed = outcome.borrow();
    let result = borrowed.result.as_ref().expect("completion must have run");
    assert!(
        matches!(
            result,
            Err(DirectionsError::Decode(DecodeError::MissingAnnotation {
                attribute: Attribute::CongestionLevel,
                ..
            }))
        ),
        "expected MissingAnnotation, got {result:?}"
    );
}

#[then("the task is canceled")]
fn task_canceled(#[from(outcome)] outcome: &RefCell<Outcome>) {
    assert_eq!(task_state(outcome), TaskState::Canceled);
}

#[then("the task is completed")]
fn task_completed(#[from(outcome)] outcome: &RefCell<Outcome>) {
    assert_eq!(task_state(outcome), TaskState::Completed);
}

#[then("the task is failed")]
fn task_failed(#[from(outcome)] outcome: &RefCell<Outcome>) {
    assert_eq!(task_state(outcome), TaskState::Failed);
}

// --- Scenario registrations ---

macro_rules! register_scenario {
    ($fn_name:ident, $title:literal) => {
        #[scenario(path = "tests/features/directions_task.feature", name = $title)]
        fn $fn_name(transport: RefCell<Option<StubTransport>>, outcome: RefCell<Outcome>) {
            let _ = (transport, outcome);
        }
    };
}

register_scenario!(
    cancelling_before_completion,
    "cancelling before completion reports a cancellation"
);
register_scenario!(
    cancelling_after_completion,
    "cancelling after completion changes nothing"
);
register_scenario!(timeout_is_reported, "a timeout is reported as a transport error");
register_scenario!(
    missing_annotation_fails_route,
    "a missing requested annotation fails the route"
);
register_scenario!(
    dropping_client_cancels_in_flight_request,
    "dropping the client reports a cancellation"
);
