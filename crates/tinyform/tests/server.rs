mod utils;

use anyhow::Error;
use tinyform::{FormServer, ServiceOutcome};
use tracing_test::traced_test;

use crate::utils::{
    given_server, when_page_served, when_requested, when_submitted, MockListener, RecordingHandler,
};

#[test]
#[traced_test]
fn no_listener_is_a_noop() -> Result<(), Error> {
    let (handler, _) = RecordingHandler::with_fields(2);
    let mut server: FormServer<MockListener, _> = FormServer::new(handler);

    assert_eq!(server.service()?, ServiceOutcome::Idle);

    Ok(())
}

#[test]
#[traced_test]
fn nothing_pending_is_a_noop() -> Result<(), Error> {
    let (mut server, _queue, _) = given_server(2);

    assert_eq!(server.service()?, ServiceOutcome::Idle);

    Ok(())
}

#[test]
#[traced_test]
fn plain_request_serves_the_form_page() -> Result<(), Error> {
    let (mut server, queue, _) = given_server(2);
    server.set_title("Device Setup");

    let page = when_page_served(&mut server, &queue)?;

    assert!(page.starts_with("HTTP/1.1 200 OK\r\nContent-type:text/html\r\n\r\n"));
    assert!(page.contains("<!DOCTYPE html>"));
    assert!(page.contains("<title>Device Setup</title>"));

    Ok(())
}

#[test]
#[traced_test]
fn submission_dispatches_values_in_chunk_order() -> Result<(), Error> {
    let (mut server, queue, received) = given_server(3);
    when_page_served(&mut server, &queue)?;

    let (outcome, sent, closed) =
        when_submitted(&mut server, &queue, "x11=alpha__SEP__x12=b%20c__SEP__x13=gamma")?;

    assert_eq!(outcome, ServiceOutcome::SubmissionComplete);
    assert!(closed);
    assert!(sent.contains("Content-Type: text/plain"));
    assert!(sent.contains("Saved; restarting..."));

    let received = received.borrow();
    assert_eq!(
        *received,
        vec![
            (1, "alpha".to_string()),
            (2, "b c".to_string()),
            (3, "gamma".to_string()),
        ]
    );

    Ok(())
}

#[test]
#[traced_test]
fn excess_chunks_are_truncated_at_field_count() -> Result<(), Error> {
    let (mut server, queue, received) = given_server(2);
    when_page_served(&mut server, &queue)?;

    let (outcome, _, _) = when_submitted(
        &mut server,
        &queue,
        "x11=a__SEP__x12=b__SEP__x13=c__SEP__x14=d",
    )?;

    assert_eq!(outcome, ServiceOutcome::SubmissionComplete);
    assert_eq!(received.borrow().len(), 2);

    Ok(())
}

#[test]
#[traced_test]
fn chunk_without_equals_is_skipped() -> Result<(), Error> {
    let (mut server, queue, received) = given_server(2);
    when_page_served(&mut server, &queue)?;

    let (_, _, _) = when_submitted(&mut server, &queue, "x11=a__SEP__garbage__SEP__x12=b")?;

    let received = received.borrow();
    assert_eq!(
        *received,
        vec![(1, "a".to_string()), (2, "b".to_string())]
    );

    Ok(())
}

#[test]
#[traced_test]
fn submission_without_query_is_dropped_silently() -> Result<(), Error> {
    let (mut server, queue, received) = given_server(2);
    when_page_served(&mut server, &queue)?;

    let (outcome, sent, closed) =
        when_requested(&mut server, &queue, "GET /ajax_inputs HTTP/1.1")?;

    assert_eq!(outcome, ServiceOutcome::Idle);
    assert!(sent.is_empty());
    assert!(closed);
    assert!(received.borrow().is_empty());

    Ok(())
}

#[test]
#[traced_test]
fn submission_with_no_valid_params_still_completes() -> Result<(), Error> {
    let (mut server, queue, received) = given_server(2);
    when_page_served(&mut server, &queue)?;

    let (outcome, sent, closed) = when_submitted(&mut server, &queue, "junk")?;

    assert_eq!(outcome, ServiceOutcome::SubmissionComplete);
    assert!(sent.contains("Saved; restarting..."));
    assert!(closed);
    assert!(received.borrow().is_empty());

    Ok(())
}

#[test]
#[traced_test]
fn submission_before_any_render_dispatches_nothing() -> Result<(), Error> {
    let (mut server, queue, received) = given_server(2);

    let (outcome, _, _) = when_submitted(&mut server, &queue, "x11=a")?;

    // No render yet, so the recorded field count is still zero
    assert_eq!(outcome, ServiceOutcome::SubmissionComplete);
    assert!(received.borrow().is_empty());

    Ok(())
}

#[test]
#[traced_test]
fn abandoned_request_takes_no_action() -> Result<(), Error> {
    let (mut server, queue, _) = given_server(2);

    // Data runs out before a submission marker or the end of the headers
    let (outcome, sent, _) = when_requested(&mut server, &queue, "GET / HTTP/1.1")?;

    assert_eq!(outcome, ServiceOutcome::Idle);
    assert!(sent.is_empty());

    Ok(())
}

#[test]
#[traced_test]
fn color_values_reach_the_handler_as_decimal() -> Result<(), Error> {
    let (mut server, queue, received) = given_server(1);
    when_page_served(&mut server, &queue)?;

    when_submitted(&mut server, &queue, "x11=%23FF0000")?;

    assert_eq!(*received.borrow(), vec![(1, "16711680".to_string())]);

    Ok(())
}
