mod mock;

use std::{cell::RefCell, collections::VecDeque, rc::Rc};

use anyhow::Error;
use tinyform::{FormServer, ServiceOutcome};

pub use self::mock::{FormFn, MockConnection, MockListener, RecordingHandler};

pub type Queue = Rc<RefCell<VecDeque<MockConnection>>>;
pub type Received = Rc<RefCell<Vec<(usize, String)>>>;

pub fn given_server(fields: usize) -> (FormServer<MockListener, RecordingHandler>, Queue, Received) {
    let (handler, received) = RecordingHandler::with_fields(fields);
    let (listener, queue) = MockListener::new();

    let mut server = FormServer::new(handler);
    server.bind(listener);

    (server, queue, received)
}

/// Serve one plain page request, returning everything sent to the client.
pub fn when_page_served(
    server: &mut FormServer<MockListener, RecordingHandler>,
    queue: &Queue,
) -> Result<String, Error> {
    let connection = MockConnection::new(&["GET / HTTP/1.1", "Host: device.local", ""]);
    let sent = connection.sent();
    queue.borrow_mut().push_back(connection);

    let outcome = server.service()?;
    assert_eq!(outcome, ServiceOutcome::PageServed);

    let sent = sent.borrow().clone();
    Ok(sent)
}

/// Push one submission request with the given query string and service it.
///
/// Returns the outcome, everything sent back, and whether the connection was
/// closed.
pub fn when_submitted(
    server: &mut FormServer<MockListener, RecordingHandler>,
    queue: &Queue,
    query: &str,
) -> Result<(ServiceOutcome, String, bool), Error> {
    let line = format!("GET /ajax_inputs?{query} HTTP/1.1");
    when_requested(server, queue, &line)
}

/// Push one request with the given request line and service it.
pub fn when_requested(
    server: &mut FormServer<MockListener, RecordingHandler>,
    queue: &Queue,
    line: &str,
) -> Result<(ServiceOutcome, String, bool), Error> {
    let connection = MockConnection::new(&[line]);
    let sent = connection.sent();
    let closed = connection.closed();
    queue.borrow_mut().push_back(connection);

    let outcome = server.service()?;

    let sent = sent.borrow().clone();
    let closed = *closed.borrow();
    Ok((outcome, sent, closed))
}
