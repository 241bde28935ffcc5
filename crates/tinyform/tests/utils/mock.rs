use std::{cell::RefCell, collections::VecDeque, rc::Rc};

use anyhow::Error;
use tinyform::{Connection, FormHandler, Listener, PageBuilder};

/// In-memory listener handing out scripted connections, one per accept.
pub struct MockListener {
    queue: Rc<RefCell<VecDeque<MockConnection>>>,
}

impl MockListener {
    pub fn new() -> (Self, Rc<RefCell<VecDeque<MockConnection>>>) {
        let queue = Rc::new(RefCell::new(VecDeque::new()));
        let listener = Self {
            queue: queue.clone(),
        };
        (listener, queue)
    }
}

impl Listener for MockListener {
    type Connection = MockConnection;

    fn accept(&mut self) -> Result<Option<MockConnection>, Error> {
        Ok(self.queue.borrow_mut().pop_front())
    }
}

/// Scripted connection: a fixed set of incoming lines, recording everything
/// written back.
pub struct MockConnection {
    incoming: VecDeque<String>,
    open: bool,
    sent: Rc<RefCell<String>>,
    closed: Rc<RefCell<bool>>,
}

impl MockConnection {
    pub fn new(lines: &[&str]) -> Self {
        Self {
            incoming: lines.iter().map(|line| line.to_string()).collect(),
            open: true,
            sent: Rc::default(),
            closed: Rc::default(),
        }
    }

    pub fn sent(&self) -> Rc<RefCell<String>> {
        self.sent.clone()
    }

    pub fn closed(&self) -> Rc<RefCell<bool>> {
        self.closed.clone()
    }
}

impl Connection for MockConnection {
    fn is_open(&self) -> bool {
        self.open
    }

    fn has_data(&mut self) -> Result<bool, Error> {
        Ok(!self.incoming.is_empty())
    }

    fn read_line(&mut self) -> Result<Option<String>, Error> {
        Ok(self.incoming.pop_front())
    }

    fn write_all(&mut self, text: &str) -> Result<(), Error> {
        self.sent.borrow_mut().push_str(text);
        Ok(())
    }

    fn close(&mut self) {
        self.open = false;
        *self.closed.borrow_mut() = true;
    }
}

/// Handler declaring a fixed number of text fields, recording every value
/// the dispatcher hands back.
pub struct RecordingHandler {
    fields: usize,
    received: Rc<RefCell<Vec<(usize, String)>>>,
}

impl RecordingHandler {
    pub fn with_fields(fields: usize) -> (Self, Rc<RefCell<Vec<(usize, String)>>>) {
        let received = Rc::new(RefCell::new(Vec::new()));
        let handler = Self {
            fields,
            received: received.clone(),
        };
        (handler, received)
    }
}

impl FormHandler for RecordingHandler {
    fn build_form(&mut self, page: &mut PageBuilder<'_>) {
        for index in 1..=self.fields {
            page.add_text(&format!("Field {index}"), "");
        }
    }

    fn receive_value(&mut self, ordinal: usize, value: &str) {
        self.received.borrow_mut().push((ordinal, value.to_string()));
    }
}

/// Adapter for declaring a one-off form from a closure.
pub struct FormFn<F>(pub F);

impl<F> FormHandler for FormFn<F>
where
    F: FnMut(&mut PageBuilder<'_>),
{
    fn build_form(&mut self, page: &mut PageBuilder<'_>) {
        (self.0)(page);
    }

    fn receive_value(&mut self, _ordinal: usize, _value: &str) {}
}
