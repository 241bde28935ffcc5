use anyhow::Error;
use tracing::{event, Level};

use crate::{
    query,
    registry::FieldRegistry,
    render::{self, PageBuilder},
    scanner::{self, ScanOutcome},
    transport::{Connection, Listener},
};

/// Form declaration and value sink, provided by the embedding application.
pub trait FormHandler {
    /// Declare the form's fields, in order. Called once per page render.
    fn build_form(&mut self, page: &mut PageBuilder<'_>);

    /// Receive one submitted value, with its one-based field ordinal.
    ///
    /// Ordinals follow submission order, which matches declaration order of
    /// the render the page came from.
    fn receive_value(&mut self, ordinal: usize, value: &str);
}

/// What one [`FormServer::service`] call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceOutcome {
    /// Nothing pending, or the request went away before completing.
    Idle,
    /// A fresh form page was served.
    PageServed,
    /// A submission was dispatched and acknowledged.
    ///
    /// The embedding application should now re-initialize from whatever the
    /// value callback persisted. The original device restarts at this point;
    /// that decision is left to the host here.
    SubmissionComplete,
}

/// Polled configuration form server.
///
/// Call [`service`](FormServer::service) repeatedly from a run loop. Each
/// call accepts at most one pending connection and processes it to
/// completion. Single-threaded by design; there is no concurrent connection
/// handling.
pub struct FormServer<L, H> {
    listener: Option<L>,
    handler: H,
    registry: FieldRegistry,
    title: String,
}

impl<L, H> FormServer<L, H>
where
    L: Listener,
    H: FormHandler,
{
    pub fn new(handler: H) -> Self {
        Self {
            listener: None,
            handler,
            registry: FieldRegistry::default(),
            title: "Default Title".to_string(),
        }
    }

    /// Attach the transport to serve on.
    ///
    /// Until this is called, `service` is a no-op.
    pub fn bind(&mut self, listener: L) {
        self.listener = Some(listener);
    }

    /// Set the page title, used verbatim in every subsequent render.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Accept and process at most one pending connection.
    pub fn service(&mut self) -> Result<ServiceOutcome, Error> {
        let Some(listener) = self.listener.as_mut() else {
            return Ok(ServiceOutcome::Idle);
        };
        let Some(mut connection) = listener.accept()? else {
            return Ok(ServiceOutcome::Idle);
        };

        match scanner::scan(&mut connection)? {
            ScanOutcome::Submission(line) => self.handle_submission(connection, &line),
            ScanOutcome::HeadersDone => self.handle_render(connection),
            ScanOutcome::Disconnected => Ok(ServiceOutcome::Idle),
        }
    }

    fn handle_render(&mut self, mut connection: L::Connection) -> Result<ServiceOutcome, Error> {
        let page = render::render_page(&mut self.handler, &mut self.registry, &self.title);
        connection.write_all(&page)?;
        connection.close();

        event!(
            Level::DEBUG,
            fields = self.registry.field_count(),
            "form page served"
        );
        Ok(ServiceOutcome::PageServed)
    }

    fn handle_submission(
        &mut self,
        mut connection: L::Connection,
        line: &str,
    ) -> Result<ServiceOutcome, Error> {
        let Some(query) = query::extract_query(line) else {
            // Malformed submission, drop it without a response
            event!(Level::DEBUG, "submission request without query, dropped");
            connection.close();
            return Ok(ServiceOutcome::Idle);
        };

        // Values correlate to fields by position alone; the x<tag> key is
        // client-side bookkeeping and is discarded here
        let mut ordinal = 0;
        for chunk in query.split(query::PARAM_SEPARATOR) {
            if ordinal >= self.registry.field_count() {
                break;
            }

            let Some((_key, raw)) = chunk.split_once('=') else {
                continue;
            };

            let value = query::decode_value(raw);
            ordinal += 1;
            self.handler.receive_value(ordinal, &value);
        }

        connection.write_all(
            "HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\n\r\nSaved; restarting...\r\n",
        )?;
        connection.close();

        event!(Level::INFO, fields = ordinal, "submission dispatched");
        Ok(ServiceOutcome::SubmissionComplete)
    }
}
