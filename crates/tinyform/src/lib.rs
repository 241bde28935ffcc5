//! A tiny polled web configuration form server.
//!
//! Serves a generated HTML settings page over a minimal HTTP responder, and
//! feeds submitted values back to the embedding application one value per
//! declared field, in declaration order.
//!
//! The embedding application provides a [`FormHandler`] that declares the
//! form's fields on every render and receives the decoded values on
//! submission, and a transport implementing [`Listener`]. Driving
//! [`FormServer::service`] from a run loop does the rest.

mod fields;
mod query;
mod registry;
mod render;
mod scanner;
mod server;
mod transport;

pub use self::{
    fields::{OptionsTruncated, MAX_FIELD_OPTIONS},
    query::{decode_value, extract_query, percent_decode, PARAM_SEPARATOR},
    registry::{FieldRegistry, FIELD_TAG_BASE},
    render::{render_page, PageBuilder},
    server::{FormHandler, FormServer, ServiceOutcome},
    transport::{Connection, Listener},
};
