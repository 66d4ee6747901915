//! Transport-agnostic endpoint layer.
//!
//! Each inbound operation is decoded by the transport into a [`UserRequest`]
//! and dispatched through [`Endpoints::handle`], which always answers with a
//! response [`Envelope`](common::Envelope).

mod handler;
mod requests;

pub use handler::Endpoints;
pub use requests::{
    CreateRequest, DeleteRequest, GetAllRequest, GetRequest, UpdateRequest, UserRequest,
};
