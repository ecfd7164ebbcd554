//! Minimal file server used by the HTTP dictionary sources.
//!
//! `GET /` returns the whole TSV file. `POST /` returns only the lines whose
//! first column matches one of the whitespace-separated ids in the body,
//! which is how cache dictionaries ask for specific keys.

pub mod args;
mod error;
mod server;

pub use args::{Scheme, ServerArgs};
pub use error::ServerError;
pub use server::{filter_lines, router, serve, TSV_CONTENT_TYPE};
