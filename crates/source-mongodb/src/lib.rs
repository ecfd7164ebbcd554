//! MongoDB dictionary source.
//!
//! Two connection forms share one adapter: discrete host/port/credential
//! parameters, and a single connection URI. The URI form exists only to
//! check that both are read the same way, so it pairs with the `flat`
//! layout alone.

mod convert;
mod error;
mod source;

pub use convert::ValueConverter;
pub use error::MongoSourceError;
pub use source::{ConnectionForm, MongoSource};
