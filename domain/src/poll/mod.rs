//! Poll subdomain: the aggregate a schedule lifecycle runs against.

mod entities;

pub use entities::{InvalidPollName, Poll};
