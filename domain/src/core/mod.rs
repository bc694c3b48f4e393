//! Core domain concepts shared across all subdomains.
//!
//! - [`ids`]: UUID-backed entity identifiers

pub mod ids;
