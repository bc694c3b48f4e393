//! Configuration subdomain: per-member notification preferences.

mod entities;

pub use entities::Configuration;
