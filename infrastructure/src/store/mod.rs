//! Store adapters implementing the application's persistence ports.
//!
//! Provides [`InMemoryStore`], a process-local adapter backing every store
//! port with hash maps. It honors the ports' single-row contract: each map
//! is locked on its own, one at a time, and nothing spans two tables
//! atomically.

mod memory;

pub use memory::InMemoryStore;
