//! # Adapters
//!
//! Implementations of the outbound ports. The in-memory store is the
//! reference adapter; a deployment embeds the core against the execution
//! environment's real partitioned store instead.

pub mod memory_store;

pub use memory_store::InMemoryStore;
