//! # Ports
//!
//! Hexagonal boundary of the registry core: `inbound` is what callers drive,
//! `outbound` is what the core depends on. Adapters implement the outbound
//! side; the service implements the inbound side.

pub mod inbound;
pub mod outbound;

pub use inbound::RegistryApi;
pub use outbound::StateStore;
