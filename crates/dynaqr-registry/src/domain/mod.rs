//! # Domain Layer
//!
//! Pure types and rules of the registry: value objects, the key codec, the
//! entity projections, the call envelope, the write-set, and the invariant
//! audit. Nothing here touches a store; the transition engine does that.

pub mod call;
pub mod delta;
pub mod entities;
pub mod invariants;
pub mod keys;
pub mod value_objects;
