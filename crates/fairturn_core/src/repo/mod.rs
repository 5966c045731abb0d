//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the key-value persistence contract the core depends on.
//! - Encode/decode the `AppState` snapshot into six independent slots.
//!
//! # Invariants
//! - Loading never fails: unreadable slots fall back to their defaults.
//! - Saving writes every slot of the snapshot together.

pub mod kv_store;
pub mod state_repo;
