//! Fair-rotation assignment engine.
//!
//! # Responsibility
//! - Derive the rotation cursor from completion history.
//! - Compute today's assignment list from an `AppState` snapshot.
//!
//! # Invariants
//! - Engine functions are pure: no I/O, no clock access, no mutation.
//! - The cursor is never stored; it is rebuilt from the history tail.

pub mod engine;
