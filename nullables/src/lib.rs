//! Nullable infrastructure for deterministic testing.
//!
//! The ledger takes the current time as an explicit input on every
//! time-dependent call. Tests obtain that input from a [`NullClock`], which
//! only advances when told to.

pub mod clock;

pub use clock::NullClock;
