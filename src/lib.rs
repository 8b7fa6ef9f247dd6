//! Crime society simulation library
//!
//! Re-exports modules for use by binaries and tools.

pub mod simulation;
