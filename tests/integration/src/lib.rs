//! End-to-end test support for the Adapt client
//!
//! Provides a scriptable mock harmony gateway and payload builders used by
//! the tests in `tests/`.

pub mod fixtures;
pub mod helpers;
