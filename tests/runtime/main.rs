//! Integration tests for Layer 4: Runtime
//!
//! Tests for discovery, the read-then-apply session, and snapshots.

mod session;
mod snapshot;
