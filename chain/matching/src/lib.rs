//! Order Matching Core for the Leveraged Trading Venue
//!
//! Given two independently signed counter-orders, the engine decides how
//! much of each order's stated quantity to execute and at what implied
//! ratio, never worse than either signer's declared limit. It keeps the
//! persistent bookkeeping that makes repeated independent calls safe:
//! cumulative fills keyed by order content hash, per-trader cancellation
//! epochs, and a rolling maximum-trade-size window per instrument.
//!
//! The engine computes and records; it never moves value. Settlement
//! amounts are returned to the executor for the vault/positioning
//! collaborators to act on.
//!
//! # Modules
//! - `engine`: Orchestrator — authorization gate, match/cancel operations, admin surface
//! - `calculator`: Pure asymmetric cross-rounding fill arithmetic
//! - `fills`: Cumulative fill ledger keyed by order hash
//! - `window`: Two-bucket rolling maximum-trade-size tracker
//! - `signing`: Signer recovery capability (ed25519-backed)
//! - `security`: Reentrancy guard and executor registry
//! - `events`: Append-only audit event log types

pub mod calculator;
pub mod engine;
pub mod events;
pub mod fills;
pub mod security;
pub mod signing;
pub mod window;

pub use engine::{MatchEngine, MatchEngineConfig, MatchPair, MatchResult};

/// Engine ABI version — frozen after release
pub const ENGINE_ABI_VERSION: &str = "1.0.0";
