//! Types library for the leveraged trading venue
//!
//! This library provides the core type definitions shared between the
//! matching core and its collaborators (vault, positioning, risk),
//! ensuring type safety and deterministic behavior.
//!
//! # Modules
//! - `ids`: Opaque identifiers (Address, OrderHash)
//! - `asset`: Token/amount pairs offered and demanded by orders
//! - `order`: Signed order intents and content hashing
//! - `errors`: Error taxonomy

pub mod asset;
pub mod errors;
pub mod ids;
pub mod order;

// Library version constant
pub const LIB_VERSION: &str = "1.0.0";

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::asset::*;
    pub use crate::errors::*;
    pub use crate::ids::*;
    pub use crate::order::*;
}
