//! Engine events
//!
//! Every state-changing operation appends an event; the accumulated log is
//! the engine's audit trail and is drained by whatever settlement or
//! indexing layer sits on top.

use serde::{Deserialize, Serialize};
use types::ids::{Address, OrderHash};

/// A pair of orders cleared against each other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrdersMatched {
    pub left_trader: Address,
    pub right_trader: Address,
    pub left_salt: u64,
    pub right_salt: u64,
    /// Quantity of the left order's make asset that changed hands.
    pub left_fill: u128,
    /// Quantity of the right order's make asset that changed hands.
    pub right_fill: u128,
    pub instrument: Address,
    pub executed_at: i64,
}

/// A single order voided by its trader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderCancelled {
    pub trader: Address,
    pub salt: u64,
    pub order_hash: OrderHash,
}

/// A trader raised their salt floor, voiding every order below it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllOrdersCancelled {
    pub trader: Address,
    pub min_salt: u64,
}

/// Union of everything the engine emits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EngineEvent {
    OrdersMatched(OrdersMatched),
    OrderCancelled(OrderCancelled),
    AllOrdersCancelled(AllOrdersCancelled),
}
