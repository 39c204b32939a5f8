//! Fill ledger — cumulative take-side fills keyed by order content hash
//!
//! Orders themselves are never stored; the ledger holds only how much of
//! each order's `take_asset.value` has already executed. The record
//! outlives any single match and accumulates across independent calls.
//! Exceeding an order's take value is ledger corruption (a programming
//! error), not a user error, and panics.

use std::collections::HashMap;
use types::ids::OrderHash;

/// Persistent partial-fill accounting.
#[derive(Debug, Clone, Default)]
pub struct FillLedger {
    filled: HashMap<OrderHash, u128>,
}

impl FillLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cumulative take-side amount executed against an order.
    pub fn filled(&self, hash: &OrderHash) -> u128 {
        self.filled.get(hash).copied().unwrap_or(0)
    }

    /// Remaining take-side capacity of an order.
    ///
    /// # Panics
    /// Panics if the recorded fill exceeds the order's take value.
    pub fn remaining(&self, hash: &OrderHash, take_value: u128) -> u128 {
        let filled = self.filled(hash);
        assert!(
            filled <= take_value,
            "fill ledger exceeds order take value"
        );
        take_value - filled
    }

    /// Accumulate a fill against an order.
    ///
    /// # Panics
    /// Panics if the fill would exceed the order's take value.
    pub fn record(&mut self, hash: &OrderHash, amount: u128, take_value: u128) {
        let entry = self.filled.entry(*hash).or_insert(0);
        let new_filled = entry
            .checked_add(amount)
            .expect("fill counter overflow");
        assert!(
            new_filled <= take_value,
            "fill would exceed order take value"
        );
        *entry = new_filled;
    }

    /// Mark an order fully filled — the per-order cancellation primitive.
    ///
    /// Idempotent: cancelling an already-filled order leaves it filled.
    pub fn mark_filled(&mut self, hash: &OrderHash, take_value: u128) {
        self.filled.insert(*hash, take_value);
    }

    /// Number of orders with a recorded fill.
    pub fn tracked(&self) -> usize {
        self.filled.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hash(n: u8) -> OrderHash {
        OrderHash::from_bytes([n; 32])
    }

    #[test]
    fn test_unseen_order_has_zero_fill() {
        let ledger = FillLedger::new();
        assert_eq!(ledger.filled(&hash(1)), 0);
        assert_eq!(ledger.remaining(&hash(1), 100), 100);
    }

    #[test]
    fn test_record_accumulates() {
        let mut ledger = FillLedger::new();
        ledger.record(&hash(1), 30, 100);
        ledger.record(&hash(1), 70, 100);
        assert_eq!(ledger.filled(&hash(1)), 100);
        assert_eq!(ledger.remaining(&hash(1), 100), 0);
    }

    #[test]
    #[should_panic(expected = "fill would exceed order take value")]
    fn test_record_overfill_panics() {
        let mut ledger = FillLedger::new();
        ledger.record(&hash(1), 60, 100);
        ledger.record(&hash(1), 50, 100);
    }

    #[test]
    fn test_mark_filled_exhausts_order() {
        let mut ledger = FillLedger::new();
        ledger.record(&hash(1), 10, 100);
        ledger.mark_filled(&hash(1), 100);
        assert_eq!(ledger.remaining(&hash(1), 100), 0);
        // idempotent
        ledger.mark_filled(&hash(1), 100);
        assert_eq!(ledger.remaining(&hash(1), 100), 0);
    }

    #[test]
    fn test_independent_orders() {
        let mut ledger = FillLedger::new();
        ledger.record(&hash(1), 10, 100);
        ledger.record(&hash(2), 20, 50);
        assert_eq!(ledger.filled(&hash(1)), 10);
        assert_eq!(ledger.filled(&hash(2)), 20);
        assert_eq!(ledger.tracked(), 2);
    }
}
