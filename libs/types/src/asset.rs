//! Asset — a token/amount pair offered or demanded by an order

use crate::ids::Address;
use serde::{Deserialize, Serialize};

/// A quantity of a specific token.
///
/// An order's `make_asset` is what the trader offers; its `take_asset` is
/// what the trader requires in return. Quantities are plain integers in the
/// token's smallest unit; all fill arithmetic is integer-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Asset {
    pub token: Address,
    pub value: u128,
}

impl Asset {
    pub fn new(token: Address, value: u128) -> Self {
        Self { token, value }
    }

    /// Two assets are compatible when they denominate the same token.
    pub fn is_compatible(&self, other: &Asset) -> bool {
        self.token == other.token
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(n: u8) -> Address {
        Address::from_bytes([n; 20])
    }

    #[test]
    fn test_compatible_same_token() {
        let a = Asset::new(token(1), 100);
        let b = Asset::new(token(1), 5);
        assert!(a.is_compatible(&b));
    }

    #[test]
    fn test_incompatible_different_tokens() {
        let a = Asset::new(token(1), 100);
        let b = Asset::new(token(2), 100);
        assert!(!a.is_compatible(&b));
    }

    #[test]
    fn test_asset_serialization() {
        let a = Asset::new(token(3), u128::MAX);
        let json = serde_json::to_string(&a).unwrap();
        let deser: Asset = serde_json::from_str(&json).unwrap();
        assert_eq!(a, deser);
    }
}
