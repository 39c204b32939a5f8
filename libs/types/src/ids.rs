//! Opaque identifier types for the matching core
//!
//! Accounts and tokens are identified by 20-byte addresses; orders are
//! identified by the 32-byte content hash of their fields. Both are plain
//! byte newtypes with hex display, so they can be used as map keys and
//! travel over the wire unchanged.

use serde::{Deserialize, Serialize};
use std::fmt;

/// 20-byte account or token address.
///
/// The all-zero address is reserved as the wildcard-signer sentinel: an
/// order attributed to `Address::ZERO` accepts any signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address([u8; 20]);

impl Address {
    /// The wildcard / sentinel address.
    pub const ZERO: Address = Address([0u8; 20]);

    /// Create an address from raw bytes.
    pub const fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Borrow the raw bytes.
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Check for the wildcard sentinel.
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 20]
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

/// 32-byte order content hash.
///
/// Serves both as the fill-ledger storage key and as the message digest
/// that the order's trader must have signed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderHash([u8; 32]);

impl OrderHash {
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for OrderHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_zero_sentinel() {
        assert!(Address::ZERO.is_zero());
        assert!(!Address::from_bytes([1u8; 20]).is_zero());
    }

    #[test]
    fn test_address_display_hex() {
        let addr = Address::from_bytes([0xab; 20]);
        assert_eq!(addr.to_string(), format!("0x{}", "ab".repeat(20)));
    }

    #[test]
    fn test_address_serialization() {
        let addr = Address::from_bytes([7u8; 20]);
        let json = serde_json::to_string(&addr).unwrap();
        let deser: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(addr, deser);
    }

    #[test]
    fn test_order_hash_display_hex() {
        let hash = OrderHash::from_bytes([0x01; 32]);
        assert!(hash.to_string().starts_with("0x0101"));
    }

    #[test]
    fn test_order_hash_usable_as_map_key() {
        use std::collections::HashMap;
        let mut map = HashMap::new();
        map.insert(OrderHash::from_bytes([2u8; 32]), 10u128);
        assert_eq!(map.get(&OrderHash::from_bytes([2u8; 32])), Some(&10));
    }
}
