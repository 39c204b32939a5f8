//! Order intents and content hashing
//!
//! Orders are immutable, signed off-ledger, and never stored by the engine;
//! only their content hash and cumulative fill persist. The hash is
//! domain-separated so orders signed for one engine deployment cannot be
//! replayed against another.

use crate::asset::Asset;
use crate::ids::{Address, OrderHash};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Reserved salt for ephemeral one-shot orders.
///
/// A salt-0 order participates in matching but never accumulates a fill
/// record and can never be individually cancelled.
pub const EPHEMERAL_SALT: u64 = 0;

/// Hash preamble shared by every deployment; the per-deployment domain tag
/// is appended after it.
const HASH_SCHEMA_PREFIX: &[u8] = b"venue-order/v1:";

/// Closed set of order kinds.
///
/// The kind affects validation context in the conditional-order layer
/// outside this core; the fill arithmetic is kind-agnostic. Each kind has a
/// stable 4-byte wire discriminator that feeds the content hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderKind {
    /// Plain market order
    Market,
    /// Stop-loss-limit conditional order
    StopLossLimit,
    /// Take-profit-limit conditional order
    TakeProfitLimit,
}

impl OrderKind {
    /// Stable 4-byte wire discriminator.
    pub const fn tag(&self) -> [u8; 4] {
        match self {
            OrderKind::Market => *b"MKT0",
            OrderKind::StopLossLimit => *b"SLL0",
            OrderKind::TakeProfitLimit => *b"TPL0",
        }
    }
}

/// A signed order intent.
///
/// `trader` is the expected signer unless it is `Address::ZERO`, the
/// wildcard sentinel accepting any signer. `trigger_price` and `is_short`
/// are advisory to downstream collaborators and do not influence matching,
/// but both feed the content hash.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Order {
    pub kind: OrderKind,
    pub trader: Address,
    /// Absolute expiry instant (Unix seconds); invalid strictly after it.
    pub deadline: i64,
    pub make_asset: Asset,
    pub take_asset: Asset,
    /// Per-trader monotonic nonce; 0 is the ephemeral sentinel.
    pub salt: u64,
    pub trigger_price: u128,
    pub is_short: bool,
}

impl Order {
    /// Create an order with advisory fields zeroed.
    pub fn new(
        kind: OrderKind,
        trader: Address,
        deadline: i64,
        make_asset: Asset,
        take_asset: Asset,
        salt: u64,
    ) -> Self {
        Self {
            kind,
            trader,
            deadline,
            make_asset,
            take_asset,
            salt,
            trigger_price: 0,
            is_short: false,
        }
    }

    /// Convenience constructor for a plain market order.
    pub fn market(trader: Address, deadline: i64, make_asset: Asset, take_asset: Asset, salt: u64) -> Self {
        Self::new(OrderKind::Market, trader, deadline, make_asset, take_asset, salt)
    }

    /// Whether this order uses the reserved ephemeral salt.
    pub fn is_ephemeral(&self) -> bool {
        self.salt == EPHEMERAL_SALT
    }

    /// Domain-separated content hash over every order field.
    ///
    /// Deterministic fixed-width big-endian encoding: the hash doubles as
    /// the fill-ledger key, so no two distinct orders may collide and no
    /// field may be ambiguous. The `domain` tag binds the hash to one
    /// engine deployment.
    pub fn content_hash(&self, domain: &str) -> OrderHash {
        let mut hasher = Sha256::new();
        hasher.update(HASH_SCHEMA_PREFIX);
        hasher.update(domain.as_bytes());
        hasher.update([0u8]); // terminator so domain bytes cannot bleed into fields
        hasher.update(self.kind.tag());
        hasher.update(self.trader.as_bytes());
        hasher.update(self.deadline.to_be_bytes());
        hasher.update(self.make_asset.token.as_bytes());
        hasher.update(self.make_asset.value.to_be_bytes());
        hasher.update(self.take_asset.token.as_bytes());
        hasher.update(self.take_asset.value.to_be_bytes());
        hasher.update(self.salt.to_be_bytes());
        hasher.update(self.trigger_price.to_be_bytes());
        hasher.update([self.is_short as u8]);
        OrderHash::from_bytes(hasher.finalize().into())
    }
}
