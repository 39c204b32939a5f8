//! Match engine — validation gate, orchestration, and persistent state
//!
//! Single-threaded and synchronous: each match executes to completion
//! against a consistent snapshot. Validation runs fully before any
//! mutation, so a failed match leaves no partial state; the batch forms
//! retain per-element progress and nothing else. The engine computes and
//! records; it never moves value itself. Settlement amounts are returned
//! to the caller and emitted as events for the vault and positioning
//! collaborators.

use crate::calculator;
use crate::events::{AllOrdersCancelled, EngineEvent, OrderCancelled, OrdersMatched};
use crate::fills::FillLedger;
use crate::security::{ExecutorRegistry, ReentrancyGuard};
use crate::signing::{Ed25519Recovery, SignerRecovery};
use crate::window::{TradeSizeTracker, DEFAULT_WINDOW_SECONDS};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use types::asset::Asset;
use types::errors::{CancelError, MatchError, SignatureError};
use types::ids::{Address, OrderHash};
use types::order::Order;

/// Default cap on pairs per batch call.
pub const DEFAULT_MAX_BATCH: usize = 64;

/// Engine configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchEngineConfig {
    /// Size-tracker window length in seconds.
    pub window_seconds: i64,
    /// Maximum pairs accepted per batch call.
    pub max_batch: usize,
    /// Domain tag mixed into every order hash for this deployment.
    pub domain: String,
}

impl Default for MatchEngineConfig {
    fn default() -> Self {
        Self {
            window_seconds: DEFAULT_WINDOW_SECONDS,
            max_batch: DEFAULT_MAX_BATCH,
            domain: "venue-matching/1".to_string(),
        }
    }
}

/// One order pair plus signatures, as submitted in a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchPair {
    pub left: Order,
    pub right: Order,
    pub left_signature: Vec<u8>,
    pub right_signature: Vec<u8>,
}

/// Settlement instruction for one successful match.
///
/// `left_asset` is what the left order pays out (and the right order
/// receives); `right_asset` the converse. Value transfer is the vault's
/// job, not the engine's.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub left_fill: u128,
    pub right_fill: u128,
    pub left_asset: Asset,
    pub right_asset: Asset,
}

/// The order-matching engine.
#[derive(Debug)]
pub struct MatchEngine {
    config: MatchEngineConfig,
    fills: FillLedger,
    epochs: HashMap<Address, u64>,
    tracker: TradeSizeTracker,
    executors: ExecutorRegistry,
    guard: ReentrancyGuard,
    recovery: Box<dyn SignerRecovery>,
    events: Vec<EngineEvent>,
}

impl MatchEngine {
    pub fn new(admin: Address) -> Self {
        Self::with_config(admin, MatchEngineConfig::default(), Box::new(Ed25519Recovery))
    }

    pub fn with_config(
        admin: Address,
        config: MatchEngineConfig,
        recovery: Box<dyn SignerRecovery>,
    ) -> Self {
        let tracker = TradeSizeTracker::new(config.window_seconds);
        Self {
            config,
            fills: FillLedger::new(),
            epochs: HashMap::new(),
            tracker,
            executors: ExecutorRegistry::new(admin),
            guard: ReentrancyGuard::new(),
            recovery,
            events: Vec::new(),
        }
    }

    // --- matching ---

    /// Match a validated pair of signed orders at time `now`.
    ///
    /// Executor-only. All checks run before any mutation; on success the
    /// fill ledger and size tracker are updated atomically with the
    /// decision and an `OrdersMatched` event is appended.
    pub fn match_orders(
        &mut self,
        caller: Address,
        left: &Order,
        right: &Order,
        left_signature: &[u8],
        right_signature: &[u8],
        now: i64,
    ) -> Result<MatchResult, MatchError> {
        if !self.executors.is_executor(&caller) {
            return Err(MatchError::Unauthorized);
        }
        if !self.guard.acquire() {
            return Err(MatchError::Reentrancy);
        }
        let result = self.execute_match(left, right, left_signature, right_signature, now);
        self.guard.release();
        result
    }

    /// Batch form of [`match_orders`](Self::match_orders).
    ///
    /// Pairs fail independently; one rejection does not affect the rest.
    /// The batch length itself is capped and checked up front.
    pub fn match_orders_batch(
        &mut self,
        caller: Address,
        pairs: &[MatchPair],
        now: i64,
    ) -> Result<Vec<Result<MatchResult, MatchError>>, MatchError> {
        if !self.executors.is_executor(&caller) {
            return Err(MatchError::Unauthorized);
        }
        if pairs.len() > self.config.max_batch {
            return Err(MatchError::BatchTooLarge {
                len: pairs.len(),
                max: self.config.max_batch,
            });
        }
        let mut results = Vec::with_capacity(pairs.len());
        for pair in pairs {
            if !self.guard.acquire() {
                results.push(Err(MatchError::Reentrancy));
                continue;
            }
            let result = self.execute_match(
                &pair.left,
                &pair.right,
                &pair.left_signature,
                &pair.right_signature,
                now,
            );
            self.guard.release();
            results.push(result);
        }
        Ok(results)
    }

    fn execute_match(
        &mut self,
        left: &Order,
        right: &Order,
        left_signature: &[u8],
        right_signature: &[u8],
        now: i64,
    ) -> Result<MatchResult, MatchError> {
        let left_hash = left.content_hash(&self.config.domain);
        let right_hash = right.content_hash(&self.config.domain);

        self.validate_order(left, &left_hash, left_signature, now)?;
        self.validate_order(right, &right_hash, right_signature, now)?;

        if left.trader == right.trader {
            return Err(MatchError::SelfTrade);
        }
        if !left.make_asset.is_compatible(&right.take_asset)
            || !left.take_asset.is_compatible(&right.make_asset)
        {
            return Err(MatchError::AssetMismatch);
        }

        // Ephemeral orders are never recorded, so their remaining is the
        // full take value either way.
        let left_remaining = self.fills.remaining(&left_hash, left.take_asset.value);
        let right_remaining = self.fills.remaining(&right_hash, right.take_asset.value);

        let amounts = calculator::fill_order(left, right, left_remaining, right_remaining)?;

        // Past this point nothing fails; mutations apply together.
        if !left.is_ephemeral() {
            self.fills.record(&left_hash, amounts.right, left.take_asset.value);
        }
        if !right.is_ephemeral() {
            self.fills.record(&right_hash, amounts.left, right.take_asset.value);
        }

        let instrument = left.make_asset.token;
        self.tracker
            .record(instrument, amounts.left.max(amounts.right), now);

        self.events.push(EngineEvent::OrdersMatched(OrdersMatched {
            left_trader: left.trader,
            right_trader: right.trader,
            left_salt: left.salt,
            right_salt: right.salt,
            left_fill: amounts.left,
            right_fill: amounts.right,
            instrument,
            executed_at: now,
        }));

        Ok(MatchResult {
            left_fill: amounts.left,
            right_fill: amounts.right,
            left_asset: Asset::new(left.make_asset.token, amounts.left),
            right_asset: Asset::new(right.make_asset.token, amounts.right),
        })
    }

    /// Deadline, epoch-floor, and signature checks for one order.
    ///
    /// A zero trader address is the wildcard sentinel: any signer is
    /// accepted and recovery is skipped entirely.
    fn validate_order(
        &self,
        order: &Order,
        hash: &OrderHash,
        signature: &[u8],
        now: i64,
    ) -> Result<(), MatchError> {
        if now > order.deadline {
            return Err(MatchError::OrderExpired {
                deadline: order.deadline,
                now,
            });
        }
        if !order.is_ephemeral() {
            let floor = self.epoch(&order.trader);
            if order.salt < floor {
                return Err(MatchError::BelowEpochFloor {
                    salt: order.salt,
                    floor,
                });
            }
        }
        if !order.trader.is_zero() {
            let recovered = self.recovery.recover(hash, signature)?;
            if recovered != order.trader {
                return Err(MatchError::InvalidSignature(
                    SignatureError::VerificationFailed,
                ));
            }
        }
        Ok(())
    }

    // --- cancellation ---

    /// Void a single order by marking it fully filled. Trader-only.
    pub fn cancel_order(&mut self, caller: Address, order: &Order) -> Result<OrderHash, CancelError> {
        if caller != order.trader {
            return Err(CancelError::NotOrderTrader);
        }
        if order.is_ephemeral() {
            return Err(CancelError::EphemeralSalt);
        }
        let floor = self.epoch(&order.trader);
        if order.salt < floor {
            return Err(CancelError::SaltTooLow {
                salt: order.salt,
                floor,
            });
        }
        let hash = order.content_hash(&self.config.domain);
        self.fills.mark_filled(&hash, order.take_asset.value);
        self.events.push(EngineEvent::OrderCancelled(OrderCancelled {
            trader: order.trader,
            salt: order.salt,
            order_hash: hash,
        }));
        Ok(hash)
    }

    /// Batch form of [`cancel_order`](Self::cancel_order), with
    /// independent per-element success.
    pub fn cancel_orders(
        &mut self,
        caller: Address,
        orders: &[Order],
    ) -> Vec<Result<OrderHash, CancelError>> {
        orders
            .iter()
            .map(|order| self.cancel_order(caller, order))
            .collect()
    }

    /// Raise the caller's salt floor, voiding every order below it in one
    /// step, including orders never seen by the engine. Monotonic only.
    pub fn cancel_all_orders(&mut self, caller: Address, new_floor: u64) -> Result<(), CancelError> {
        let current = self.epoch(&caller);
        if new_floor <= current {
            return Err(CancelError::FloorNotRaised {
                provided: new_floor,
                current,
            });
        }
        self.epochs.insert(caller, new_floor);
        self.events
            .push(EngineEvent::AllOrdersCancelled(AllOrdersCancelled {
                trader: caller,
                min_salt: new_floor,
            }));
        Ok(())
    }

    // --- administration ---

    pub fn grant_executor(&mut self, caller: Address, executor: Address) -> Result<(), MatchError> {
        self.executors.grant(caller, executor)
    }

    pub fn revoke_executor(&mut self, caller: Address, executor: &Address) -> Result<(), MatchError> {
        self.executors.revoke(caller, executor)
    }

    pub fn transfer_admin(&mut self, caller: Address, new_admin: Address) -> Result<(), MatchError> {
        self.executors.transfer_admin(caller, new_admin)
    }

    pub fn is_executor(&self, caller: &Address) -> bool {
        self.executors.is_executor(caller)
    }

    /// Change the size-tracker window length. Admin-only; applies to
    /// subsequent roll decisions, never retroactively.
    pub fn update_order_size_interval(
        &mut self,
        caller: Address,
        seconds: i64,
    ) -> Result<(), MatchError> {
        if !self.executors.is_admin(&caller) {
            return Err(MatchError::Unauthorized);
        }
        if seconds <= 0 {
            return Err(MatchError::InvalidWindowLength { seconds });
        }
        self.config.window_seconds = seconds;
        self.tracker.set_window_seconds(seconds);
        Ok(())
    }

    // --- queries ---

    /// Largest single fill for an instrument within the trailing window.
    pub fn max_order_size_over_window(&self, instrument: &Address, now: i64) -> u128 {
        self.tracker.max_over_window(instrument, now)
    }

    /// A trader's current salt floor (zero if never raised).
    pub fn epoch(&self, trader: &Address) -> u64 {
        self.epochs.get(trader).copied().unwrap_or(0)
    }

    /// Cumulative take-side fill recorded against an order.
    pub fn filled(&self, order: &Order) -> u128 {
        self.fills.filled(&order.content_hash(&self.config.domain))
    }

    /// Remaining take-side capacity of an order.
    pub fn remaining(&self, order: &Order) -> u128 {
        self.fills
            .remaining(&order.content_hash(&self.config.domain), order.take_asset.value)
    }

    /// Content hash of an order under this deployment's domain tag.
    pub fn order_hash(&self, order: &Order) -> OrderHash {
        order.content_hash(&self.config.domain)
    }

    pub fn events(&self) -> &[EngineEvent] {
        &self.events
    }

    /// Hand the accumulated events to the settlement/indexing layer.
    pub fn drain_events(&mut self) -> Vec<EngineEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn config(&self) -> &MatchEngineConfig {
        &self.config
    }
}
