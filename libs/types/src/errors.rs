//! Error taxonomy for the matching core
//!
//! Every failure is local and synchronous; nothing is retried inside the
//! engine and no error leaves partial state mutated.

use thiserror::Error;

/// Signature recovery errors.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureError {
    #[error("Invalid signature length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("Malformed verifying key")]
    MalformedKey,

    #[error("Signature verification failed")]
    VerificationFailed,
}

/// Matching errors, including the authorization gate and admin surface.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatchError {
    #[error("Unauthorized: caller lacks the match-submission capability")]
    Unauthorized,

    #[error("Reentrancy detected")]
    Reentrancy,

    #[error("Order expired: deadline {deadline}, now {now}")]
    OrderExpired { deadline: i64, now: i64 },

    #[error("Order cancelled or below epoch floor: salt {salt}, floor {floor}")]
    BelowEpochFloor { salt: u64, floor: u64 },

    #[error("Invalid signature: {0}")]
    InvalidSignature(#[from] SignatureError),

    #[error("Self-trade rejected: both orders share a trader")]
    SelfTrade,

    #[error("Assets don't match")]
    AssetMismatch,

    #[error("Nothing to fill")]
    NothingToFill,

    #[error("Unable to fill: price limits are incompatible at this size")]
    PriceIncompatible,

    #[error("Arithmetic overflow in fill calculation")]
    ArithmeticOverflow,

    #[error("Batch too large: {len} pairs, maximum {max}")]
    BatchTooLarge { len: usize, max: usize },

    #[error("Window length must be positive, got {seconds}")]
    InvalidWindowLength { seconds: i64 },
}

/// Cancellation errors.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelError {
    #[error("Only the order's trader may cancel it")]
    NotOrderTrader,

    #[error("Salt 0 cannot be cancelled")]
    EphemeralSalt,

    #[error("Salt too low: {salt} is below epoch floor {floor}")]
    SaltTooLow { salt: u64, floor: u64 },

    #[error("New epoch floor {provided} does not exceed current floor {current}")]
    FloorNotRaised { provided: u64, current: u64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_error_display() {
        let err = MatchError::OrderExpired {
            deadline: 1000,
            now: 1001,
        };
        assert!(err.to_string().contains("1000"));
        assert!(err.to_string().contains("1001"));
    }

    #[test]
    fn test_match_error_from_signature_error() {
        let err: MatchError = SignatureError::VerificationFailed.into();
        assert!(matches!(err, MatchError::InvalidSignature(_)));
    }

    #[test]
    fn test_cancel_error_display() {
        let err = CancelError::SaltTooLow { salt: 3, floor: 7 };
        assert_eq!(err.to_string(), "Salt too low: 3 is below epoch floor 7");
    }

    #[test]
    fn test_batch_too_large_display() {
        let err = MatchError::BatchTooLarge { len: 100, max: 64 };
        assert!(err.to_string().contains("100"));
        assert!(err.to_string().contains("64"));
    }
}
