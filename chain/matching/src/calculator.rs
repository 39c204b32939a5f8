//! Fill calculation — the asymmetric cross-rounding core
//!
//! Pure arithmetic over two orders' remaining capacities and declared
//! make/take ratios. All quantities are integers; every division floors.
//! Flooring can legitimately collapse a trade to zero, which is detected
//! and rejected rather than silently executed, and a floored quotient
//! whose loss is too large relative to the exact product is rejected so
//! that neither signer executes meaningfully worse than their limit.
//!
//! Conventions: `left_fill` is the quantity of the left order's make asset
//! that changes hands (equal to what the right order receives), and
//! `right_fill` is the right order's make quantity (what the left order
//! receives). Fill records accumulate the take side, so a successful match
//! credits `right_fill` to the left order and `left_fill` to the right.

use types::errors::MatchError;
use types::order::Order;

/// Clearing amounts of a successful match, in each order's make units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FillAmounts {
    pub left: u128,
    pub right: u128,
}

/// `floor(value * numerator / denominator)` with overflow detection.
///
/// A nonzero floored result whose rounding loss is 0.1% or more of the
/// exact product is rejected: past that threshold the constrained signer
/// would be executing measurably below their declared ratio.
fn safe_partial_floor(value: u128, numerator: u128, denominator: u128) -> Result<u128, MatchError> {
    if denominator == 0 {
        return Err(MatchError::NothingToFill);
    }
    let product = value
        .checked_mul(numerator)
        .ok_or(MatchError::ArithmeticOverflow)?;
    let result = product / denominator;
    if result == 0 {
        // Collapsed to zero; the caller surfaces NothingToFill.
        return Ok(0);
    }
    let remainder = product % denominator;
    if remainder != 0 {
        let scaled = remainder
            .checked_mul(1000)
            .ok_or(MatchError::ArithmeticOverflow)?;
        if scaled >= product {
            return Err(MatchError::PriceIncompatible);
        }
    }
    Ok(result)
}

/// Compute the clearing amounts for a validated order pair.
///
/// `left_take_remaining` / `right_take_remaining` are each order's
/// remaining take-side capacity per the fill ledger (an ephemeral salt-0
/// order is never recorded, so its remaining equals its full take value).
///
/// Branches:
/// 1. Right ephemeral: right's remaining make quantity is authoritative;
///    the left order pays for it at its own declared ratio.
/// 2. Left ephemeral: symmetric with roles swapped.
/// 3. Both persistent: the smaller side binds. If the right order's
///    remaining demand exceeds what the left order can still make, the
///    left order is exhausted and the right order's own ratio is
///    cross-checked against what it would demand for that quantity;
///    otherwise the right order's demand is exhausted and the quantity it
///    owes is derived through the left order's ratio.
pub fn fill_order(
    left: &Order,
    right: &Order,
    left_take_remaining: u128,
    right_take_remaining: u128,
) -> Result<FillAmounts, MatchError> {
    let left_make = left.make_asset.value;
    let left_take = left.take_asset.value;
    let right_make = right.make_asset.value;
    let right_take = right.take_asset.value;

    if left_make == 0 || left_take == 0 || right_make == 0 || right_take == 0 {
        return Err(MatchError::NothingToFill);
    }

    // Remaining make-side capacity, pro-rata to the unfilled take side.
    let left_make_remaining = partial_floor(left_take_remaining, left_make, left_take)?;
    let right_make_remaining = partial_floor(right_take_remaining, right_make, right_take)?;

    let (left_fill, right_fill) = if right.is_ephemeral() {
        let right_fill = right_make_remaining;
        let left_fill = safe_partial_floor(right_fill, left_make, left_take)?;
        if left_fill == 0 || right_fill == 0 {
            return Err(MatchError::NothingToFill);
        }
        if left_fill > right_take_remaining || right_fill > left_take_remaining {
            return Err(MatchError::PriceIncompatible);
        }
        check_side_protected(left_fill, right_make, right_fill, right_take)?;
        (left_fill, right_fill)
    } else if left.is_ephemeral() {
        let left_fill = left_make_remaining;
        let right_fill = safe_partial_floor(left_fill, right_make, right_take)?;
        if left_fill == 0 || right_fill == 0 {
            return Err(MatchError::NothingToFill);
        }
        if right_fill > left_take_remaining || left_fill > right_take_remaining {
            return Err(MatchError::PriceIncompatible);
        }
        check_side_protected(right_fill, left_make, left_fill, left_take)?;
        (left_fill, right_fill)
    } else if right_take_remaining > left_make_remaining {
        // Left is the binding side and trades out its full remainder.
        let right_demand = safe_partial_floor(left_take_remaining, right_take, right_make)?;
        if right_demand > left_make_remaining {
            return Err(MatchError::PriceIncompatible);
        }
        (left_make_remaining, left_take_remaining)
    } else {
        // Right's remaining demand is the binding side.
        let left_fill = right_take_remaining;
        let right_fill = safe_partial_floor(left_fill, left_take, left_make)?;
        if right_fill > right_make_remaining {
            return Err(MatchError::PriceIncompatible);
        }
        (left_fill, right_fill)
    };

    if left_fill == 0 || right_fill == 0 {
        return Err(MatchError::NothingToFill);
    }

    Ok(FillAmounts {
        left: left_fill,
        right: right_fill,
    })
}

/// Verify a side is not executing below its own declared ratio.
///
/// A side paying `paid_fill` of its make asset is entitled to at least
/// `paid_fill * take_value / make_value` of its take asset; cross-scaled,
/// `received_fill * make_value >= paid_fill * take_value` up to the same
/// 0.1% tolerance as the rounding guard. Used in the ephemeral branches,
/// where one side's fill is derived purely through the other side's ratio.
fn check_side_protected(
    received_fill: u128,
    make_value: u128,
    paid_fill: u128,
    take_value: u128,
) -> Result<(), MatchError> {
    let received = received_fill
        .checked_mul(make_value)
        .ok_or(MatchError::ArithmeticOverflow)?;
    let owed = paid_fill
        .checked_mul(take_value)
        .ok_or(MatchError::ArithmeticOverflow)?;
    if received < owed {
        let deficit = (owed - received)
            .checked_mul(1000)
            .ok_or(MatchError::ArithmeticOverflow)?;
        if deficit >= owed {
            return Err(MatchError::PriceIncompatible);
        }
    }
    Ok(())
}

/// Plain `floor(value * numerator / denominator)` without the rounding
/// guard; used for the conservative remaining-capacity derivation.
fn partial_floor(value: u128, numerator: u128, denominator: u128) -> Result<u128, MatchError> {
    if denominator == 0 {
        return Err(MatchError::NothingToFill);
    }
    value
        .checked_mul(numerator)
        .ok_or(MatchError::ArithmeticOverflow)
        .map(|product| product / denominator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::asset::Asset;
    use types::ids::Address;
    use types::order::Order;

    fn addr(n: u8) -> Address {
        Address::from_bytes([n; 20])
    }

    const TOKEN_A: u8 = 10;
    const TOKEN_B: u8 = 11;

    fn order(trader: u8, make_token: u8, make: u128, take_token: u8, take: u128, salt: u64) -> Order {
        Order::market(
            addr(trader),
            10_000,
            Asset::new(addr(make_token), make),
            Asset::new(addr(take_token), take),
            salt,
        )
    }

    #[test]
    fn test_right_binding_scenario() {
        // left: 20 A for 200 B; right: 100 B for 10 A — equal prices,
        // right is the smaller side.
        let left = order(1, TOKEN_A, 20, TOKEN_B, 200, 1);
        let right = order(2, TOKEN_B, 100, TOKEN_A, 10, 2);
        let fill = fill_order(&left, &right, 200, 10).unwrap();
        assert_eq!(fill, FillAmounts { left: 10, right: 100 });
    }

    #[test]
    fn test_left_binding_side() {
        // left: 10 A for 100 B; right: 300 B for 30 A — left exhausted.
        let left = order(1, TOKEN_A, 10, TOKEN_B, 100, 1);
        let right = order(2, TOKEN_B, 300, TOKEN_A, 30, 2);
        let fill = fill_order(&left, &right, 100, 30).unwrap();
        assert_eq!(fill, FillAmounts { left: 10, right: 100 });
    }

    #[test]
    fn test_left_binding_price_incompatible() {
        // right pays only 5 B per A while left demands 10 B per A.
        let left = order(1, TOKEN_A, 10, TOKEN_B, 100, 1);
        let right = order(2, TOKEN_B, 200, TOKEN_A, 40, 2);
        assert_eq!(
            fill_order(&left, &right, 100, 40),
            Err(MatchError::PriceIncompatible)
        );
    }

    #[test]
    fn test_right_binding_price_incompatible() {
        // right offers 50 B for 10 A while left demands 100 B for 10 A.
        let left = order(1, TOKEN_A, 10, TOKEN_B, 100, 1);
        let right = order(2, TOKEN_B, 50, TOKEN_A, 10, 2);
        assert_eq!(
            fill_order(&left, &right, 100, 10),
            Err(MatchError::PriceIncompatible)
        );
    }

    #[test]
    fn test_partial_remaining_respected() {
        // Same pair as the right-binding scenario, but right already half
        // filled: only 5 A of demand left.
        let left = order(1, TOKEN_A, 20, TOKEN_B, 200, 1);
        let right = order(2, TOKEN_B, 100, TOKEN_A, 10, 2);
        let fill = fill_order(&left, &right, 200, 5).unwrap();
        assert_eq!(fill, FillAmounts { left: 5, right: 50 });
    }

    #[test]
    fn test_exhausted_pair_nothing_to_fill() {
        let left = order(1, TOKEN_A, 20, TOKEN_B, 200, 1);
        let right = order(2, TOKEN_B, 100, TOKEN_A, 10, 2);
        assert_eq!(
            fill_order(&left, &right, 0, 0),
            Err(MatchError::NothingToFill)
        );
    }

    #[test]
    fn test_floor_collapse_rejected() {
        // Right (ephemeral) offers 1 B; left pays 1 A per 1000 B, so the
        // derived quantity floors to zero.
        let left = order(1, TOKEN_A, 1, TOKEN_B, 1000, 1);
        let right = order(2, TOKEN_B, 1, TOKEN_A, 1, 0);
        assert_eq!(
            fill_order(&left, &right, 1000, 1),
            Err(MatchError::NothingToFill)
        );
    }

    #[test]
    fn test_rounding_loss_rejected() {
        // floor(1 * 10 / 3) = 3 loses a third of a unit — over the guard.
        let left = order(1, TOKEN_A, 3, TOKEN_B, 10, 1);
        let right = order(2, TOKEN_B, 4, TOKEN_A, 1, 2);
        assert_eq!(
            fill_order(&left, &right, 10, 1),
            Err(MatchError::PriceIncompatible)
        );
    }

    #[test]
    fn test_ephemeral_right_authoritative() {
        // right (salt 0) offers its full 100 B; left pays at 1 A per 10 B.
        let left = order(1, TOKEN_A, 30, TOKEN_B, 300, 1);
        let right = order(2, TOKEN_B, 100, TOKEN_A, 10, 0);
        let fill = fill_order(&left, &right, 300, 10).unwrap();
        assert_eq!(fill, FillAmounts { left: 10, right: 100 });
    }

    #[test]
    fn test_ephemeral_right_over_demand_rejected() {
        // left would pay 20 A for right's 100 B, but right only asked for
        // 10 A — the implied quantity exceeds right's stated capacity.
        let left = order(1, TOKEN_A, 30, TOKEN_B, 150, 1);
        let right = order(2, TOKEN_B, 100, TOKEN_A, 10, 0);
        assert_eq!(
            fill_order(&left, &right, 150, 10),
            Err(MatchError::PriceIncompatible)
        );
    }

    #[test]
    fn test_ephemeral_left_authoritative() {
        // left (salt 0) offers its full 50 B; right owes 5 A at its own
        // declared 10 A per 100 B.
        let left = order(1, TOKEN_B, 50, TOKEN_A, 5, 0);
        let right = order(2, TOKEN_A, 10, TOKEN_B, 100, 1);
        let fill = fill_order(&left, &right, 5, 100).unwrap();
        assert_eq!(fill, FillAmounts { left: 50, right: 5 });
    }

    #[test]
    fn test_ephemeral_right_underpaid_rejected() {
        // left pays 4 A per 1000 B, right (ephemeral) demands 7 A for its
        // 1000 B — left's price is far below right's limit.
        let left = order(1, TOKEN_A, 4, TOKEN_B, 1000, 1);
        let right = order(2, TOKEN_B, 1000, TOKEN_A, 7, 0);
        assert_eq!(
            fill_order(&left, &right, 1000, 7),
            Err(MatchError::PriceIncompatible)
        );
    }

    #[test]
    fn test_ephemeral_left_underpaid_rejected() {
        let left = order(1, TOKEN_B, 1000, TOKEN_A, 7, 0);
        let right = order(2, TOKEN_A, 4, TOKEN_B, 1000, 1);
        assert_eq!(
            fill_order(&left, &right, 7, 1000),
            Err(MatchError::PriceIncompatible)
        );
    }

    #[test]
    fn test_zero_value_order_rejected() {
        let left = order(1, TOKEN_A, 0, TOKEN_B, 200, 1);
        let right = order(2, TOKEN_B, 100, TOKEN_A, 10, 2);
        assert_eq!(
            fill_order(&left, &right, 200, 10),
            Err(MatchError::NothingToFill)
        );
    }

    #[test]
    fn test_overflow_detected() {
        let left = order(1, TOKEN_A, u128::MAX, TOKEN_B, 2, 1);
        let right = order(2, TOKEN_B, 2, TOKEN_A, u128::MAX, 2);
        assert_eq!(
            fill_order(&left, &right, 2, u128::MAX),
            Err(MatchError::ArithmeticOverflow)
        );
    }

    #[test]
    fn test_exact_match_consumes_both() {
        let left = order(1, TOKEN_A, 10, TOKEN_B, 100, 1);
        let right = order(2, TOKEN_B, 100, TOKEN_A, 10, 2);
        let fill = fill_order(&left, &right, 100, 10).unwrap();
        assert_eq!(fill, FillAmounts { left: 10, right: 100 });
    }
}
