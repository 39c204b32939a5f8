//! Security primitives for the matching engine
//!
//! The reentrancy guard brackets the validate-then-mutate sequence of a
//! match; the executor registry is the admin-granted, revocable "may
//! submit matches" capability that fronts every matching call.

use std::collections::HashSet;
use types::errors::MatchError;
use types::ids::Address;

/// Reentrancy guard preventing nested entry into the match path.
///
/// Acquired before order validation, released unconditionally on every
/// exit. Fill counters are read-then-write, so a nested call could
/// double-spend remaining capacity; the guard makes that structurally
/// impossible rather than merely unlikely.
#[derive(Debug, Clone, Default)]
pub struct ReentrancyGuard {
    locked: bool,
}

impl ReentrancyGuard {
    pub fn new() -> Self {
        Self { locked: false }
    }

    /// Acquire the guard. Returns `false` if already held.
    pub fn acquire(&mut self) -> bool {
        if self.locked {
            return false;
        }
        self.locked = true;
        true
    }

    /// Release the guard.
    pub fn release(&mut self) {
        self.locked = false;
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }
}

/// Registry of addresses allowed to submit matches, owned by an admin.
///
/// The admin grants and revokes the executor capability and may hand the
/// admin role to another address. The admin is not implicitly an executor;
/// the capability is always explicit.
#[derive(Debug, Clone)]
pub struct ExecutorRegistry {
    admin: Address,
    executors: HashSet<Address>,
}

impl ExecutorRegistry {
    pub fn new(admin: Address) -> Self {
        Self {
            admin,
            executors: HashSet::new(),
        }
    }

    pub fn admin(&self) -> Address {
        self.admin
    }

    pub fn is_admin(&self, caller: &Address) -> bool {
        *caller == self.admin
    }

    pub fn is_executor(&self, caller: &Address) -> bool {
        self.executors.contains(caller)
    }

    /// Grant the match-submission capability. Admin-only.
    pub fn grant(&mut self, caller: Address, executor: Address) -> Result<(), MatchError> {
        if !self.is_admin(&caller) {
            return Err(MatchError::Unauthorized);
        }
        self.executors.insert(executor);
        Ok(())
    }

    /// Revoke the match-submission capability. Admin-only.
    pub fn revoke(&mut self, caller: Address, executor: &Address) -> Result<(), MatchError> {
        if !self.is_admin(&caller) {
            return Err(MatchError::Unauthorized);
        }
        self.executors.remove(executor);
        Ok(())
    }

    /// Hand the admin role to another address. Admin-only.
    pub fn transfer_admin(&mut self, caller: Address, new_admin: Address) -> Result<(), MatchError> {
        if !self.is_admin(&caller) {
            return Err(MatchError::Unauthorized);
        }
        self.admin = new_admin;
        Ok(())
    }
}
