//! Process-wide transaction outcome policy.
//!
//! Production commits on success. Test binaries flip the policy to
//! rollback-on-ok so every `with_txn` call leaves the database untouched,
//! which keeps tests isolated without per-test cleanup.

use std::sync::OnceLock;

/// What `with_txn` does with a transaction whose closure returned Ok.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxnPolicy {
    /// Commit on success (production behavior).
    CommitOnOk,
    /// Roll back on success (test isolation).
    RollbackOnOk,
}

static POLICY: OnceLock<TxnPolicy> = OnceLock::new();

/// The current policy; `CommitOnOk` when none has been set.
pub fn current() -> TxnPolicy {
    POLICY.get().copied().unwrap_or(TxnPolicy::CommitOnOk)
}

/// Set the policy for the process. First call wins; later calls are ignored,
/// so a test harness cannot be flipped back to commit mid-run.
pub fn set_txn_policy(policy: TxnPolicy) {
    let _ = POLICY.set(policy);
}

/// Resolve a policy from `POTLUCK_TXN_POLICY` (`commit` / `rollback`),
/// falling back to the given default when unset or unrecognized.
pub fn policy_from_env(default: TxnPolicy) -> TxnPolicy {
    match std::env::var("POTLUCK_TXN_POLICY")
        .unwrap_or_default()
        .to_lowercase()
        .as_str()
    {
        "commit" => TxnPolicy::CommitOnOk,
        "rollback" => TxnPolicy::RollbackOnOk,
        _ => default,
    }
}
