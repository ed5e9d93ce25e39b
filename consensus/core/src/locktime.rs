//! Lock time classification, as enforced by the ledger for non-final inputs.

use crate::constants::{LOCK_TIME_THRESHOLD, MAX_TX_IN_SEQUENCE_NUM};

/// The unit a lock time value is expressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LockTimeKind {
    /// Values below [`LOCK_TIME_THRESHOLD`]
    BlockHeight,
    /// Unix timestamps in seconds, values at or above [`LOCK_TIME_THRESHOLD`]
    Timestamp,
}

impl LockTimeKind {
    #[inline]
    pub fn of(lock_time: u64) -> Self {
        if lock_time < LOCK_TIME_THRESHOLD { LockTimeKind::BlockHeight } else { LockTimeKind::Timestamp }
    }
}

/// A final input sequence disables lock time enforcement for the whole transaction
#[inline]
pub fn is_final_sequence(sequence: u32) -> bool {
    sequence == MAX_TX_IN_SEQUENCE_NUM
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lock_time_kind() {
        struct Test {
            name: &'static str,
            lock_time: u64,
            expected: LockTimeKind,
        }

        let tests = vec![
            Test { name: "zero", lock_time: 0, expected: LockTimeKind::BlockHeight },
            Test { name: "last height", lock_time: LOCK_TIME_THRESHOLD - 1, expected: LockTimeKind::BlockHeight },
            Test { name: "threshold", lock_time: LOCK_TIME_THRESHOLD, expected: LockTimeKind::Timestamp },
            Test { name: "recent timestamp", lock_time: 1_700_000_000, expected: LockTimeKind::Timestamp },
        ];

        for test in tests {
            assert_eq!(LockTimeKind::of(test.lock_time), test.expected, "test '{}' failed", test.name);
        }
    }

    #[test]
    fn test_final_sequence() {
        assert!(is_final_sequence(u32::MAX));
        assert!(!is_final_sequence(u32::MAX - 1));
        assert!(!is_final_sequence(0));
    }
}
