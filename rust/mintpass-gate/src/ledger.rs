use dashmap::{DashMap, mapref::entry::Entry};
use mintpass_signature::Address;
use serde::{Deserialize, Serialize};

/// Key identifying one redeemable authorization: the tuple the consumption
/// ledger guards against replay.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConsumptionKey {
    /// Identity recovered from the presented signature.
    pub issuer: Address,
    /// Identity the grant was issued to.
    pub recipient: Address,
    /// Token id in the multi-token family; balance nonce in the
    /// single-token family.
    pub resource: u64,
}

/// Outcome of a consumption attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Consumption {
    /// First redemption of this tuple; the caller may proceed.
    Consumed,
    /// The tuple was redeemed before.
    AlreadyUsed,
}

/// The persistent record of redeemed authorizations.
///
/// Entries are created on first successful redemption, live for the
/// lifetime of the resource, and are never cleared. A second redemption
/// attempt against a recorded tuple is rejected no matter how the
/// accompanying signature is re-encoded.
#[derive(Debug, Default)]
pub struct ConsumptionLedger {
    entries: DashMap<ConsumptionKey, ()>,
}

impl ConsumptionLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `key` as redeemed, in one indivisible check-and-set.
    ///
    /// Of any number of concurrent calls with the same key, exactly one
    /// observes [`Consumption::Consumed`]; the entry occupancy check and
    /// the write happen under the same shard lock, so no two callers can
    /// both see "not yet used".
    pub fn try_consume(&self, key: ConsumptionKey) -> Consumption {
        match self.entries.entry(key) {
            Entry::Occupied(_) => Consumption::AlreadyUsed,
            Entry::Vacant(slot) => {
                slot.insert(());
                Consumption::Consumed
            }
        }
    }

    /// Read-only probe for an existing record.
    pub fn is_consumed(&self, key: &ConsumptionKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of redeemed tuples.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been redeemed yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mintpass_signature::ADDRESS_SIZE;
    use std::sync::Arc;

    fn key(resource: u64) -> ConsumptionKey {
        ConsumptionKey {
            issuer: Address::new([1u8; ADDRESS_SIZE]),
            recipient: Address::new([2u8; ADDRESS_SIZE]),
            resource,
        }
    }

    #[test]
    fn test_first_consumption_wins_and_sticks() {
        let ledger = ConsumptionLedger::new();
        assert!(!ledger.is_consumed(&key(0)));
        assert_eq!(ledger.try_consume(key(0)), Consumption::Consumed);
        assert_eq!(ledger.try_consume(key(0)), Consumption::AlreadyUsed);
        assert!(ledger.is_consumed(&key(0)));
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_distinct_tuples_do_not_interfere() {
        let ledger = ConsumptionLedger::new();
        assert_eq!(ledger.try_consume(key(0)), Consumption::Consumed);
        assert_eq!(ledger.try_consume(key(1)), Consumption::Consumed);

        let other_recipient = ConsumptionKey {
            recipient: Address::new([3u8; ADDRESS_SIZE]),
            ..key(0)
        };
        assert_eq!(ledger.try_consume(other_recipient), Consumption::Consumed);
    }

    #[test]
    fn test_concurrent_consumption_admits_exactly_one() {
        let ledger = Arc::new(ConsumptionLedger::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let ledger = Arc::clone(&ledger);
                std::thread::spawn(move || ledger.try_consume(key(7)))
            })
            .collect();

        let outcomes: Vec<_> = handles
            .into_iter()
            .map(|handle| handle.join().expect("consumer thread panicked"))
            .collect();

        let consumed = outcomes
            .iter()
            .filter(|outcome| **outcome == Consumption::Consumed)
            .count();
        assert_eq!(consumed, 1);
        assert_eq!(ledger.len(), 1);
    }
}
