//! Per-account burn history
//!
//! Each burning account keeps the block heights of its most recent burns in a
//! fixed-capacity ring. Once full, every new burn overwrites the oldest slot.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, StdResult, Storage};
use cw_storage_plus::Map;

/// Maximum number of heights kept per account
pub const BURN_HISTORY_CAPACITY: usize = 255;

/// Burn history ring per account
pub const BURN_HISTORY: Map<&Addr, BurnRing> = Map::new("burn_history");

#[cw_serde]
#[derive(Default)]
pub struct BurnRing {
    /// Occupied slots, at most [`BURN_HISTORY_CAPACITY`]
    pub heights: Vec<u64>,
    /// Slot the next write lands on
    pub next: u8,
}

impl BurnRing {
    pub fn push(&mut self, height: u64) {
        let slot = self.next as usize;
        if self.heights.len() < BURN_HISTORY_CAPACITY {
            self.heights.push(height);
        } else {
            self.heights[slot] = height;
        }
        self.next = ((slot + 1) % BURN_HISTORY_CAPACITY) as u8;
    }

    /// All stored heights, oldest first
    pub fn to_vec(&self) -> Vec<u64> {
        if self.heights.len() < BURN_HISTORY_CAPACITY {
            return self.heights.clone();
        }
        let split = self.next as usize;
        let mut out = Vec::with_capacity(BURN_HISTORY_CAPACITY);
        out.extend_from_slice(&self.heights[split..]);
        out.extend_from_slice(&self.heights[..split]);
        out
    }

    pub fn len(&self) -> usize {
        self.heights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heights.is_empty()
    }
}

/// Append a burn height to the account's ring
pub fn record_burn(storage: &mut dyn Storage, account: &Addr, height: u64) -> StdResult<()> {
    BURN_HISTORY.update(storage, account, |ring| -> StdResult<_> {
        let mut ring = ring.unwrap_or_default();
        ring.push(height);
        Ok(ring)
    })?;
    Ok(())
}

/// Read the account's burn heights, oldest first
pub fn load_history(storage: &dyn Storage, account: &Addr) -> StdResult<Vec<u64>> {
    Ok(BURN_HISTORY
        .may_load(storage, account)?
        .map(|ring| ring.to_vec())
        .unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cosmwasm_std::testing::mock_dependencies;

    #[test]
    fn test_partial_ring_keeps_insertion_order() {
        let mut ring = BurnRing::default();
        for h in [10, 20, 30] {
            ring.push(h);
        }
        assert_eq!(ring.to_vec(), vec![10, 20, 30]);
        assert_eq!(ring.next, 3);
    }

    #[test]
    fn test_full_ring_overwrites_oldest() {
        let mut ring = BurnRing::default();
        // burn #n happens at height n
        for h in 1..=256u64 {
            ring.push(h);
        }

        let heights = ring.to_vec();
        assert_eq!(heights.len(), BURN_HISTORY_CAPACITY);
        assert_eq!(heights[0], 2);
        assert_eq!(*heights.last().unwrap(), 256);
        // burn #256 landed in the slot of burn #1
        assert_eq!(ring.heights[0], 256);
    }

    #[test]
    fn test_ring_never_exceeds_capacity() {
        let mut ring = BurnRing::default();
        for h in 0..1_000u64 {
            ring.push(h);
            assert!(ring.len() <= BURN_HISTORY_CAPACITY);
        }
        let heights = ring.to_vec();
        assert_eq!(heights[0], 1_000 - BURN_HISTORY_CAPACITY as u64);
        assert!(heights.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_storage_roundtrip_per_account() {
        let mut deps = mock_dependencies();
        let alice = Addr::unchecked("alice");
        let bob = Addr::unchecked("bob");

        record_burn(&mut deps.storage, &alice, 5).unwrap();
        record_burn(&mut deps.storage, &alice, 6).unwrap();
        record_burn(&mut deps.storage, &bob, 7).unwrap();

        assert_eq!(load_history(&deps.storage, &alice).unwrap(), vec![5, 6]);
        assert_eq!(load_history(&deps.storage, &bob).unwrap(), vec![7]);
        assert!(load_history(&deps.storage, &Addr::unchecked("carol"))
            .unwrap()
            .is_empty());
    }
}
