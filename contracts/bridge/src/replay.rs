//! Replay ledger
//!
//! Nonces are scoped per source-chain sender id, so two senders may reuse
//! the same nonce independently. Entries are write-once.

use cosmwasm_std::{StdResult, Storage};
use cw_storage_plus::Map;

/// Key: (sender_id, nonce), Value: always true once written
pub const USED_NONCES: Map<(&[u8], u32), bool> = Map::new("used_nonces");

pub fn is_used(storage: &dyn Storage, sender_id: &[u8; 32], nonce: u32) -> bool {
    USED_NONCES.has(storage, (sender_id.as_slice(), nonce))
}

pub fn mark_used(storage: &mut dyn Storage, sender_id: &[u8; 32], nonce: u32) -> StdResult<()> {
    USED_NONCES.save(storage, (sender_id.as_slice(), nonce), &true)
}
