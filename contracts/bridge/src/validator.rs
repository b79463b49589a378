//! Per-order admission rules
//!
//! [`validate_order`] never writes. Fee sufficiency and selection are decided
//! by the batch engine because they depend on the caller and on the
//! selection list.

use cosmwasm_std::{StdResult, Storage};

use crate::order::MintOrder;
use crate::registry;
use crate::replay;

/// Outcome of one order in a batch
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum MintResult {
    Ok = 0,
    InsufficientFeeDeposit = 1,
    ZeroAmount = 2,
    UsedNonce = 3,
    ZeroRecipient = 4,
    UnexpectedRecipientChainId = 5,
    TokensNotBridged = 6,
    ProcessingNotRequested = 7,
}

impl MintResult {
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn is_ok(self) -> bool {
        self == MintResult::Ok
    }
}

/// Chain-side facts the rules depend on
#[derive(Clone, Copy, Debug)]
pub struct ValidationContext {
    pub chain_id: u32,
}

/// Admission verdict for a decoded order. First matching rule wins.
pub fn validate_order(
    storage: &dyn Storage,
    ctx: &ValidationContext,
    order: &MintOrder,
) -> StdResult<MintResult> {
    if order.recipient.is_zero() {
        return Ok(MintResult::ZeroRecipient);
    }
    if order.amount.is_zero() {
        return Ok(MintResult::ZeroAmount);
    }
    if replay::is_used(storage, &order.sender_id, order.nonce) {
        return Ok(MintResult::UsedNonce);
    }
    if order.recipient_chain_id != ctx.chain_id {
        return Ok(MintResult::UnexpectedRecipientChainId);
    }

    // native orders never consult the pair registry
    if order.to_token.is_native() {
        return Ok(MintResult::Ok);
    }

    // tokens are named by their registered alias
    let Some(to_token) = registry::token_by_alias(storage, &order.to_token)? else {
        return Ok(MintResult::TokensNotBridged);
    };
    if let Some(base_id) = registry::base_by_wrapped(storage, &to_token)? {
        if base_id != order.from_token_id {
            return Ok(MintResult::TokensNotBridged);
        }
    }

    Ok(MintResult::Ok)
}
