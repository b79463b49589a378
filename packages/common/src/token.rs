//! Wrapped token interface.
//!
//! Wrapped tokens are cw20 contracts deployed by the bridge. On top of the
//! cw20 standard they accept `ApproveByOwner`, which lets the bridge set an
//! allowance on behalf of a holder right after a mint.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::Uint128;
use cw20::{Cw20Coin, MinterResponse};

/// Display metadata of a bridged token
#[cw_serde]
pub struct TokenMetadata {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

impl TokenMetadata {
    pub fn new(name: impl Into<String>, symbol: impl Into<String>, decimals: u8) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            decimals,
        }
    }
}

/// Instantiate message for a wrapped token (cw20-base compatible)
#[cw_serde]
pub struct WrappedTokenInstantiateMsg {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    pub initial_balances: Vec<Cw20Coin>,
    pub mint: Option<MinterResponse>,
}

/// Bridge-only extension messages of a wrapped token
#[cw_serde]
pub enum WrappedTokenExecuteMsg {
    /// Set `spender`'s allowance over `owner`'s balance. Only the token owner (the bridge) may call this.
    ApproveByOwner {
        owner: String,
        spender: String,
        amount: Uint128,
    },
}
