//! Fee-charge oracle interface.
//!
//! When the minter relayer submits a batch, the bridge asks this contract
//! whether each order's fee payer has deposited enough, then bills every
//! payer whose order went through.

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::Uint128;

/// Execute messages understood by a fee-charge contract
#[cw_serde]
pub enum FeeChargeExecuteMsg {
    /// Deduct `amount` from the payer's deposit. Only the bridge may call this.
    ChargeFee { payer: String, amount: Uint128 },
}

/// Query messages understood by a fee-charge contract
#[cw_serde]
#[derive(QueryResponses)]
pub enum FeeChargeQueryMsg {
    /// Whether `payer` has at least `amount` deposited
    #[returns(CanPayFeeResponse)]
    CanPayFee { payer: String, amount: Uint128 },
}

#[cw_serde]
pub struct CanPayFeeResponse {
    pub can_pay: bool,
}
