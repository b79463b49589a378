//! Mint Fee Module
//!
//! Relayed batches are billed to each order's fee payer through an external
//! fee-charge contract. The per-order share of a batch is
//!
//! ```text
//! (batch_overhead / successful_orders + per_order_overhead) * gas_price
//! ```
//!
//! with integer division. Rounding of the shared overhead is intentional and
//! must be kept as is.
//!
//! ## Defaults
//!
//! | Parameter          | Value   |
//! |--------------------|---------|
//! | batch_overhead     | 200 000 |
//! | per_order_overhead | 100 000 |
//! | gas_price          | 0 (fees disabled) |

use common::{CanPayFeeResponse, FeeChargeExecuteMsg, FeeChargeQueryMsg};
use cosmwasm_schema::cw_serde;
use cosmwasm_std::{
    to_json_binary, Addr, CosmosMsg, QuerierWrapper, StdResult, Uint128, WasmMsg,
};
use cw_storage_plus::Item;

// ============================================================================
// Constants
// ============================================================================

/// Gas units shared by every order of a batch
pub const DEFAULT_BATCH_OVERHEAD: u64 = 200_000;

/// Gas units attributed to each processed order
pub const DEFAULT_PER_ORDER_OVERHEAD: u64 = 100_000;

// ============================================================================
// Data Structures
// ============================================================================

/// Parameters of the mint fee formula
#[cw_serde]
pub struct MintFeeParams {
    pub batch_overhead: u64,
    pub per_order_overhead: u64,
    /// Native units charged per gas unit
    pub gas_price: Uint128,
}

impl Default for MintFeeParams {
    fn default() -> Self {
        Self {
            batch_overhead: DEFAULT_BATCH_OVERHEAD,
            per_order_overhead: DEFAULT_PER_ORDER_OVERHEAD,
            gas_price: Uint128::zero(),
        }
    }
}

impl MintFeeParams {
    /// Fee charged to each of `successful_orders` orders
    pub fn fee_per_order(&self, successful_orders: u64) -> StdResult<Uint128> {
        if successful_orders == 0 {
            return Ok(Uint128::zero());
        }
        let gas = Uint128::from(self.batch_overhead / successful_orders)
            + Uint128::from(self.per_order_overhead);
        Ok(gas.checked_mul(self.gas_price)?)
    }

    /// Deposit a fee payer must cover for an order to be admitted
    ///
    /// Equal to the fee of a batch with a single successful order.
    pub fn min_deposit(&self) -> StdResult<Uint128> {
        self.fee_per_order(1)
    }
}

// ============================================================================
// Storage
// ============================================================================

pub const MINT_FEE_PARAMS: Item<MintFeeParams> = Item::new("mint_fee_params");

pub fn load_params(storage: &dyn cosmwasm_std::Storage) -> StdResult<MintFeeParams> {
    Ok(MINT_FEE_PARAMS.may_load(storage)?.unwrap_or_default())
}

// ============================================================================
// Fee-charge contract calls
// ============================================================================

/// Ask the fee-charge contract whether `payer` can cover `amount`
pub fn can_pay(
    querier: &QuerierWrapper,
    fee_charge: &Addr,
    payer: &Addr,
    amount: Uint128,
) -> StdResult<bool> {
    let response: CanPayFeeResponse = querier.query_wasm_smart(
        fee_charge,
        &FeeChargeQueryMsg::CanPayFee {
            payer: payer.to_string(),
            amount,
        },
    )?;
    Ok(response.can_pay)
}

/// Message charging `amount` from `payer`'s deposit
pub fn charge_fee_msg(fee_charge: &Addr, payer: &Addr, amount: Uint128) -> StdResult<CosmosMsg> {
    Ok(CosmosMsg::Wasm(WasmMsg::Execute {
        contract_addr: fee_charge.to_string(),
        msg: to_json_binary(&FeeChargeExecuteMsg::ChargeFee {
            payer: payer.to_string(),
            amount,
        })?,
        funds: vec![],
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(gas_price: u128) -> MintFeeParams {
        MintFeeParams {
            gas_price: Uint128::new(gas_price),
            ..MintFeeParams::default()
        }
    }

    #[test]
    fn test_default_params_charge_nothing() {
        let p = MintFeeParams::default();
        assert_eq!(p.fee_per_order(3).unwrap(), Uint128::zero());
        assert_eq!(p.min_deposit().unwrap(), Uint128::zero());
    }

    #[test]
    fn test_fee_shares_batch_overhead() {
        let p = params(2);
        // (200_000 / 1 + 100_000) * 2
        assert_eq!(p.fee_per_order(1).unwrap(), Uint128::new(600_000));
        // (200_000 / 4 + 100_000) * 2
        assert_eq!(p.fee_per_order(4).unwrap(), Uint128::new(300_000));
        assert_eq!(p.min_deposit().unwrap(), p.fee_per_order(1).unwrap());
    }

    #[test]
    fn test_fee_rounding_is_floor_of_overhead_share() {
        let p = params(1);
        // 200_000 / 3 = 66_666 (remainder dropped)
        assert_eq!(p.fee_per_order(3).unwrap(), Uint128::new(166_666));
        // 200_000 / 7 = 28_571
        assert_eq!(p.fee_per_order(7).unwrap(), Uint128::new(128_571));
    }

    #[test]
    fn test_zero_successes_cost_nothing() {
        assert_eq!(params(5).fee_per_order(0).unwrap(), Uint128::zero());
    }

    #[test]
    fn test_overflow_is_an_error() {
        let p = MintFeeParams {
            gas_price: Uint128::MAX,
            ..MintFeeParams::default()
        };
        assert!(p.fee_per_order(1).is_err());
    }
}
