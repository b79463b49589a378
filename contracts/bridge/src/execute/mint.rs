//! Batch mint handler.
//!
//! Pipeline per call:
//!
//! 1. framing check and signature check over the whole payload (abort on failure)
//! 2. admission and application of every selected order
//! 3. fee charging and `minted` events for the orders that succeeded
//!
//! Pipeline steps return `Result<_, ContractError>` and abort the call.
//! Individual orders only ever produce a [`MintResult`].

use common::{TokenMetadata, WrappedTokenExecuteMsg};
use cosmwasm_std::{
    to_json_binary, Addr, BankMsg, Binary, Coin, CosmosMsg, DepsMut, Env, Event, MessageInfo,
    QuerierWrapper, Response, Storage, Uint128, Uint256, WasmMsg,
};
use cw20::Cw20ExecuteMsg;

use crate::auth::ensure_not_paused;
use crate::error::ContractError;
use crate::fee_charge::{self, MintFeeParams};
use crate::hash::to_hex;
use crate::order::{MintOrder, OrderBatch};
use crate::registry;
use crate::replay;
use crate::signature::verify_batch_signature;
use crate::state::Config;
use crate::validator::{validate_order, MintResult, ValidationContext};

/// Execute handler for a signed order batch
pub fn execute_batch_mint(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    encoded_orders: Binary,
    signature: Binary,
    orders_to_process: Vec<u32>,
) -> Result<Response, ContractError> {
    let config = ensure_not_paused(deps.storage)?;

    let batch = OrderBatch::new(encoded_orders.as_slice())?;
    verify_batch_signature(
        deps.api,
        batch.as_bytes(),
        signature.as_slice(),
        &config.minter_address,
    )?;

    let selected = selection_mask(batch.count(), &orders_to_process)?;
    let fee_params = fee_charge::load_params(deps.storage)?;
    let fee_gate = FeeGate::resolve(&config, &info.sender, &fee_params)?;
    let ctx = ValidationContext {
        chain_id: config.chain_id,
    };

    let mut results = vec![MintResult::ProcessingNotRequested; batch.count()];
    let mut applied: Vec<MintOrder> = Vec::new();
    let mut messages: Vec<CosmosMsg> = Vec::new();
    let mut native_reserve = NativeReserve::new(&env.contract.address, &config.native_denom);

    // Admission and application
    for (index, order) in (0..batch.count()).filter_map(|i| batch.order(i).map(|o| (i, o))) {
        if !selected[index] {
            continue;
        }

        if let Some(gate) = &fee_gate {
            let payer = order.fee_payer.to_addr(&config.address_prefix)?;
            if !gate.covers_deposit(&deps.querier, &payer)? {
                results[index] = MintResult::InsufficientFeeDeposit;
                continue;
            }
        }

        let verdict = validate_order(deps.storage, &ctx, &order)?;
        if !verdict.is_ok() {
            results[index] = verdict;
            continue;
        }

        messages.extend(apply_order(
            deps.storage,
            &deps.querier,
            &config,
            &order,
            &mut native_reserve,
        )?);
        replay::mark_used(deps.storage, &order.sender_id, order.nonce)?;
        results[index] = MintResult::Ok;
        applied.push(order);
    }

    // Fee and event pass over the final set of successes
    let fee = match &fee_gate {
        Some(_) => fee_params.fee_per_order(applied.len() as u64)?,
        None => Uint128::zero(),
    };

    let mut events = Vec::with_capacity(applied.len());
    for order in &applied {
        if let Some(gate) = &fee_gate {
            if !fee.is_zero() {
                let payer = order.fee_payer.to_addr(&config.address_prefix)?;
                messages.push(fee_charge::charge_fee_msg(&gate.fee_charge, &payer, fee)?);
            }
        }
        events.push(minted_event(deps.storage, &config, order, fee)?);
    }

    let codes: Vec<u8> = results.iter().map(|r| r.code()).collect();
    let results_attr = codes
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(",");

    Ok(Response::new()
        .add_messages(messages)
        .add_events(events)
        .add_attribute("method", "batch_mint")
        .add_attribute("order_count", batch.count().to_string())
        .add_attribute("minted_count", applied.len().to_string())
        .add_attribute("results", results_attr)
        .set_data(Binary::from(codes)))
}

/// Which indices to process. An empty list selects every order.
fn selection_mask(count: usize, orders_to_process: &[u32]) -> Result<Vec<bool>, ContractError> {
    if orders_to_process.is_empty() {
        return Ok(vec![true; count]);
    }

    let mut mask = vec![false; count];
    for &index in orders_to_process {
        let slot = mask
            .get_mut(index as usize)
            .ok_or(ContractError::OrderIndexOutOfRange { index, count })?;
        *slot = true;
    }
    Ok(mask)
}

// ============================================================================
// Fee gate
// ============================================================================

/// Active when a fee-charge contract is configured and the caller is the
/// minter relayer
struct FeeGate {
    fee_charge: Addr,
    min_deposit: Uint128,
}

impl FeeGate {
    fn resolve(
        config: &Config,
        caller: &Addr,
        params: &MintFeeParams,
    ) -> Result<Option<Self>, ContractError> {
        let (Some(fee_charge), Some(relayer)) = (&config.fee_charge, &config.minter_relayer) else {
            return Ok(None);
        };
        if relayer != caller {
            return Ok(None);
        }
        Ok(Some(Self {
            fee_charge: fee_charge.clone(),
            min_deposit: params.min_deposit()?,
        }))
    }

    fn covers_deposit(&self, querier: &QuerierWrapper, payer: &Addr) -> Result<bool, ContractError> {
        Ok(fee_charge::can_pay(
            querier,
            &self.fee_charge,
            payer,
            self.min_deposit,
        )?)
    }
}

// ============================================================================
// Apply
// ============================================================================

/// Native balance still available for payouts in this batch
struct NativeReserve<'a> {
    contract: &'a Addr,
    denom: &'a str,
    remaining: Option<Uint128>,
}

impl<'a> NativeReserve<'a> {
    fn new(contract: &'a Addr, denom: &'a str) -> Self {
        Self {
            contract,
            denom,
            remaining: None,
        }
    }

    fn take(&mut self, querier: &QuerierWrapper, amount: Uint128) -> Result<(), ContractError> {
        let available = match self.remaining {
            Some(remaining) => remaining,
            None => querier.query_balance(self.contract, self.denom)?.amount,
        };
        if available < amount {
            return Err(ContractError::InsufficientNativeBalance {
                needed: amount,
                available,
            });
        }
        self.remaining = Some(available - amount);
        Ok(())
    }
}

fn coin_amount(amount: Uint256) -> Result<Uint128, ContractError> {
    Uint128::try_from(amount).map_err(|_| ContractError::AmountOverflow {
        amount: amount.to_string(),
    })
}

/// Messages moving an admitted order's value to its recipient
fn apply_order(
    storage: &mut dyn Storage,
    querier: &QuerierWrapper,
    config: &Config,
    order: &MintOrder,
    native_reserve: &mut NativeReserve,
) -> Result<Vec<CosmosMsg>, ContractError> {
    let amount = coin_amount(order.amount)?;
    let recipient = order.recipient.to_addr(&config.address_prefix)?;

    if order.to_token.is_native() {
        native_reserve.take(querier, amount)?;
        return Ok(vec![CosmosMsg::Bank(BankMsg::Send {
            to_address: recipient.to_string(),
            amount: vec![Coin {
                denom: config.native_denom.clone(),
                amount,
            }],
        })]);
    }

    let token = resolve_token(storage, order)?;
    let is_wrapped = registry::base_by_wrapped(storage, &token)?
        .map_or(false, |base_id| base_id == order.from_token_id);

    if is_wrapped {
        registry::update_metadata(
            storage,
            &token,
            &TokenMetadata::new(order.name_str(), order.symbol_str(), order.decimals),
        )?;
    }

    let mut messages = vec![CosmosMsg::Wasm(WasmMsg::Execute {
        contract_addr: token.to_string(),
        msg: to_json_binary(&Cw20ExecuteMsg::Transfer {
            recipient: recipient.to_string(),
            amount,
        })?,
        funds: vec![],
    })];

    if is_wrapped && !order.approve_spender.is_zero() {
        let spender = order.approve_spender.to_addr(&config.address_prefix)?;
        // unlimited approvals saturate at the cw20 maximum
        let allowance = Uint128::try_from(order.approve_amount).unwrap_or(Uint128::MAX);
        messages.push(CosmosMsg::Wasm(WasmMsg::Execute {
            contract_addr: token.to_string(),
            msg: to_json_binary(&WrappedTokenExecuteMsg::ApproveByOwner {
                owner: recipient.to_string(),
                spender: spender.to_string(),
                amount: allowance,
            })?,
            funds: vec![],
        }));
    }

    Ok(messages)
}

/// Token contract an admitted token order pays out of
fn resolve_token(storage: &dyn Storage, order: &MintOrder) -> Result<Addr, ContractError> {
    registry::token_by_alias(storage, &order.to_token)?.ok_or_else(|| {
        ContractError::TokenNotRegistered {
            token: to_hex(order.to_token.as_bytes()),
        }
    })
}

fn minted_event(
    storage: &dyn Storage,
    config: &Config,
    order: &MintOrder,
    fee: Uint128,
) -> Result<Event, ContractError> {
    let to_token = if order.to_token.is_native() {
        config.native_denom.clone()
    } else {
        resolve_token(storage, order)?.to_string()
    };

    Ok(Event::new("minted")
        .add_attribute("amount", order.amount.to_string())
        .add_attribute("from_token_id", to_hex(&order.from_token_id))
        .add_attribute("sender_id", to_hex(&order.sender_id))
        .add_attribute("to_token", to_token)
        .add_attribute(
            "recipient",
            order.recipient.to_addr(&config.address_prefix)?.to_string(),
        )
        .add_attribute("nonce", order.nonce.to_string())
        .add_attribute("fee_charged", fee.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_selection_selects_all() {
        assert_eq!(selection_mask(3, &[]).unwrap(), vec![true, true, true]);
    }

    #[test]
    fn test_explicit_selection() {
        assert_eq!(selection_mask(3, &[2, 0, 2]).unwrap(), vec![true, false, true]);
    }

    #[test]
    fn test_selection_out_of_range_aborts() {
        assert_eq!(
            selection_mask(2, &[0, 2]).unwrap_err(),
            ContractError::OrderIndexOutOfRange { index: 2, count: 2 }
        );
    }

    #[test]
    fn test_amount_must_fit_coin() {
        assert_eq!(coin_amount(Uint256::from(5u128)).unwrap(), Uint128::new(5));
        assert!(matches!(
            coin_amount(Uint256::MAX),
            Err(ContractError::AmountOverflow { .. })
        ));
    }
}
