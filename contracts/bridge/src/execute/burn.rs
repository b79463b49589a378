//! Burn and minter notification handlers.
//!
//! A burn locks value on this chain so the minter authority can mint it on
//! the other side. The attached native funds always carry the burn fee; for
//! native burns they carry the burned amount too.

use common::TokenMetadata;
use cosmwasm_std::{
    to_json_binary, Addr, Binary, CosmosMsg, DepsMut, Env, Event, MessageInfo, QuerierWrapper,
    Response, Storage, Uint128, WasmMsg,
};
use cw20::{Cw20ExecuteMsg, Cw20QueryMsg, TokenInfoResponse};

use super::fixed_bytes;
use crate::auth::ensure_not_paused;
use crate::burn_history;
use crate::error::ContractError;
use crate::hash::to_hex;
use crate::registry;
use crate::state::{add_collected_burn_fee, next_operation_id, MEMO_OPERATIONS};

/// Execute handler for burning native currency or cw20 tokens
#[allow(clippy::too_many_arguments)]
pub fn execute_burn(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    amount: Uint128,
    from_token: String,
    to_token_id: Binary,
    recipient_id: Binary,
    memo: Option<Binary>,
) -> Result<Response, ContractError> {
    let config = ensure_not_paused(deps.storage)?;

    if amount.is_zero() {
        return Err(ContractError::InvalidAmount {
            reason: "Burn amount must be greater than zero".to_string(),
        });
    }
    let to_token_id: [u8; 32] = fixed_bytes("to_token_id", &to_token_id)?;
    let memo: Option<[u8; 32]> = memo.as_ref().map(|m| fixed_bytes("memo", m)).transpose()?;

    let mut messages: Vec<CosmosMsg> = Vec::new();
    let metadata = if from_token == config.native_denom {
        let expected = amount
            .checked_add(config.burn_fee)
            .map_err(cosmwasm_std::StdError::from)?;
        check_attached_funds(&info, &config.native_denom, expected)?;
        config.native_metadata.clone()
    } else {
        let token = deps.api.addr_validate(&from_token)?;
        let base_id = registry::base_by_wrapped(deps.storage, &token)?;

        if to_token_id == [0u8; 32] && base_id.is_none() {
            // wrapped native redeemed for native currency on the other side
            if !config.is_wrapped_side {
                return Err(ContractError::SideMismatch);
            }
        } else if config.is_wrapped_side && !is_registered_both_ways(deps.storage, &token, base_id)? {
            return Err(ContractError::TokenNotRegistered {
                token: token.to_string(),
            });
        }
        check_attached_funds(&info, &config.native_denom, config.burn_fee)?;

        // tokens burned by the bridge itself already sit in custody
        if info.sender != env.contract.address {
            messages.push(CosmosMsg::Wasm(WasmMsg::Execute {
                contract_addr: token.to_string(),
                msg: to_json_binary(&Cw20ExecuteMsg::TransferFrom {
                    owner: info.sender.to_string(),
                    recipient: env.contract.address.to_string(),
                    amount,
                })?,
                funds: vec![],
            }));
        }

        token_metadata(deps.storage, &deps.querier, &token)?
    };

    // Common tail
    add_collected_burn_fee(deps.storage, config.burn_fee)?;
    burn_history::record_burn(deps.storage, &info.sender, env.block.height)?;
    let operation_id = next_operation_id(deps.storage)?;
    if let Some(memo) = &memo {
        MEMO_OPERATIONS.save(deps.storage, (&info.sender, memo.as_slice()), &operation_id)?;
    }

    let event = burnt_event(
        &info.sender,
        amount,
        &from_token,
        &recipient_id,
        &to_token_id,
        operation_id,
        &metadata,
        memo.as_ref(),
    );

    Ok(Response::new()
        .add_messages(messages)
        .add_event(event)
        .add_attribute("method", "burn")
        .add_attribute("operation_id", operation_id.to_string())
        .set_data(to_json_binary(&operation_id)?))
}

/// Execute handler forwarding a notification to the off-chain minter
pub fn execute_notify_minter(
    info: MessageInfo,
    notification_type: u32,
    user_data: Binary,
    memo: Option<Binary>,
) -> Result<Response, ContractError> {
    let mut event = Event::new("notify_minter")
        .add_attribute("notification_type", notification_type.to_string())
        .add_attribute("sender", info.sender.to_string())
        .add_attribute("user_data", to_hex(user_data.as_slice()));
    if let Some(memo) = memo {
        event = event.add_attribute("memo", to_hex(memo.as_slice()));
    }

    Ok(Response::new()
        .add_event(event)
        .add_attribute("method", "notify_minter"))
}

/// Attached funds must be exactly `expected` of the native denom
fn check_attached_funds(
    info: &MessageInfo,
    native_denom: &str,
    expected: Uint128,
) -> Result<(), ContractError> {
    let mut got = Uint128::zero();
    for coin in &info.funds {
        if coin.denom != native_denom {
            return Err(ContractError::InvalidAmount {
                reason: format!("Unexpected denom attached: {}", coin.denom),
            });
        }
        got = got.checked_add(coin.amount).map_err(cosmwasm_std::StdError::from)?;
    }

    if got != expected {
        return Err(ContractError::InvalidFunds { expected, got });
    }
    Ok(())
}

fn is_registered_both_ways(
    storage: &dyn Storage,
    token: &Addr,
    base_id: Option<[u8; 32]>,
) -> Result<bool, ContractError> {
    let Some(base_id) = base_id else {
        return Ok(false);
    };
    Ok(registry::wrapped_by_base(storage, &base_id)?.as_ref() == Some(token))
}

/// Cached registry metadata, falling back to the token's own cw20 info
fn token_metadata(
    storage: &dyn Storage,
    querier: &QuerierWrapper,
    token: &Addr,
) -> Result<TokenMetadata, ContractError> {
    if let Some(metadata) = registry::metadata(storage, token)? {
        return Ok(metadata);
    }
    let info: TokenInfoResponse = querier.query_wasm_smart(token, &Cw20QueryMsg::TokenInfo {})?;
    Ok(TokenMetadata::new(info.name, info.symbol, info.decimals))
}

#[allow(clippy::too_many_arguments)]
fn burnt_event(
    sender: &Addr,
    amount: Uint128,
    from_token: &str,
    recipient_id: &Binary,
    to_token_id: &[u8; 32],
    operation_id: u32,
    metadata: &TokenMetadata,
    memo: Option<&[u8; 32]>,
) -> Event {
    let event = Event::new("burnt")
        .add_attribute("sender", sender.to_string())
        .add_attribute("amount", amount.to_string())
        .add_attribute("from_token", from_token)
        .add_attribute("recipient_id", to_hex(recipient_id.as_slice()))
        .add_attribute("to_token_id", to_hex(to_token_id))
        .add_attribute("operation_id", operation_id.to_string())
        .add_attribute("name", &metadata.name)
        .add_attribute("symbol", &metadata.symbol)
        .add_attribute("decimals", metadata.decimals.to_string());
    match memo {
        Some(memo) => event.add_attribute("memo", to_hex(memo)),
        None => event,
    }
}
