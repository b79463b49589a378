//! Admin operations handlers.
//!
//! This module handles:
//! - Pause/unpause (controller)
//! - Controller and upgrade allow-list management
//! - Burn and mint fee configuration
//! - Self-upgrade to an allow-listed code id

use cosmwasm_std::{
    BankMsg, Binary, Coin, DepsMut, Env, Event, HexBinary, MessageInfo, Response, Uint128,
    WasmMsg,
};

use crate::auth::{ensure_allowed_implementation, ensure_controller, ensure_owner};
use crate::error::ContractError;
use crate::fee_charge::{MintFeeParams, MINT_FEE_PARAMS};
use crate::state::{take_collected_burn_fees, ALLOWED_IMPLEMENTATIONS, CONFIG, CONTROLLERS};

// ============================================================================
// Pause/Unpause
// ============================================================================

/// Pause the bridge (blocks batch mints and burns).
pub fn execute_pause(deps: DepsMut, info: MessageInfo) -> Result<Response, ContractError> {
    ensure_controller(deps.storage, &info.sender)?;

    let mut config = CONFIG.load(deps.storage)?;
    if config.paused {
        return Err(ContractError::BridgePaused);
    }
    config.paused = true;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("method", "pause")
        .add_attribute("sender", info.sender))
}

/// Unpause the bridge.
pub fn execute_unpause(deps: DepsMut, info: MessageInfo) -> Result<Response, ContractError> {
    ensure_controller(deps.storage, &info.sender)?;

    let mut config = CONFIG.load(deps.storage)?;
    if !config.paused {
        return Err(ContractError::BridgeNotPaused);
    }
    config.paused = false;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("method", "unpause")
        .add_attribute("sender", info.sender))
}

// ============================================================================
// Controllers
// ============================================================================

pub fn execute_add_controller(
    deps: DepsMut,
    info: MessageInfo,
    controller: String,
) -> Result<Response, ContractError> {
    ensure_owner(deps.storage, &info.sender)?;

    let controller = deps.api.addr_validate(&controller)?;
    CONTROLLERS.save(deps.storage, &controller, &true)?;

    Ok(Response::new()
        .add_attribute("method", "add_controller")
        .add_attribute("controller", controller))
}

pub fn execute_remove_controller(
    deps: DepsMut,
    info: MessageInfo,
    controller: String,
) -> Result<Response, ContractError> {
    ensure_owner(deps.storage, &info.sender)?;

    let controller = deps.api.addr_validate(&controller)?;
    CONTROLLERS.remove(deps.storage, &controller);

    Ok(Response::new()
        .add_attribute("method", "remove_controller")
        .add_attribute("controller", controller))
}

// ============================================================================
// Upgrade allow-list
// ============================================================================

pub fn execute_add_allowed_implementation(
    deps: DepsMut,
    info: MessageInfo,
    checksum: HexBinary,
) -> Result<Response, ContractError> {
    ensure_controller(deps.storage, &info.sender)?;
    check_checksum_length(&checksum)?;

    ALLOWED_IMPLEMENTATIONS.save(deps.storage, checksum.as_slice(), &true)?;

    Ok(Response::new()
        .add_attribute("method", "add_allowed_implementation")
        .add_attribute("checksum", checksum.to_hex()))
}

pub fn execute_remove_allowed_implementation(
    deps: DepsMut,
    info: MessageInfo,
    checksum: HexBinary,
) -> Result<Response, ContractError> {
    ensure_owner(deps.storage, &info.sender)?;

    ALLOWED_IMPLEMENTATIONS.remove(deps.storage, checksum.as_slice());

    Ok(Response::new()
        .add_attribute("method", "remove_allowed_implementation")
        .add_attribute("checksum", checksum.to_hex()))
}

/// Migrate this contract to `new_code_id` if its checksum is allow-listed.
///
/// The bridge must be its own admin for the migration to go through.
pub fn execute_upgrade(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    new_code_id: u64,
    msg: Binary,
) -> Result<Response, ContractError> {
    ensure_owner(deps.storage, &info.sender)?;

    let code_info = deps.querier.query_wasm_code_info(new_code_id)?;
    ensure_allowed_implementation(deps.storage, code_info.checksum.as_slice())?;

    Ok(Response::new()
        .add_message(WasmMsg::Migrate {
            contract_addr: env.contract.address.to_string(),
            new_code_id,
            msg,
        })
        .add_attribute("method", "upgrade")
        .add_attribute("new_code_id", new_code_id.to_string())
        .add_attribute("checksum", code_info.checksum.to_hex()))
}

fn check_checksum_length(checksum: &HexBinary) -> Result<(), ContractError> {
    if checksum.len() != 32 {
        return Err(ContractError::InvalidLength {
            field: "checksum".to_string(),
            expected: 32,
            got: checksum.len(),
        });
    }
    Ok(())
}

// ============================================================================
// Fees
// ============================================================================

pub fn execute_update_burn_fee(
    deps: DepsMut,
    info: MessageInfo,
    fee: Uint128,
) -> Result<Response, ContractError> {
    let mut config = ensure_owner(deps.storage, &info.sender)?;

    let old_fee = config.burn_fee;
    config.burn_fee = fee;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_event(
            Event::new("burn_fee_updated")
                .add_attribute("old_fee", old_fee.to_string())
                .add_attribute("new_fee", fee.to_string()),
        )
        .add_attribute("method", "update_burn_fee"))
}

/// Send every collected burn fee to the owner and reset the counter.
pub fn execute_withdraw_burn_fees(
    deps: DepsMut,
    info: MessageInfo,
) -> Result<Response, ContractError> {
    let config = ensure_owner(deps.storage, &info.sender)?;

    let amount = take_collected_burn_fees(deps.storage)?;
    if amount.is_zero() {
        return Err(ContractError::NoFeesToWithdraw);
    }

    Ok(Response::new()
        .add_message(BankMsg::Send {
            to_address: config.owner.to_string(),
            amount: vec![Coin {
                denom: config.native_denom,
                amount,
            }],
        })
        .add_event(
            Event::new("burn_fees_withdrawn")
                .add_attribute("amount", amount.to_string())
                .add_attribute("recipient", config.owner.to_string()),
        )
        .add_attribute("method", "withdraw_burn_fees"))
}

pub fn execute_update_mint_fee_params(
    deps: DepsMut,
    info: MessageInfo,
    params: MintFeeParams,
) -> Result<Response, ContractError> {
    ensure_owner(deps.storage, &info.sender)?;

    // reject parameters whose single-order fee cannot be represented
    params.min_deposit()?;
    MINT_FEE_PARAMS.save(deps.storage, &params)?;

    Ok(Response::new()
        .add_attribute("method", "update_mint_fee_params")
        .add_attribute("batch_overhead", params.batch_overhead.to_string())
        .add_attribute("per_order_overhead", params.per_order_overhead.to_string())
        .add_attribute("gas_price", params.gas_price.to_string()))
}

pub fn execute_set_fee_charge(
    deps: DepsMut,
    info: MessageInfo,
    fee_charge: Option<String>,
) -> Result<Response, ContractError> {
    let mut config = ensure_owner(deps.storage, &info.sender)?;

    config.fee_charge = fee_charge
        .map(|addr| deps.api.addr_validate(&addr))
        .transpose()?;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("method", "set_fee_charge")
        .add_attribute(
            "fee_charge",
            config
                .fee_charge
                .map_or_else(|| "none".to_string(), |a| a.to_string()),
        ))
}

pub fn execute_set_minter_relayer(
    deps: DepsMut,
    info: MessageInfo,
    relayer: Option<String>,
) -> Result<Response, ContractError> {
    let mut config = ensure_owner(deps.storage, &info.sender)?;

    config.minter_relayer = relayer
        .map(|addr| deps.api.addr_validate(&addr))
        .transpose()?;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("method", "set_minter_relayer")
        .add_attribute(
            "relayer",
            config
                .minter_relayer
                .map_or_else(|| "none".to_string(), |a| a.to_string()),
        ))
}
