//! Token Bridge Contract - Entry Points
//!
//! The implementation is modularized into:
//! - `execute/` - Execute message handlers
//! - `query` - Query message handlers

use cosmwasm_std::{
    entry_point, to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Reply, Response,
    StdResult,
};
use cw2::set_contract_version;

use crate::address_codec::encode_bech32_address;
use crate::error::ContractError;
use crate::execute::{
    execute_add_allowed_implementation, execute_add_controller, execute_batch_mint, execute_burn,
    execute_deploy_erc20, execute_notify_minter, execute_pause, execute_register_token_alias,
    execute_remove_allowed_implementation, execute_remove_controller, execute_set_fee_charge, execute_set_minter_relayer, execute_unpause,
    execute_update_burn_fee, execute_update_mint_fee_params, execute_upgrade,
    execute_withdraw_burn_fees, reply_deploy_erc20,
};
use crate::fee_charge::{MintFeeParams, MINT_FEE_PARAMS};
use crate::hash::hex_to_array;
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg};
use crate::query::{
    query_allowed_implementations, query_base_token, query_burn_history,
    query_collected_burn_fees, query_config, query_controllers, query_estimate_mint_fee,
    query_is_controller, query_is_nonce_used, query_mint_fee_params, query_operation_by_memo,
    query_operation_id_counter, query_token_alias, query_token_by_alias, query_token_metadata,
    query_token_pairs, query_user_memos, query_wrapped_token,
};
use crate::state::{
    default_native_metadata, Config, COLLECTED_BURN_FEES, CONFIG, CONTRACT_NAME,
    CONTRACT_VERSION, CONTROLLERS, DEFAULT_ADDRESS_PREFIX, DEPLOY_WRAPPED_TOKEN_REPLY_ID,
    OPERATION_ID_COUNTER,
};

// ============================================================================
// Instantiate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let owner = deps.api.addr_validate(&msg.owner)?;
    let minter_address: [u8; 20] = hex_to_array(&msg.minter_address)
        .map_err(|reason| ContractError::InvalidAddress { reason })?;
    if minter_address == [0u8; 20] {
        return Err(ContractError::InvalidAddress {
            reason: "Minter address cannot be zero".to_string(),
        });
    }

    let address_prefix = msg
        .address_prefix
        .unwrap_or_else(|| DEFAULT_ADDRESS_PREFIX.to_string());
    // fail early on a prefix orders could never be rendered with
    encode_bech32_address(&[0u8; 20], &address_prefix)?;

    if msg.native_denom.is_empty() {
        return Err(ContractError::InvalidAmount {
            reason: "Native denom cannot be empty".to_string(),
        });
    }

    let mint_fee_params = msg.mint_fee_params.unwrap_or_default();
    mint_fee_params.min_deposit()?;

    let config = Config {
        owner: owner.clone(),
        paused: false,
        chain_id: msg.chain_id,
        is_wrapped_side: msg.is_wrapped_side,
        minter_address,
        minter_relayer: msg
            .minter_relayer
            .map(|addr| deps.api.addr_validate(&addr))
            .transpose()?,
        native_denom: msg.native_denom,
        address_prefix,
        burn_fee: msg.burn_fee,
        fee_charge: msg
            .fee_charge
            .map(|addr| deps.api.addr_validate(&addr))
            .transpose()?,
        wrapped_token_code_id: msg.wrapped_token_code_id,
        native_metadata: msg.native_metadata.unwrap_or_else(default_native_metadata),
    };
    CONFIG.save(deps.storage, &config)?;
    MINT_FEE_PARAMS.save(deps.storage, &mint_fee_params)?;

    CONTROLLERS.save(deps.storage, &owner, &true)?;
    OPERATION_ID_COUNTER.save(deps.storage, &0)?;
    COLLECTED_BURN_FEES.save(deps.storage, &Default::default())?;

    Ok(Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("owner", owner)
        .add_attribute("chain_id", config.chain_id.to_string())
        .add_attribute("is_wrapped_side", config.is_wrapped_side.to_string())
        .add_attribute("minter_address", msg.minter_address))
}

// ============================================================================
// Execute
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        // Bridge operations
        ExecuteMsg::BatchMint {
            encoded_orders,
            signature,
            orders_to_process,
        } => execute_batch_mint(deps, env, info, encoded_orders, signature, orders_to_process),
        ExecuteMsg::Burn {
            amount,
            from_token,
            to_token_id,
            recipient_id,
            memo,
        } => execute_burn(
            deps,
            env,
            info,
            amount,
            from_token,
            to_token_id,
            recipient_id,
            memo,
        ),
        ExecuteMsg::NotifyMinter {
            notification_type,
            user_data,
            memo,
        } => execute_notify_minter(info, notification_type, user_data, memo),

        // Registry
        ExecuteMsg::DeployErc20 {
            name,
            symbol,
            decimals,
            base_token_id,
        } => execute_deploy_erc20(deps, env, info, name, symbol, decimals, base_token_id),
        ExecuteMsg::RegisterTokenAlias { token } => execute_register_token_alias(deps, info, token),

        // Pause
        ExecuteMsg::Pause {} => execute_pause(deps, info),
        ExecuteMsg::Unpause {} => execute_unpause(deps, info),

        // Access control
        ExecuteMsg::AddController { controller } => execute_add_controller(deps, info, controller),
        ExecuteMsg::RemoveController { controller } => {
            execute_remove_controller(deps, info, controller)
        }
        ExecuteMsg::AddAllowedImplementation { checksum } => {
            execute_add_allowed_implementation(deps, info, checksum)
        }
        ExecuteMsg::RemoveAllowedImplementation { checksum } => {
            execute_remove_allowed_implementation(deps, info, checksum)
        }

        // Fees
        ExecuteMsg::UpdateBurnFee { fee } => execute_update_burn_fee(deps, info, fee),
        ExecuteMsg::WithdrawBurnFees {} => execute_withdraw_burn_fees(deps, info),
        ExecuteMsg::UpdateMintFeeParams { params } => {
            execute_update_mint_fee_params(deps, info, params)
        }
        ExecuteMsg::SetFeeCharge { fee_charge } => execute_set_fee_charge(deps, info, fee_charge),
        ExecuteMsg::SetMinterRelayer { relayer } => execute_set_minter_relayer(deps, info, relayer),

        // Upgrade
        ExecuteMsg::Upgrade { new_code_id, msg } => execute_upgrade(deps, env, info, new_code_id, msg),
    }
}

// ============================================================================
// Reply
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn reply(deps: DepsMut, _env: Env, msg: Reply) -> Result<Response, ContractError> {
    match msg.id {
        DEPLOY_WRAPPED_TOKEN_REPLY_ID => reply_deploy_erc20(deps, msg),
        id => Err(ContractError::UnknownReplyId { id }),
    }
}

// ============================================================================
// Query
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_json_binary(&query_config(deps)?),
        QueryMsg::MintFeeParams {} => to_json_binary(&query_mint_fee_params(deps)?),
        QueryMsg::EstimateMintFee { successful_orders } => {
            to_json_binary(&query_estimate_mint_fee(deps, successful_orders)?)
        }
        QueryMsg::IsNonceUsed { sender_id, nonce } => {
            to_json_binary(&query_is_nonce_used(deps, sender_id, nonce)?)
        }
        QueryMsg::BurnHistory { account } => to_json_binary(&query_burn_history(deps, account)?),
        QueryMsg::WrappedToken { base_token_id } => {
            to_json_binary(&query_wrapped_token(deps, base_token_id)?)
        }
        QueryMsg::BaseToken { wrapped_token } => {
            to_json_binary(&query_base_token(deps, wrapped_token)?)
        }
        QueryMsg::TokenPairs { start_after, limit } => {
            to_json_binary(&query_token_pairs(deps, start_after, limit)?)
        }
        QueryMsg::TokenMetadata { wrapped_token } => {
            to_json_binary(&query_token_metadata(deps, wrapped_token)?)
        }
        QueryMsg::TokenAlias { token } => to_json_binary(&query_token_alias(deps, token)?),
        QueryMsg::TokenByAlias { alias } => to_json_binary(&query_token_by_alias(deps, alias)?),
        QueryMsg::CollectedBurnFees {} => to_json_binary(&query_collected_burn_fees(deps)?),
        QueryMsg::OperationIdCounter {} => to_json_binary(&query_operation_id_counter(deps)?),
        QueryMsg::OperationByMemo { user, memo } => {
            to_json_binary(&query_operation_by_memo(deps, user, memo)?)
        }
        QueryMsg::UserMemos {
            user,
            start_after,
            limit,
        } => to_json_binary(&query_user_memos(deps, user, start_after, limit)?),
        QueryMsg::Controllers { start_after, limit } => {
            to_json_binary(&query_controllers(deps, start_after, limit)?)
        }
        QueryMsg::IsController { account } => to_json_binary(&query_is_controller(deps, account)?),
        QueryMsg::AllowedImplementations { start_after, limit } => {
            to_json_binary(&query_allowed_implementations(deps, start_after, limit)?)
        }
    }
}

// ============================================================================
// Migrate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    // Initialize mint fee params if not set
    if MINT_FEE_PARAMS.may_load(deps.storage)?.is_none() {
        MINT_FEE_PARAMS.save(deps.storage, &MintFeeParams::default())?;
    }

    Ok(Response::new()
        .add_attribute("method", "migrate")
        .add_attribute("version", CONTRACT_VERSION))
}
