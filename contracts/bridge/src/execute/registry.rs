//! Wrapped token deployment.
//!
//! `DeployErc20` instantiates the configured wrapped token code with the
//! whole supply held by the bridge, so mints are transfers out of custody.
//! The pair and the token's order alias are registered once the
//! instantiation reply reports the new address.

use common::{TokenMetadata, WrappedTokenInstantiateMsg};
use cosmwasm_std::{
    to_json_binary, Addr, Binary, DepsMut, Env, MessageInfo, Reply, Response, SubMsg,
    SubMsgResult, Uint128, WasmMsg,
};
use cw20::{Cw20Coin, MinterResponse};

use super::fixed_bytes;
use crate::auth::{ensure_controller, ensure_owner};
use crate::error::ContractError;
use crate::hash::to_hex;
use crate::order::{fixed_bytes_to_string, truncate_utf8, NAME_LEN, SYMBOL_LEN};
use crate::registry;
use crate::state::{
    PendingDeployment, CONFIG, DEPLOY_WRAPPED_TOKEN_REPLY_ID, PENDING_DEPLOYMENT,
};

/// Execute handler for deploying a wrapped token (controller only)
pub fn execute_deploy_erc20(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    name: String,
    symbol: String,
    decimals: u8,
    base_token_id: Binary,
) -> Result<Response, ContractError> {
    ensure_controller(deps.storage, &info.sender)?;
    let config = CONFIG.load(deps.storage)?;
    let code_id = config
        .wrapped_token_code_id
        .ok_or(ContractError::WrappedTokenCodeNotSet)?;

    let base_token_id: [u8; 32] = fixed_bytes("base_token_id", &base_token_id)?;
    if registry::wrapped_by_base(deps.storage, &base_token_id)?.is_some() {
        return Err(ContractError::TokenAlreadyDeployed {
            base_token_id: to_hex(&base_token_id),
        });
    }

    // names are kept to the widths a mint order can carry
    let name = fixed_bytes_to_string(&truncate_utf8::<NAME_LEN>(&name));
    let symbol = fixed_bytes_to_string(&truncate_utf8::<SYMBOL_LEN>(&symbol));
    let metadata = TokenMetadata::new(name.clone(), symbol.clone(), decimals);

    PENDING_DEPLOYMENT.save(
        deps.storage,
        &PendingDeployment {
            base_token_id,
            metadata,
        },
    )?;

    let bridge = env.contract.address.to_string();
    let instantiate = WasmMsg::Instantiate {
        admin: Some(bridge.clone()),
        code_id,
        msg: to_json_binary(&WrappedTokenInstantiateMsg {
            name: name.clone(),
            symbol: symbol.clone(),
            decimals,
            initial_balances: vec![Cw20Coin {
                address: bridge.clone(),
                amount: Uint128::MAX,
            }],
            mint: Some(MinterResponse {
                minter: bridge,
                cap: None,
            }),
        })?,
        funds: vec![],
        label: format!("wrapped {}", symbol),
    };

    Ok(Response::new()
        .add_submessage(SubMsg::reply_on_success(
            instantiate,
            DEPLOY_WRAPPED_TOKEN_REPLY_ID,
        ))
        .add_attribute("method", "deploy_erc20")
        .add_attribute("base_token_id", to_hex(&base_token_id))
        .add_attribute("name", name)
        .add_attribute("symbol", symbol)
        .add_attribute("decimals", decimals.to_string()))
}

/// Reply handler registering the freshly instantiated wrapped token
pub fn reply_deploy_erc20(deps: DepsMut, msg: Reply) -> Result<Response, ContractError> {
    let pending = PENDING_DEPLOYMENT
        .may_load(deps.storage)?
        .ok_or(ContractError::NoPendingDeployment)?;
    PENDING_DEPLOYMENT.remove(deps.storage);

    let wrapped = instantiated_address(&msg.result)?;
    let wrapped = deps.api.addr_validate(wrapped.as_str())?;

    registry::register_pair(
        deps.storage,
        &pending.base_token_id,
        &wrapped,
        &pending.metadata,
    )?;
    let alias = registry::register_alias(deps.storage, deps.api, &wrapped)?;

    Ok(Response::new()
        .add_attribute("method", "deploy_erc20_reply")
        .add_attribute("wrapped_token", wrapped.to_string())
        .add_attribute("alias", to_hex(alias.as_bytes()))
        .add_attribute("base_token_id", to_hex(&pending.base_token_id))
        .set_data(to_json_binary(&wrapped)?))
}

/// Execute handler registering a plain cw20's order alias (owner only)
pub fn execute_register_token_alias(
    deps: DepsMut,
    info: MessageInfo,
    token: String,
) -> Result<Response, ContractError> {
    ensure_owner(deps.storage, &info.sender)?;

    let token = deps.api.addr_validate(&token)?;
    let alias = registry::register_alias(deps.storage, deps.api, &token)?;

    Ok(Response::new()
        .add_attribute("method", "register_token_alias")
        .add_attribute("token", token)
        .add_attribute("alias", to_hex(alias.as_bytes())))
}

/// Address of the contract created by an instantiate sub-message
fn instantiated_address(result: &SubMsgResult) -> Result<Addr, ContractError> {
    let response = match result {
        SubMsgResult::Ok(response) => response,
        SubMsgResult::Err(err) => {
            return Err(cosmwasm_std::StdError::generic_err(err.clone()).into());
        }
    };

    response
        .events
        .iter()
        .filter(|event| event.ty == "instantiate")
        .flat_map(|event| event.attributes.iter())
        .find(|attr| attr.key == "_contract_address")
        .map(|attr| Addr::unchecked(&attr.value))
        .ok_or_else(|| {
            cosmwasm_std::StdError::generic_err("instantiate reply without contract address")
                .into()
        })
}
