//! Query handlers for the token bridge contract.

use cosmwasm_std::{Binary, Deps, HexBinary, Order, StdResult};
use cw_storage_plus::Bound;

use crate::address_codec::LocalAddress;
use crate::auth;
use crate::burn_history;
use crate::fee_charge::{self, MintFeeParams};
use crate::hash::to_hex;
use crate::msg::{
    AllowedImplementationsResponse, BaseTokenResponse, BurnHistoryResponse,
    CollectedBurnFeesResponse, ConfigResponse, ControllersResponse, EstimateMintFeeResponse,
    IsControllerResponse, IsNonceUsedResponse, MemoEntry, OperationByMemoResponse,
    OperationIdCounterResponse, TokenAliasResponse, TokenByAliasResponse, TokenMetadataResponse,
    TokenPairResponse, TokenPairsResponse, UserMemosResponse, WrappedTokenResponse,
};
use crate::registry;
use crate::replay;
use crate::state::{
    ALLOWED_IMPLEMENTATIONS, COLLECTED_BURN_FEES, CONFIG, CONTROLLERS, MEMO_OPERATIONS,
    OPERATION_ID_COUNTER,
};

const DEFAULT_LIMIT: u32 = 10;
const MAX_LIMIT: u32 = 30;

pub fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(ConfigResponse {
        owner: config.owner,
        paused: config.paused,
        chain_id: config.chain_id,
        is_wrapped_side: config.is_wrapped_side,
        minter_address: to_hex(&config.minter_address),
        minter_relayer: config.minter_relayer,
        native_denom: config.native_denom,
        address_prefix: config.address_prefix,
        burn_fee: config.burn_fee,
        fee_charge: config.fee_charge,
        wrapped_token_code_id: config.wrapped_token_code_id,
        native_metadata: config.native_metadata,
    })
}

pub fn query_mint_fee_params(deps: Deps) -> StdResult<MintFeeParams> {
    fee_charge::load_params(deps.storage)
}

pub fn query_estimate_mint_fee(
    deps: Deps,
    successful_orders: u64,
) -> StdResult<EstimateMintFeeResponse> {
    let params = fee_charge::load_params(deps.storage)?;
    Ok(EstimateMintFeeResponse {
        fee_per_order: params.fee_per_order(successful_orders)?,
        min_deposit: params.min_deposit()?,
    })
}

pub fn query_is_nonce_used(
    deps: Deps,
    sender_id: Binary,
    nonce: u32,
) -> StdResult<IsNonceUsedResponse> {
    let used = match <[u8; 32]>::try_from(sender_id.as_slice()) {
        Ok(sender_id) => replay::is_used(deps.storage, &sender_id, nonce),
        Err(_) => false,
    };
    Ok(IsNonceUsedResponse { used })
}

pub fn query_burn_history(deps: Deps, account: String) -> StdResult<BurnHistoryResponse> {
    let account = deps.api.addr_validate(&account)?;
    Ok(BurnHistoryResponse {
        heights: burn_history::load_history(deps.storage, &account)?,
    })
}

pub fn query_wrapped_token(deps: Deps, base_token_id: Binary) -> StdResult<WrappedTokenResponse> {
    let wrapped_token = match <[u8; 32]>::try_from(base_token_id.as_slice()) {
        Ok(id) => registry::wrapped_by_base(deps.storage, &id)?,
        Err(_) => None,
    };
    Ok(WrappedTokenResponse { wrapped_token })
}

pub fn query_base_token(deps: Deps, wrapped_token: String) -> StdResult<BaseTokenResponse> {
    let wrapped = deps.api.addr_validate(&wrapped_token)?;
    Ok(BaseTokenResponse {
        base_token_id: registry::base_by_wrapped(deps.storage, &wrapped)?
            .map(|id| Binary::from(id.to_vec())),
    })
}

pub fn query_token_pairs(
    deps: Deps,
    start_after: Option<String>,
    limit: Option<u32>,
) -> StdResult<TokenPairsResponse> {
    let start_after = start_after
        .map(|addr| deps.api.addr_validate(&addr))
        .transpose()?;
    let pairs = registry::pairs(deps.storage, start_after.as_ref(), limit)?
        .into_iter()
        .map(|(wrapped_token, base_id)| TokenPairResponse {
            wrapped_token,
            base_token_id: Binary::from(base_id.to_vec()),
        })
        .collect();
    Ok(TokenPairsResponse { pairs })
}

pub fn query_token_metadata(deps: Deps, wrapped_token: String) -> StdResult<TokenMetadataResponse> {
    let wrapped = deps.api.addr_validate(&wrapped_token)?;
    Ok(TokenMetadataResponse {
        metadata: registry::metadata(deps.storage, &wrapped)?,
    })
}

pub fn query_token_alias(deps: Deps, token: String) -> StdResult<TokenAliasResponse> {
    let token = deps.api.addr_validate(&token)?;
    let alias = registry::token_alias(deps.api, &token)?;
    let registered = registry::token_by_alias(deps.storage, &alias)?.as_ref() == Some(&token);
    Ok(TokenAliasResponse {
        alias: HexBinary::from(alias.as_bytes().as_slice()),
        registered,
    })
}

pub fn query_token_by_alias(deps: Deps, alias: HexBinary) -> StdResult<TokenByAliasResponse> {
    let token = match <[u8; 20]>::try_from(alias.as_slice()) {
        Ok(alias) => registry::token_by_alias(deps.storage, &LocalAddress(alias))?,
        Err(_) => None,
    };
    Ok(TokenByAliasResponse { token })
}

pub fn query_collected_burn_fees(deps: Deps) -> StdResult<CollectedBurnFeesResponse> {
    Ok(CollectedBurnFeesResponse {
        amount: COLLECTED_BURN_FEES
            .may_load(deps.storage)?
            .unwrap_or_default(),
    })
}

pub fn query_operation_id_counter(deps: Deps) -> StdResult<OperationIdCounterResponse> {
    Ok(OperationIdCounterResponse {
        next_operation_id: OPERATION_ID_COUNTER
            .may_load(deps.storage)?
            .unwrap_or_default(),
    })
}

pub fn query_operation_by_memo(
    deps: Deps,
    user: String,
    memo: Binary,
) -> StdResult<OperationByMemoResponse> {
    let user = deps.api.addr_validate(&user)?;
    Ok(OperationByMemoResponse {
        operation_id: MEMO_OPERATIONS.may_load(deps.storage, (&user, memo.as_slice()))?,
    })
}

pub fn query_user_memos(
    deps: Deps,
    user: String,
    start_after: Option<Binary>,
    limit: Option<u32>,
) -> StdResult<UserMemosResponse> {
    let user = deps.api.addr_validate(&user)?;
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
    let start = start_after.as_ref().map(|b| Bound::exclusive(b.as_slice()));

    let memos = MEMO_OPERATIONS
        .prefix(&user)
        .range(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .map(|item| {
            let (memo, operation_id) = item?;
            Ok(MemoEntry {
                memo: Binary::from(memo),
                operation_id,
            })
        })
        .collect::<StdResult<Vec<_>>>()?;

    Ok(UserMemosResponse { memos })
}

pub fn query_controllers(
    deps: Deps,
    start_after: Option<String>,
    limit: Option<u32>,
) -> StdResult<ControllersResponse> {
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
    let start_after = start_after
        .map(|addr| deps.api.addr_validate(&addr))
        .transpose()?;
    let start = start_after.as_ref().map(Bound::exclusive);

    let controllers = CONTROLLERS
        .range(deps.storage, start, None, Order::Ascending)
        .filter_map(|item| match item {
            Ok((addr, true)) => Some(Ok(addr)),
            Ok(_) => None,
            Err(e) => Some(Err(e)),
        })
        .take(limit)
        .collect::<StdResult<Vec<_>>>()?;

    Ok(ControllersResponse { controllers })
}

pub fn query_is_controller(deps: Deps, account: String) -> StdResult<IsControllerResponse> {
    let account = deps.api.addr_validate(&account)?;
    Ok(IsControllerResponse {
        is_controller: auth::is_controller(deps.storage, &account)?,
    })
}

pub fn query_allowed_implementations(
    deps: Deps,
    start_after: Option<HexBinary>,
    limit: Option<u32>,
) -> StdResult<AllowedImplementationsResponse> {
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
    let start = start_after.as_ref().map(|b| Bound::exclusive(b.as_slice()));

    let checksums = ALLOWED_IMPLEMENTATIONS
        .range(deps.storage, start, None, Order::Ascending)
        .filter_map(|item| match item {
            Ok((checksum, true)) => Some(Ok(HexBinary::from(checksum))),
            Ok(_) => None,
            Err(e) => Some(Err(e)),
        })
        .take(limit)
        .collect::<StdResult<Vec<_>>>()?;

    Ok(AllowedImplementationsResponse { checksums })
}
