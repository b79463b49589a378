//! Token pair registry
//!
//! Bidirectional mapping between a 32-byte base token id (the token's id on
//! its chain of origin) and the wrapped cw20 token deployed here, plus the
//! cached metadata of each wrapped token.
//!
//! ## Token aliases
//!
//! Mint orders name their destination token with 20 bytes, while contract
//! addresses on this chain are 32 bytes. Every token a mint order may pay out
//! is therefore registered under a 20-byte alias: the last 20 bytes of the
//! keccak256 of its canonical address. Orders are resolved through the alias
//! map and never by rendering the raw bytes as an address.

use common::TokenMetadata;
use cosmwasm_std::{Addr, Api, Order, StdResult, Storage};
use cw_storage_plus::{Bound, Map};

use crate::address_codec::LocalAddress;
use crate::hash::keccak256;

/// Wrapped token address -> base token id
pub const WRAPPED_TO_BASE: Map<&Addr, [u8; 32]> = Map::new("wrapped_to_base");

/// Base token id -> wrapped token address
pub const BASE_TO_WRAPPED: Map<&[u8], Addr> = Map::new("base_to_wrapped");

/// Cached metadata per wrapped token
pub const TOKEN_METADATA: Map<&Addr, TokenMetadata> = Map::new("token_metadata");

/// 20-byte order alias -> token contract
pub const TOKEN_BY_ALIAS: Map<&[u8], Addr> = Map::new("token_by_alias");

const DEFAULT_LIMIT: u32 = 10;
const MAX_LIMIT: u32 = 30;

/// Register a wrapped token for a base token id, overwriting both directions
pub fn register_pair(
    storage: &mut dyn Storage,
    base_token_id: &[u8; 32],
    wrapped: &Addr,
    metadata: &TokenMetadata,
) -> StdResult<()> {
    WRAPPED_TO_BASE.save(storage, wrapped, base_token_id)?;
    BASE_TO_WRAPPED.save(storage, base_token_id.as_slice(), wrapped)?;
    TOKEN_METADATA.save(storage, wrapped, metadata)
}

pub fn wrapped_by_base(storage: &dyn Storage, base_token_id: &[u8; 32]) -> StdResult<Option<Addr>> {
    BASE_TO_WRAPPED.may_load(storage, base_token_id.as_slice())
}

pub fn base_by_wrapped(storage: &dyn Storage, wrapped: &Addr) -> StdResult<Option<[u8; 32]>> {
    WRAPPED_TO_BASE.may_load(storage, wrapped)
}

pub fn metadata(storage: &dyn Storage, wrapped: &Addr) -> StdResult<Option<TokenMetadata>> {
    TOKEN_METADATA.may_load(storage, wrapped)
}

pub fn update_metadata(
    storage: &mut dyn Storage,
    wrapped: &Addr,
    metadata: &TokenMetadata,
) -> StdResult<()> {
    TOKEN_METADATA.save(storage, wrapped, metadata)
}

/// The alias a token is addressed by in mint orders
pub fn token_alias(api: &dyn Api, token: &Addr) -> StdResult<LocalAddress> {
    let canonical = api.addr_canonicalize(token.as_str())?;
    let digest = keccak256(canonical.as_slice());
    let mut alias = [0u8; 20];
    alias.copy_from_slice(&digest[12..]);
    Ok(LocalAddress(alias))
}

/// Make `token` payable by mint orders, returning its alias
pub fn register_alias(
    storage: &mut dyn Storage,
    api: &dyn Api,
    token: &Addr,
) -> StdResult<LocalAddress> {
    let alias = token_alias(api, token)?;
    TOKEN_BY_ALIAS.save(storage, alias.as_bytes().as_slice(), token)?;
    Ok(alias)
}

pub fn token_by_alias(storage: &dyn Storage, alias: &LocalAddress) -> StdResult<Option<Addr>> {
    TOKEN_BY_ALIAS.may_load(storage, alias.as_bytes().as_slice())
}

/// Registered pairs ordered by wrapped address
pub fn pairs(
    storage: &dyn Storage,
    start_after: Option<&Addr>,
    limit: Option<u32>,
) -> StdResult<Vec<(Addr, [u8; 32])>> {
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
    let start = start_after.map(Bound::exclusive);

    WRAPPED_TO_BASE
        .range(storage, start, None, Order::Ascending)
        .take(limit)
        .collect()
}
