//! State definitions for the token bridge contract
//!
//! Core configuration, access lists and the two bridge-wide counters. The
//! replay ledger, burn history and token-pair registry keep their storage in
//! their own modules.

use common::TokenMetadata;
use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, StdResult, Storage, Uint128};
use cw_storage_plus::{Item, Map};

// ============================================================================
// Core Configuration
// ============================================================================

/// Contract configuration
#[cw_serde]
pub struct Config {
    /// Owner address for privileged management
    pub owner: Addr,
    /// Whether minting and burning are currently blocked
    pub paused: bool,
    /// Chain id of this chain as used in mint orders
    pub chain_id: u32,
    /// True on the chain that holds wrapped tokens, false on the base chain
    pub is_wrapped_side: bool,
    /// EVM address of the minter authority whose signature covers each batch
    pub minter_address: [u8; 20],
    /// Account submitting batches on behalf of the minter authority
    pub minter_relayer: Option<Addr>,
    /// Bank denom of this chain's native currency
    pub native_denom: String,
    /// Bech32 prefix used to render 20-byte order addresses
    pub address_prefix: String,
    /// Flat fee (in native denom) attached to every burn
    pub burn_fee: Uint128,
    /// Fee-charge oracle billing fee payers of relayed batches
    pub fee_charge: Option<Addr>,
    /// Code id instantiated by `DeployErc20`
    pub wrapped_token_code_id: Option<u64>,
    /// Metadata reported for native-currency burns
    pub native_metadata: TokenMetadata,
}

/// Wrapped token instantiation waiting for its reply
#[cw_serde]
pub struct PendingDeployment {
    pub base_token_id: [u8; 32],
    pub metadata: TokenMetadata,
}

// ============================================================================
// Constants
// ============================================================================

/// Contract name for cw2 migration info
pub const CONTRACT_NAME: &str = "crates.io:token-bridge";

/// Contract version for cw2 migration info
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default bech32 prefix
pub const DEFAULT_ADDRESS_PREFIX: &str = "terra";

/// Reply id of the wrapped token instantiation
pub const DEPLOY_WRAPPED_TOKEN_REPLY_ID: u64 = 1;

pub fn default_native_metadata() -> TokenMetadata {
    TokenMetadata::new("Ethereum", "ETH", 18)
}

// ============================================================================
// Core State Storage
// ============================================================================

/// Primary config storage
pub const CONFIG: Item<Config> = Item::new("config");

/// Controller accounts
/// Key: controller address, Value: whether active
pub const CONTROLLERS: Map<&Addr, bool> = Map::new("controllers");

/// Code checksums the bridge may be upgraded to
/// Key: 32-byte checksum, Value: whether allowed
pub const ALLOWED_IMPLEMENTATIONS: Map<&[u8], bool> = Map::new("allowed_implementations");

/// Next operation id handed out by a burn
pub const OPERATION_ID_COUNTER: Item<u32> = Item::new("operation_id_counter");

/// Burn fees collected since the last withdrawal
pub const COLLECTED_BURN_FEES: Item<Uint128> = Item::new("collected_burn_fees");

/// Operation id by (burner, memo)
pub const MEMO_OPERATIONS: Map<(&Addr, &[u8]), u32> = Map::new("memo_operations");

/// Deployment in flight between `DeployErc20` and its reply
pub const PENDING_DEPLOYMENT: Item<PendingDeployment> = Item::new("pending_deployment");

// ============================================================================
// Counter helpers
// ============================================================================

/// Hand out the current operation id and advance the counter
pub fn next_operation_id(storage: &mut dyn Storage) -> StdResult<u32> {
    let id = OPERATION_ID_COUNTER.may_load(storage)?.unwrap_or_default();
    OPERATION_ID_COUNTER.save(storage, &(id + 1))?;
    Ok(id)
}

pub fn add_collected_burn_fee(storage: &mut dyn Storage, fee: Uint128) -> StdResult<Uint128> {
    let total = COLLECTED_BURN_FEES.may_load(storage)?.unwrap_or_default() + fee;
    COLLECTED_BURN_FEES.save(storage, &total)?;
    Ok(total)
}

/// Reset collected fees to zero, returning the previous total
pub fn take_collected_burn_fees(storage: &mut dyn Storage) -> StdResult<Uint128> {
    let total = COLLECTED_BURN_FEES.may_load(storage)?.unwrap_or_default();
    COLLECTED_BURN_FEES.save(storage, &Uint128::zero())?;
    Ok(total)
}
