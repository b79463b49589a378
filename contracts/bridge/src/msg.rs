//! Message types for the token bridge contract
//!
//! Instantiation, execution and query messages together with their response
//! shapes.

use common::TokenMetadata;
use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Binary, HexBinary, Uint128};

use crate::fee_charge::MintFeeParams;

// ============================================================================
// Instantiate & Migrate
// ============================================================================

/// Migrate message
#[cw_serde]
pub struct MigrateMsg {}

/// Instantiate message
#[cw_serde]
pub struct InstantiateMsg {
    /// Owner address, also the first controller
    pub owner: String,
    /// EVM address (0x-prefixed hex) of the minter authority signing batches
    pub minter_address: String,
    /// Account relaying batches for the minter authority (enables the fee gate)
    pub minter_relayer: Option<String>,
    /// Chain id of this chain as used in mint orders
    pub chain_id: u32,
    /// True when this deployment holds wrapped tokens
    pub is_wrapped_side: bool,
    /// Bank denom of the native currency
    pub native_denom: String,
    /// Bech32 prefix for order addresses (default "terra")
    pub address_prefix: Option<String>,
    /// Flat fee per burn, in native denom
    pub burn_fee: Uint128,
    /// Fee-charge contract billing relayed batches
    pub fee_charge: Option<String>,
    /// Code id of the wrapped token contract
    pub wrapped_token_code_id: Option<u64>,
    /// Mint fee formula parameters (defaults apply when absent)
    pub mint_fee_params: Option<MintFeeParams>,
    /// Metadata reported for native burns (default Ethereum/ETH/18)
    pub native_metadata: Option<TokenMetadata>,
}

// ============================================================================
// Execute Messages
// ============================================================================

#[cw_serde]
pub enum ExecuteMsg {
    // ========================================================================
    // Bridge Operations
    // ========================================================================
    /// Process a signed batch of 269-byte mint orders
    ///
    /// Response data holds one status byte per order.
    BatchMint {
        encoded_orders: Binary,
        signature: Binary,
        /// Indices to process; empty means all
        orders_to_process: Vec<u32>,
    },

    /// Lock tokens for minting on the other side
    ///
    /// `from_token` is either the native denom or a cw20 address. Response
    /// data holds the allocated operation id.
    Burn {
        amount: Uint128,
        from_token: String,
        /// 32-byte token id on the destination chain (zero for native)
        to_token_id: Binary,
        /// Recipient on the destination chain, opaque bytes
        recipient_id: Binary,
        /// Optional 32-byte memo
        memo: Option<Binary>,
    },

    /// Forward an arbitrary notification to the off-chain minter
    NotifyMinter {
        notification_type: u32,
        user_data: Binary,
        memo: Option<Binary>,
    },

    // ========================================================================
    // Token Registry (controller)
    // ========================================================================
    /// Instantiate a wrapped token for a base token id
    DeployErc20 {
        name: String,
        symbol: String,
        decimals: u8,
        base_token_id: Binary,
    },
    /// Make an existing cw20 payable by mint orders under its 20-byte alias
    /// (owner only). Deployed wrapped tokens are aliased automatically.
    RegisterTokenAlias { token: String },

    // ========================================================================
    // Pause (controller)
    // ========================================================================
    Pause {},
    Unpause {},

    // ========================================================================
    // Access Control
    // ========================================================================
    /// Owner only
    AddController { controller: String },
    /// Owner only
    RemoveController { controller: String },
    /// Controller only
    AddAllowedImplementation { checksum: HexBinary },
    /// Owner only
    RemoveAllowedImplementation { checksum: HexBinary },

    // ========================================================================
    // Fees (owner)
    // ========================================================================
    UpdateBurnFee { fee: Uint128 },
    /// Send all collected burn fees to the owner
    WithdrawBurnFees {},
    UpdateMintFeeParams { params: MintFeeParams },
    SetFeeCharge { fee_charge: Option<String> },
    SetMinterRelayer { relayer: Option<String> },

    // ========================================================================
    // Upgrade (owner)
    // ========================================================================
    /// Migrate the bridge to an allow-listed code id
    Upgrade { new_code_id: u64, msg: Binary },
}

// ============================================================================
// Query Messages
// ============================================================================

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(ConfigResponse)]
    Config {},

    #[returns(MintFeeParams)]
    MintFeeParams {},

    /// Fee a relayed batch would charge per order
    #[returns(EstimateMintFeeResponse)]
    EstimateMintFee { successful_orders: u64 },

    #[returns(IsNonceUsedResponse)]
    IsNonceUsed { sender_id: Binary, nonce: u32 },

    /// Burn heights of an account, oldest first
    #[returns(BurnHistoryResponse)]
    BurnHistory { account: String },

    #[returns(WrappedTokenResponse)]
    WrappedToken { base_token_id: Binary },

    #[returns(BaseTokenResponse)]
    BaseToken { wrapped_token: String },

    #[returns(TokenPairsResponse)]
    TokenPairs {
        start_after: Option<String>,
        limit: Option<u32>,
    },

    #[returns(TokenMetadataResponse)]
    TokenMetadata { wrapped_token: String },

    /// The 20-byte alias mint orders use for `token`
    #[returns(TokenAliasResponse)]
    TokenAlias { token: String },

    #[returns(TokenByAliasResponse)]
    TokenByAlias { alias: HexBinary },

    #[returns(CollectedBurnFeesResponse)]
    CollectedBurnFees {},

    #[returns(OperationIdCounterResponse)]
    OperationIdCounter {},

    #[returns(OperationByMemoResponse)]
    OperationByMemo { user: String, memo: Binary },

    #[returns(UserMemosResponse)]
    UserMemos {
        user: String,
        start_after: Option<Binary>,
        limit: Option<u32>,
    },

    #[returns(ControllersResponse)]
    Controllers {
        start_after: Option<String>,
        limit: Option<u32>,
    },

    #[returns(IsControllerResponse)]
    IsController { account: String },

    #[returns(AllowedImplementationsResponse)]
    AllowedImplementations {
        start_after: Option<HexBinary>,
        limit: Option<u32>,
    },
}

// ============================================================================
// Query Responses
// ============================================================================

#[cw_serde]
pub struct ConfigResponse {
    pub owner: Addr,
    pub paused: bool,
    pub chain_id: u32,
    pub is_wrapped_side: bool,
    /// 0x-prefixed hex
    pub minter_address: String,
    pub minter_relayer: Option<Addr>,
    pub native_denom: String,
    pub address_prefix: String,
    pub burn_fee: Uint128,
    pub fee_charge: Option<Addr>,
    pub wrapped_token_code_id: Option<u64>,
    pub native_metadata: TokenMetadata,
}

#[cw_serde]
pub struct EstimateMintFeeResponse {
    pub fee_per_order: Uint128,
    pub min_deposit: Uint128,
}

#[cw_serde]
pub struct IsNonceUsedResponse {
    pub used: bool,
}

#[cw_serde]
pub struct BurnHistoryResponse {
    pub heights: Vec<u64>,
}

#[cw_serde]
pub struct WrappedTokenResponse {
    pub wrapped_token: Option<Addr>,
}

#[cw_serde]
pub struct BaseTokenResponse {
    pub base_token_id: Option<Binary>,
}

#[cw_serde]
pub struct TokenPairResponse {
    pub wrapped_token: Addr,
    pub base_token_id: Binary,
}

#[cw_serde]
pub struct TokenPairsResponse {
    pub pairs: Vec<TokenPairResponse>,
}

#[cw_serde]
pub struct TokenMetadataResponse {
    pub metadata: Option<TokenMetadata>,
}

#[cw_serde]
pub struct TokenAliasResponse {
    pub alias: HexBinary,
    /// Whether mint orders naming `alias` resolve to the token
    pub registered: bool,
}

#[cw_serde]
pub struct TokenByAliasResponse {
    pub token: Option<Addr>,
}

#[cw_serde]
pub struct CollectedBurnFeesResponse {
    pub amount: Uint128,
}

#[cw_serde]
pub struct OperationIdCounterResponse {
    /// Id the next burn will receive
    pub next_operation_id: u32,
}

#[cw_serde]
pub struct OperationByMemoResponse {
    pub operation_id: Option<u32>,
}

#[cw_serde]
pub struct MemoEntry {
    pub memo: Binary,
    pub operation_id: u32,
}

#[cw_serde]
pub struct UserMemosResponse {
    pub memos: Vec<MemoEntry>,
}

#[cw_serde]
pub struct ControllersResponse {
    pub controllers: Vec<Addr>,
}

#[cw_serde]
pub struct IsControllerResponse {
    pub is_controller: bool,
}

#[cw_serde]
pub struct AllowedImplementationsResponse {
    pub checksums: Vec<HexBinary>,
}
