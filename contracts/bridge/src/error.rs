//! Error types for the token bridge contract
//!
//! Every variant here aborts the whole call. Per-order rejections inside a
//! batch are not errors; they are reported as [`crate::validator::MintResult`]
//! codes in the batch result.

use cosmwasm_std::{StdError, Uint128};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    // ========================================================================
    // Authorization Errors
    // ========================================================================

    #[error("Unauthorized: only owner can perform this action")]
    Unauthorized,

    #[error("Unauthorized: caller is not a controller")]
    NotController,

    #[error("Implementation not allowed: checksum {checksum}")]
    ImplementationNotAllowed { checksum: String },

    // ========================================================================
    // Bridge State Errors
    // ========================================================================

    #[error("Bridge is paused")]
    BridgePaused,

    #[error("Bridge is not paused")]
    BridgeNotPaused,

    // ========================================================================
    // Batch Envelope Errors
    // ========================================================================

    #[error("Empty order batch")]
    EmptyBatch,

    #[error("Misaligned order batch: length {len} is not a multiple of {order_size}")]
    MisalignedBatch { len: usize, order_size: usize },

    #[error("Order index {index} out of range for batch of {count} orders")]
    OrderIndexOutOfRange { index: u32, count: usize },

    #[error("Malformed signature: {reason}")]
    MalformedSignature { reason: String },

    #[error("Unexpected signer: expected {expected}, recovered {recovered}")]
    UnexpectedSigner { expected: String, recovered: String },

    // ========================================================================
    // Mint Application Errors
    // ========================================================================

    #[error("Insufficient native balance: need {needed}, have {available}")]
    InsufficientNativeBalance { needed: Uint128, available: Uint128 },

    #[error("Amount {amount} does not fit into a 128-bit coin amount")]
    AmountOverflow { amount: String },

    // ========================================================================
    // Burn Errors
    // ========================================================================

    #[error("Invalid amount: {reason}")]
    InvalidAmount { reason: String },

    #[error("Invalid attached funds: expected {expected}, got {got}")]
    InvalidFunds { expected: Uint128, got: Uint128 },

    #[error("Operation not allowed on this side of the bridge")]
    SideMismatch,

    #[error("Token not registered: {token}")]
    TokenNotRegistered { token: String },

    #[error("Invalid length for {field}: expected {expected} bytes, got {got}")]
    InvalidLength {
        field: String,
        expected: usize,
        got: usize,
    },

    // ========================================================================
    // Fee Errors
    // ========================================================================

    #[error("No burn fees to withdraw")]
    NoFeesToWithdraw,

    // ========================================================================
    // Registry Errors
    // ========================================================================

    #[error("Wrapped token code id not configured")]
    WrappedTokenCodeNotSet,

    #[error("Wrapped token already deployed for base token {base_token_id}")]
    TokenAlreadyDeployed { base_token_id: String },

    #[error("No pending wrapped token deployment")]
    NoPendingDeployment,

    #[error("Unknown reply id: {id}")]
    UnknownReplyId { id: u64 },

    // ========================================================================
    // Validation Errors
    // ========================================================================

    #[error("Invalid address: {reason}")]
    InvalidAddress { reason: String },
}
