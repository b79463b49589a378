//! Token Bridge Contract - Cross-Chain Mint/Burn Settlement
//!
//! This contract settles transfers between this chain and a peer chain on
//! behalf of an off-chain minter authority.
//!
//! # Mint Flow (BatchMint)
//! 1. The minter authority signs a batch of fixed-width mint orders
//! 2. A relayer submits the batch; the signature covers the whole payload
//! 3. Every selected order is admitted or rejected on its own
//! 4. Admitted orders are paid out from bridge custody
//! 5. Fees are charged and `minted` events emitted for the successes
//!
//! # Burn Flow
//! 1. A user burns native currency or cw20 tokens, attaching the burn fee
//! 2. The bridge takes custody and records the burn height
//! 3. A `burnt` event with a fresh operation id is emitted for the minter
//!
//! # Security
//! - Whole-batch signature verification against the minter address
//! - Replay protection keyed by (sender id, nonce)
//! - Emergency pause by controllers
//! - Upgrades restricted to allow-listed code checksums

pub mod address_codec;
pub mod auth;
pub mod burn_history;
pub mod contract;
pub mod error;
mod execute;
pub mod fee_charge;
pub mod hash;
pub mod msg;
pub mod order;
mod query;
pub mod registry;
pub mod replay;
pub mod signature;
pub mod state;
pub mod validator;

pub use crate::address_codec::LocalAddress;
pub use crate::error::ContractError;
pub use crate::hash::keccak256;
pub use crate::order::{MintOrder, OrderBatch, ORDER_SIZE};
pub use crate::validator::MintResult;
