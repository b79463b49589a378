//! Common - Shared Types for the Token Bridge Contracts
//!
//! This package describes the contracts the bridge talks to without owning
//! them: the fee-charge oracle and the wrapped token.

pub mod fee_charge;
pub mod token;

pub use fee_charge::{CanPayFeeResponse, FeeChargeExecuteMsg, FeeChargeQueryMsg};
pub use token::{TokenMetadata, WrappedTokenExecuteMsg, WrappedTokenInstantiateMsg};
