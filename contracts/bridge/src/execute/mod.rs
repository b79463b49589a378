//! Execute handlers for the token bridge contract.
//!
//! - `mint` - signed batch processing
//! - `burn` - burns and minter notifications
//! - `registry` - wrapped token deployment and its reply
//! - `admin` - pause, access lists, fees and upgrades

mod admin;
mod burn;
mod mint;
mod registry;

pub use admin::*;
pub use burn::*;
pub use mint::*;
pub use registry::*;

use cosmwasm_std::Binary;

use crate::error::ContractError;

/// Copy a binary field into a fixed-width array
pub(crate) fn fixed_bytes<const N: usize>(field: &str, value: &Binary) -> Result<[u8; N], ContractError> {
    value
        .as_slice()
        .try_into()
        .map_err(|_| ContractError::InvalidLength {
            field: field.to_string(),
            expected: N,
            got: value.len(),
        })
}
