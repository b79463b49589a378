//! Access policy
//!
//! Every privileged entry point goes through one of the `ensure_*` guards
//! below, so the whole policy can be audited in one place.

use cosmwasm_std::{Addr, StdResult, Storage};

use crate::error::ContractError;
use crate::state::{Config, ALLOWED_IMPLEMENTATIONS, CONFIG, CONTROLLERS};

pub fn is_owner(config: &Config, account: &Addr) -> bool {
    &config.owner == account
}

pub fn is_controller(storage: &dyn Storage, account: &Addr) -> StdResult<bool> {
    Ok(CONTROLLERS.may_load(storage, account)?.unwrap_or(false))
}

pub fn is_allowed_implementation(storage: &dyn Storage, checksum: &[u8]) -> StdResult<bool> {
    Ok(ALLOWED_IMPLEMENTATIONS
        .may_load(storage, checksum)?
        .unwrap_or(false))
}

/// Load config, failing unless `account` is the owner
pub fn ensure_owner(storage: &dyn Storage, account: &Addr) -> Result<Config, ContractError> {
    let config = CONFIG.load(storage)?;
    if !is_owner(&config, account) {
        return Err(ContractError::Unauthorized);
    }
    Ok(config)
}

pub fn ensure_controller(storage: &dyn Storage, account: &Addr) -> Result<(), ContractError> {
    if !is_controller(storage, account)? {
        return Err(ContractError::NotController);
    }
    Ok(())
}

pub fn ensure_allowed_implementation(
    storage: &dyn Storage,
    checksum: &[u8],
) -> Result<(), ContractError> {
    if !is_allowed_implementation(storage, checksum)? {
        return Err(ContractError::ImplementationNotAllowed {
            checksum: hex::encode(checksum),
        });
    }
    Ok(())
}

/// Load config, failing while the bridge is paused
pub fn ensure_not_paused(storage: &dyn Storage) -> Result<Config, ContractError> {
    let config = CONFIG.load(storage)?;
    if config.paused {
        return Err(ContractError::BridgePaused);
    }
    Ok(config)
}
