//! Batch signature verification
//!
//! The minter authority signs `keccak256(payload)` directly, where the payload
//! is the whole concatenated batch. No message prefix is applied. Signatures
//! are the 65-byte `r || s || v` form produced by EVM tooling.

use cosmwasm_std::Api;

use crate::error::ContractError;
use crate::hash::{evm_address_from_pubkey, keccak256, to_hex};

/// Length of an `r || s || v` signature
pub const SIGNATURE_LEN: usize = 65;

/// Split a signature into its 64-byte body and normalized recovery id
///
/// Accepts `v` as either `{0, 1}` or the legacy `{27, 28}`.
pub fn split_signature(signature: &[u8]) -> Result<(&[u8], u8), ContractError> {
    if signature.len() != SIGNATURE_LEN {
        return Err(ContractError::MalformedSignature {
            reason: format!(
                "expected {} bytes, got {}",
                SIGNATURE_LEN,
                signature.len()
            ),
        });
    }

    let recovery_id = match signature[64] {
        v @ (0 | 1) => v,
        v @ (27 | 28) => v - 27,
        v => {
            return Err(ContractError::MalformedSignature {
                reason: format!("invalid recovery id {}", v),
            })
        }
    };

    Ok((&signature[..64], recovery_id))
}

/// Recover the EVM address that signed `keccak256(payload)`
pub fn recover_signer(
    api: &dyn Api,
    payload: &[u8],
    signature: &[u8],
) -> Result<[u8; 20], ContractError> {
    let (body, recovery_id) = split_signature(signature)?;
    let hash = keccak256(payload);

    let pubkey = api
        .secp256k1_recover_pubkey(&hash, body, recovery_id)
        .map_err(|e| ContractError::MalformedSignature {
            reason: e.to_string(),
        })?;

    evm_address_from_pubkey(&pubkey).ok_or_else(|| ContractError::MalformedSignature {
        reason: "recovered key is not an uncompressed secp256k1 key".to_string(),
    })
}

/// Verify that `signature` over `payload` was produced by `expected`
pub fn verify_batch_signature(
    api: &dyn Api,
    payload: &[u8],
    signature: &[u8],
    expected: &[u8; 20],
) -> Result<(), ContractError> {
    let recovered = recover_signer(api, payload, signature)?;
    if &recovered != expected {
        return Err(ContractError::UnexpectedSigner {
            expected: to_hex(expected),
            recovered: to_hex(&recovered),
        });
    }
    Ok(())
}
