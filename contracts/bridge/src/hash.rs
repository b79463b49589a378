//! Hashing helpers shared by the signature verifier and the codecs.
//!
//! Everything here matches the EVM side byte for byte: `keccak256` is the
//! same primitive Solidity exposes, and EVM addresses are derived from the
//! last 20 bytes of the hashed uncompressed public key.

use tiny_keccak::{Hasher, Keccak};

/// Compute keccak256 hash of arbitrary data
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    hasher.update(data);
    let mut output = [0u8; 32];
    hasher.finalize(&mut output);
    output
}

/// Derive an EVM address from a 65-byte uncompressed secp256k1 public key
///
/// Returns `None` if the key is not in uncompressed SEC1 form (`0x04 || X || Y`).
pub fn evm_address_from_pubkey(pubkey: &[u8]) -> Option<[u8; 20]> {
    if pubkey.len() != 65 || pubkey[0] != 0x04 {
        return None;
    }
    let hash = keccak256(&pubkey[1..]);
    let mut address = [0u8; 20];
    address.copy_from_slice(&hash[12..]);
    Some(address)
}

/// Convert bytes to a 0x-prefixed lowercase hex string (for attributes)
pub fn to_hex(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// Parse hex string (with or without 0x prefix) into a fixed-size array
pub fn hex_to_array<const N: usize>(hex_str: &str) -> Result<[u8; N], String> {
    let hex_str = hex_str.strip_prefix("0x").unwrap_or(hex_str);
    if hex_str.len() != N * 2 {
        return Err(format!(
            "Invalid hex length: expected {} characters, got {}",
            N * 2,
            hex_str.len()
        ));
    }

    let mut result = [0u8; N];
    hex::decode_to_slice(hex_str, &mut result).map_err(|e| format!("Invalid hex: {}", e))?;
    Ok(result)
}
