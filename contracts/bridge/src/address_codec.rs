//! Local Address Encoding
//!
//! Mint orders carry every on-chain party (recipient, destination token,
//! approval spender, fee payer) as a raw 20-byte address. On this chain the
//! same 20 bytes are shown as a bech32 string under the configured prefix,
//! e.g. `terra1...`.
//!
//! ## Reserved values
//!
//! - `0x0000…00`: the zero address (no recipient / no spender / no payer)
//! - `0xEEEE…EE`: the native-currency sentinel for `to_token`

use cosmwasm_std::{Addr, StdError, StdResult};

/// A 20-byte address as it appears in the order wire format
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct LocalAddress(pub [u8; 20]);

impl LocalAddress {
    pub const ZERO: LocalAddress = LocalAddress([0u8; 20]);

    /// Sentinel used as `to_token` for native-currency orders
    pub const NATIVE: LocalAddress = LocalAddress([0xEE; 20]);

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    pub fn is_native(&self) -> bool {
        *self == Self::NATIVE
    }

    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Render as a bech32 address with the given prefix
    pub fn to_addr(&self, hrp: &str) -> StdResult<Addr> {
        Ok(Addr::unchecked(encode_bech32_address(&self.0, hrp)?))
    }

    /// Parse a bech32 address, requiring the given prefix
    pub fn from_addr(addr: &Addr, hrp: &str) -> StdResult<Self> {
        let (prefix, raw) = decode_bech32_address(addr.as_str())?;
        if prefix != hrp {
            return Err(StdError::generic_err(format!(
                "Unexpected address prefix: expected {}, got {}",
                hrp, prefix
            )));
        }
        Ok(Self(raw))
    }
}

impl From<[u8; 20]> for LocalAddress {
    fn from(raw: [u8; 20]) -> Self {
        Self(raw)
    }
}

// ============================================================================
// Bech32
// ============================================================================

/// Bech32 character set
const BECH32_CHARSET: &[u8] = b"qpzry9x8gf2tvdw0s3jn54khce6mua7l";

/// Encode raw 20 bytes to a bech32 address with given prefix
pub fn encode_bech32_address(bytes: &[u8; 20], hrp: &str) -> StdResult<String> {
    if hrp.is_empty() || hrp.chars().any(|c| !c.is_ascii_lowercase() && !c.is_ascii_digit()) {
        return Err(StdError::generic_err(format!("Invalid bech32 prefix: {}", hrp)));
    }

    let data5 = convert_bits(bytes, 8, 5, true)?;
    let checksum = compute_bech32_checksum(hrp, &data5);

    Ok(format!(
        "{}1{}{}",
        hrp,
        encode_bech32_data(&data5),
        encode_bech32_data(&checksum)
    ))
}

/// Decode a bech32 address into its prefix and raw 20 bytes
///
/// The checksum is verified.
pub fn decode_bech32_address(addr: &str) -> StdResult<(String, [u8; 20])> {
    let (hrp, data_part) = addr
        .rsplit_once('1')
        .ok_or_else(|| StdError::generic_err("Invalid bech32 format"))?;

    if hrp.is_empty() || data_part.len() < 7 {
        return Err(StdError::generic_err("Bech32 data too short"));
    }

    let values = decode_bech32_data(data_part)?;
    let mut check_input = expand_hrp(hrp);
    check_input.extend_from_slice(&values);
    if bech32_polymod(&check_input) != 1 {
        return Err(StdError::generic_err("Invalid bech32 checksum"));
    }

    let bytes = convert_bits(&values[..values.len() - 6], 5, 8, false)?;
    let raw: [u8; 20] = bytes.as_slice().try_into().map_err(|_| {
        StdError::generic_err(format!(
            "Invalid address length: expected 20 bytes, got {}",
            bytes.len()
        ))
    })?;

    Ok((hrp.to_string(), raw))
}

/// Convert bits between different group sizes
fn convert_bits(data: &[u8], from_bits: u32, to_bits: u32, pad: bool) -> StdResult<Vec<u8>> {
    let mut acc: u32 = 0;
    let mut bits: u32 = 0;
    let mut result = Vec::new();
    let max_v = (1u32 << to_bits) - 1;

    for &value in data {
        acc = (acc << from_bits) | value as u32;
        bits += from_bits;

        while bits >= to_bits {
            bits -= to_bits;
            result.push(((acc >> bits) & max_v) as u8);
        }
    }

    if pad {
        if bits > 0 {
            result.push(((acc << (to_bits - bits)) & max_v) as u8);
        }
    } else if bits >= from_bits || ((acc << (to_bits - bits)) & max_v) != 0 {
        return Err(StdError::generic_err("Invalid padding"));
    }

    Ok(result)
}

fn decode_bech32_data(data: &str) -> StdResult<Vec<u8>> {
    data.chars()
        .map(|c| {
            BECH32_CHARSET
                .iter()
                .position(|&x| x as char == c)
                .map(|idx| idx as u8)
                .ok_or_else(|| StdError::generic_err(format!("Invalid bech32 character: {}", c)))
        })
        .collect()
}

fn encode_bech32_data(data: &[u8]) -> String {
    data.iter()
        .map(|&b| BECH32_CHARSET[b as usize] as char)
        .collect()
}

fn compute_bech32_checksum(hrp: &str, data: &[u8]) -> Vec<u8> {
    let mut values = expand_hrp(hrp);
    values.extend_from_slice(data);
    values.extend_from_slice(&[0, 0, 0, 0, 0, 0]);

    let polymod = bech32_polymod(&values) ^ 1;
    (0..6)
        .map(|i| ((polymod >> (5 * (5 - i))) & 31) as u8)
        .collect()
}

fn expand_hrp(hrp: &str) -> Vec<u8> {
    let mut result = Vec::with_capacity(hrp.len() * 2 + 1);
    result.extend(hrp.bytes().map(|c| c >> 5));
    result.push(0);
    result.extend(hrp.bytes().map(|c| c & 31));
    result
}

fn bech32_polymod(values: &[u8]) -> u32 {
    const GENERATOR: [u32; 5] = [
        0x3b6a_57b2,
        0x2650_8e6d,
        0x1ea1_19fa,
        0x3d42_33dd,
        0x2a14_62b3,
    ];

    let mut chk: u32 = 1;
    for &v in values {
        let top = chk >> 25;
        chk = ((chk & 0x01ff_ffff) << 5) ^ (v as u32);
        for (i, gen) in GENERATOR.iter().enumerate() {
            if (top >> i) & 1 == 1 {
                chk ^= gen;
            }
        }
    }
    chk
}
