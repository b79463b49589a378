//! Mint order wire format.
//!
//! Every order is exactly [`ORDER_SIZE`] bytes; a batch is a plain
//! concatenation of orders with no delimiter. The layout is shared with the
//! off-chain order signer and must stay byte-exact.
//!
//! # Byte Layout (269 bytes total)
//!
//! | Field              | Width | Encoding                    |
//! |--------------------|-------|-----------------------------|
//! | amount             | 32    | uint256, big-endian         |
//! | sender_id          | 32    | opaque                      |
//! | from_token_id      | 32    | opaque                      |
//! | recipient          | 20    | address                     |
//! | to_token           | 20    | address (0xEE..EE = native) |
//! | nonce              | 4     | uint32, big-endian          |
//! | sender_chain_id    | 4     | uint32, big-endian          |
//! | recipient_chain_id | 4     | uint32, big-endian          |
//! | name               | 32    | UTF-8, NUL padded           |
//! | symbol             | 16    | UTF-8, NUL padded           |
//! | decimals           | 1     | uint8                       |
//! | approve_spender    | 20    | address                     |
//! | approve_amount     | 32    | uint256, big-endian         |
//! | fee_payer          | 20    | address                     |

use cosmwasm_std::Uint256;

use crate::address_codec::LocalAddress;
use crate::error::ContractError;

/// Order fields in wire order
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OrderField {
    Amount,
    SenderId,
    FromTokenId,
    Recipient,
    ToToken,
    Nonce,
    SenderChainId,
    RecipientChainId,
    Name,
    Symbol,
    Decimals,
    ApproveSpender,
    ApproveAmount,
    FeePayer,
}

/// Field widths in wire order
pub const ORDER_SCHEMA: [(OrderField, usize); 14] = [
    (OrderField::Amount, 32),
    (OrderField::SenderId, 32),
    (OrderField::FromTokenId, 32),
    (OrderField::Recipient, 20),
    (OrderField::ToToken, 20),
    (OrderField::Nonce, 4),
    (OrderField::SenderChainId, 4),
    (OrderField::RecipientChainId, 4),
    (OrderField::Name, 32),
    (OrderField::Symbol, 16),
    (OrderField::Decimals, 1),
    (OrderField::ApproveSpender, 20),
    (OrderField::ApproveAmount, 32),
    (OrderField::FeePayer, 20),
];

/// Start offset of every field, derived from [`ORDER_SCHEMA`]
pub const ORDER_OFFSETS: [usize; 14] = {
    let mut offsets = [0usize; 14];
    let mut i = 1;
    while i < ORDER_SCHEMA.len() {
        offsets[i] = offsets[i - 1] + ORDER_SCHEMA[i - 1].1;
        i += 1;
    }
    offsets
};

/// Size of a single encoded order
pub const ORDER_SIZE: usize = {
    let mut total = 0usize;
    let mut i = 0;
    while i < ORDER_SCHEMA.len() {
        total += ORDER_SCHEMA[i].1;
        i += 1;
    }
    total
};

pub const NAME_LEN: usize = 32;
pub const SYMBOL_LEN: usize = 16;

/// A decoded mint order
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MintOrder {
    pub amount: Uint256,
    pub sender_id: [u8; 32],
    pub from_token_id: [u8; 32],
    pub recipient: LocalAddress,
    pub to_token: LocalAddress,
    pub nonce: u32,
    pub sender_chain_id: u32,
    pub recipient_chain_id: u32,
    pub name: [u8; NAME_LEN],
    pub symbol: [u8; SYMBOL_LEN],
    pub decimals: u8,
    pub approve_spender: LocalAddress,
    pub approve_amount: Uint256,
    pub fee_payer: LocalAddress,
}

impl MintOrder {
    /// Decode a single order. Total over any 269-byte input.
    pub fn decode(bytes: &[u8; ORDER_SIZE]) -> Self {
        let mut cursor = OrderCursor::new(bytes);
        Self {
            amount: Uint256::from_be_bytes(cursor.read(OrderField::Amount)),
            sender_id: cursor.read(OrderField::SenderId),
            from_token_id: cursor.read(OrderField::FromTokenId),
            recipient: LocalAddress(cursor.read(OrderField::Recipient)),
            to_token: LocalAddress(cursor.read(OrderField::ToToken)),
            nonce: u32::from_be_bytes(cursor.read(OrderField::Nonce)),
            sender_chain_id: u32::from_be_bytes(cursor.read(OrderField::SenderChainId)),
            recipient_chain_id: u32::from_be_bytes(cursor.read(OrderField::RecipientChainId)),
            name: cursor.read(OrderField::Name),
            symbol: cursor.read(OrderField::Symbol),
            decimals: cursor.read::<1>(OrderField::Decimals)[0],
            approve_spender: LocalAddress(cursor.read(OrderField::ApproveSpender)),
            approve_amount: Uint256::from_be_bytes(cursor.read(OrderField::ApproveAmount)),
            fee_payer: LocalAddress(cursor.read(OrderField::FeePayer)),
        }
    }

    /// Encode into the 269-byte wire format
    pub fn encode(&self) -> [u8; ORDER_SIZE] {
        let mut out = [0u8; ORDER_SIZE];
        let mut writer = OrderWriter::new(&mut out);
        writer.write(OrderField::Amount, &self.amount.to_be_bytes());
        writer.write(OrderField::SenderId, &self.sender_id);
        writer.write(OrderField::FromTokenId, &self.from_token_id);
        writer.write(OrderField::Recipient, self.recipient.as_bytes());
        writer.write(OrderField::ToToken, self.to_token.as_bytes());
        writer.write(OrderField::Nonce, &self.nonce.to_be_bytes());
        writer.write(OrderField::SenderChainId, &self.sender_chain_id.to_be_bytes());
        writer.write(OrderField::RecipientChainId, &self.recipient_chain_id.to_be_bytes());
        writer.write(OrderField::Name, &self.name);
        writer.write(OrderField::Symbol, &self.symbol);
        writer.write(OrderField::Decimals, &[self.decimals]);
        writer.write(OrderField::ApproveSpender, self.approve_spender.as_bytes());
        writer.write(OrderField::ApproveAmount, &self.approve_amount.to_be_bytes());
        writer.write(OrderField::FeePayer, self.fee_payer.as_bytes());
        out
    }

    /// Token name with NUL padding removed
    pub fn name_str(&self) -> String {
        fixed_bytes_to_string(&self.name)
    }

    /// Token symbol with NUL padding removed
    pub fn symbol_str(&self) -> String {
        fixed_bytes_to_string(&self.symbol)
    }
}

/// Read-only cursor over one encoded order
///
/// Reads must follow [`ORDER_SCHEMA`] order; every read is checked against
/// the declared width of the field.
pub struct OrderCursor<'a> {
    bytes: &'a [u8; ORDER_SIZE],
    index: usize,
}

impl<'a> OrderCursor<'a> {
    pub fn new(bytes: &'a [u8; ORDER_SIZE]) -> Self {
        Self { bytes, index: 0 }
    }

    pub fn read<const N: usize>(&mut self, field: OrderField) -> [u8; N] {
        let (expected, width) = ORDER_SCHEMA[self.index];
        debug_assert_eq!(expected, field, "order fields read out of order");
        debug_assert_eq!(width, N, "order field width mismatch");

        let start = ORDER_OFFSETS[self.index];
        let mut out = [0u8; N];
        out.copy_from_slice(&self.bytes[start..start + N]);
        self.index += 1;
        out
    }
}

struct OrderWriter<'a> {
    bytes: &'a mut [u8; ORDER_SIZE],
    index: usize,
}

impl<'a> OrderWriter<'a> {
    fn new(bytes: &'a mut [u8; ORDER_SIZE]) -> Self {
        Self { bytes, index: 0 }
    }

    fn write(&mut self, field: OrderField, value: &[u8]) {
        let (expected, width) = ORDER_SCHEMA[self.index];
        debug_assert_eq!(expected, field, "order fields written out of order");
        debug_assert_eq!(width, value.len(), "order field width mismatch");

        let start = ORDER_OFFSETS[self.index];
        self.bytes[start..start + width].copy_from_slice(value);
        self.index += 1;
    }
}

/// A framed batch of encoded orders
#[derive(Clone, Copy, Debug)]
pub struct OrderBatch<'a> {
    bytes: &'a [u8],
}

impl<'a> OrderBatch<'a> {
    /// Validate framing. Nothing is decoded here.
    pub fn new(bytes: &'a [u8]) -> Result<Self, ContractError> {
        if bytes.is_empty() {
            return Err(ContractError::EmptyBatch);
        }
        if bytes.len() % ORDER_SIZE != 0 {
            return Err(ContractError::MisalignedBatch {
                len: bytes.len(),
                order_size: ORDER_SIZE,
            });
        }
        Ok(Self { bytes })
    }

    /// Number of orders in the batch, never zero
    pub fn count(&self) -> usize {
        self.bytes.len() / ORDER_SIZE
    }

    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// Window of the `index`-th order, `None` past the end
    pub fn slice(&self, index: usize) -> Option<&'a [u8; ORDER_SIZE]> {
        slice_batch(self.bytes, index)
    }

    /// Decode the `index`-th order, `None` past the end
    pub fn order(&self, index: usize) -> Option<MintOrder> {
        self.slice(index).map(MintOrder::decode)
    }
}

/// Extract the `index`-th order window from raw batch bytes
pub fn slice_batch(bytes: &[u8], index: usize) -> Option<&[u8; ORDER_SIZE]> {
    let start = index.checked_mul(ORDER_SIZE)?;
    let end = start.checked_add(ORDER_SIZE)?;
    bytes.get(start..end)?.try_into().ok()
}

/// Truncate a UTF-8 string into a NUL-padded fixed-width field
///
/// Truncation never splits a multi-byte character.
pub fn truncate_utf8<const N: usize>(s: &str) -> [u8; N] {
    let mut end = s.len().min(N);
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    let mut out = [0u8; N];
    out[..end].copy_from_slice(&s.as_bytes()[..end]);
    out
}

/// Decode a NUL-padded fixed-width field
pub(crate) fn fixed_bytes_to_string(bytes: &[u8]) -> String {
    let end = bytes.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
    String::from_utf8_lossy(&bytes[..end]).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_order() -> MintOrder {
        MintOrder {
            amount: Uint256::from(1_000u128),
            sender_id: [0x11; 32],
            from_token_id: [0x22; 32],
            recipient: LocalAddress([0x33; 20]),
            to_token: LocalAddress([0x44; 20]),
            nonce: 7,
            sender_chain_id: 355113,
            recipient_chain_id: 1,
            name: truncate_utf8("Wrapped Token"),
            symbol: truncate_utf8("WTKN"),
            decimals: 18,
            approve_spender: LocalAddress([0x55; 20]),
            approve_amount: Uint256::MAX,
            fee_payer: LocalAddress([0x66; 20]),
        }
    }

    #[test]
    fn test_layout_constants() {
        assert_eq!(ORDER_SIZE, 269);
        assert_eq!(ORDER_OFFSETS[0], 0);
        assert_eq!(ORDER_OFFSETS[3], 96); // recipient
        assert_eq!(ORDER_OFFSETS[5], 136); // nonce
        assert_eq!(ORDER_OFFSETS[8], 148); // name
        assert_eq!(ORDER_OFFSETS[10], 196); // decimals
        assert_eq!(ORDER_OFFSETS[13], 249); // fee_payer
    }

    #[test]
    fn test_encode_decode_roundtrip() {
        let order = sample_order();
        let encoded = order.encode();
        assert_eq!(MintOrder::decode(&encoded), order);
    }

    #[test]
    fn test_field_positions_are_big_endian() {
        let encoded = sample_order().encode();

        // amount 1000 = 0x03e8 in the last two bytes of the first word
        assert_eq!(&encoded[30..32], &[0x03, 0xe8]);
        assert!(encoded[..30].iter().all(|&b| b == 0));

        // nonce 7
        assert_eq!(&encoded[136..140], &[0, 0, 0, 7]);

        // recipient chain id 1
        assert_eq!(&encoded[144..148], &[0, 0, 0, 1]);

        // decimals
        assert_eq!(encoded[196], 18);
    }

    #[test]
    fn test_batch_framing() {
        assert!(matches!(
            OrderBatch::new(&[]),
            Err(ContractError::EmptyBatch)
        ));
        assert!(matches!(
            OrderBatch::new(&[0u8; ORDER_SIZE + 1]),
            Err(ContractError::MisalignedBatch { len: 270, .. })
        ));

        let mut bytes = sample_order().encode().to_vec();
        let mut second = sample_order();
        second.nonce = 8;
        bytes.extend_from_slice(&second.encode());

        let batch = OrderBatch::new(&bytes).unwrap();
        assert_eq!(batch.count(), 2);
        assert_eq!(batch.order(1).unwrap().nonce, 8);
        assert!(batch.order(2).is_none());
    }

    #[test]
    fn test_truncate_utf8_respects_char_boundary() {
        // 15 ASCII bytes + a 2-byte character straddles the 16-byte limit
        let symbol: [u8; 16] = truncate_utf8("ABCDEFGHIJKLMNOé");
        assert_eq!(&symbol[..15], b"ABCDEFGHIJKLMNO");
        assert_eq!(symbol[15], 0);

        let order = MintOrder {
            symbol,
            ..sample_order()
        };
        assert_eq!(order.symbol_str(), "ABCDEFGHIJKLMNO");
        assert_eq!(order.name_str(), "Wrapped Token");
    }
}
