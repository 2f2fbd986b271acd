//! Solidity tightly-packed encoding (`abi.encodePacked`).
//!
//! Every field is written at its natural fixed width, big-endian, with no
//! padding and no length prefixes. The contract hashes exactly these bytes,
//! so the layout must stay bit-for-bit identical.

use alloy_primitives::{Address, I256, U256};

/// Builder for a packed byte string
#[derive(Debug, Clone, Default)]
pub struct Packed {
    buf: Vec<u8>,
}

impl Packed {
    pub fn new() -> Self {
        Self::default()
    }

    /// `address`: 20 bytes
    pub fn address(mut self, value: &Address) -> Self {
        self.buf.extend_from_slice(value.as_slice());
        self
    }

    /// `bytes32`: 32 bytes as-is
    pub fn bytes32(mut self, value: &[u8; 32]) -> Self {
        self.buf.extend_from_slice(value);
        self
    }

    /// `uint32`: 4 bytes big-endian
    pub fn uint32(mut self, value: u32) -> Self {
        self.buf.extend_from_slice(&value.to_be_bytes());
        self
    }

    /// `uint256`: 32 bytes big-endian
    pub fn uint256(mut self, value: &U256) -> Self {
        self.buf.extend_from_slice(&value.to_be_bytes::<32>());
        self
    }

    /// `int256`: 32 bytes big-endian two's complement
    pub fn int256(mut self, value: &I256) -> Self {
        self.buf.extend_from_slice(&value.into_raw().to_be_bytes::<32>());
        self
    }

    /// Dynamic `bytes`: appended verbatim
    pub fn bytes(mut self, value: &[u8]) -> Self {
        self.buf.extend_from_slice(value);
        self
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_widths() {
        let packed = Packed::new()
            .address(&Address::repeat_byte(0x11))
            .bytes32(&[0x22; 32])
            .uint32(7)
            .uint256(&U256::from(1u64))
            .int256(&I256::ZERO);
        assert_eq!(packed.len(), 20 + 32 + 4 + 32 + 32);
    }

    #[test]
    fn test_uint32_big_endian() {
        let packed = Packed::new().uint32(0x01020304);
        assert_eq!(packed.as_bytes(), &[1, 2, 3, 4]);
    }

    #[test]
    fn test_int256_negative_is_twos_complement() {
        let minus_one = I256::try_from(-1i64).unwrap();
        let packed = Packed::new().int256(&minus_one);
        assert_eq!(packed.as_bytes(), &[0xff; 32]);

        let minus_two = I256::try_from(-2i64).unwrap();
        let packed = Packed::new().int256(&minus_two);
        let bytes = packed.into_bytes();
        assert!(bytes[..31].iter().all(|b| *b == 0xff));
        assert_eq!(bytes[31], 0xfe);
    }

    #[test]
    fn test_int256_positive_is_left_padded() {
        let amount = I256::try_from(0x0102i64).unwrap();
        let bytes = Packed::new().int256(&amount).into_bytes();
        assert!(bytes[..30].iter().all(|b| *b == 0));
        assert_eq!(&bytes[30..], &[0x01, 0x02]);
    }

    #[test]
    fn test_empty() {
        assert!(Packed::new().is_empty());
        assert!(!Packed::new().bytes(b"x").is_empty());
    }
}
