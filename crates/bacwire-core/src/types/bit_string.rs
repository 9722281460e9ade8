/// A BACnet bit string.
///
/// Only the first `bits_used` bits of `data` carry meaning. Padding bits in
/// the last byte are zeroed whenever a value is built, decoded or encoded.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BitString {
    bits_used: u32,
    data: Vec<u8>,
}

impl BitString {
    /// Builds a bit string from packed bytes, most significant bit first.
    ///
    /// `data` is truncated or zero-extended to exactly the bytes needed for
    /// `bits_used`.
    pub fn new(bits_used: u32, mut data: Vec<u8>) -> Self {
        data.resize(Self::byte_len(bits_used), 0);
        let mut out = Self { bits_used, data };
        out.clear_padding();
        out
    }

    pub fn from_bits(bits: &[bool]) -> Self {
        let mut out = Self::new(bits.len() as u32, Vec::new());
        for (i, bit) in bits.iter().enumerate() {
            out.set(i as u32, *bit);
        }
        out
    }

    pub const fn bits_used(&self) -> u32 {
        self.bits_used
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Number of padding bits in the final byte, as carried on the wire.
    pub fn unused_bits(&self) -> u8 {
        ((self.data.len() as u32 * 8) - self.bits_used) as u8
    }

    pub fn bit(&self, index: u32) -> bool {
        if index >= self.bits_used {
            return false;
        }
        let byte = self.data[(index / 8) as usize];
        byte & (0x80 >> (index % 8)) != 0
    }

    pub fn set(&mut self, index: u32, value: bool) {
        if index >= self.bits_used {
            return;
        }
        let mask = 0x80 >> (index % 8);
        let byte = &mut self.data[(index / 8) as usize];
        if value {
            *byte |= mask;
        } else {
            *byte &= !mask;
        }
    }

    pub(crate) fn from_wire(unused_bits: u8, data: &[u8]) -> Option<Self> {
        if unused_bits > 7 || (data.is_empty() && unused_bits != 0) {
            return None;
        }
        let bits_used = (data.len() as u32 * 8) - unused_bits as u32;
        Some(Self::new(bits_used, data.to_vec()))
    }

    fn byte_len(bits_used: u32) -> usize {
        bits_used.div_ceil(8) as usize
    }

    fn clear_padding(&mut self) {
        let unused = self.unused_bits();
        if let Some(last) = self.data.last_mut() {
            *last &= 0xFFu8 << unused;
        }
    }
}
