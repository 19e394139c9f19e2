//! Little-endian byte-order primitives. Every CIP Safety wire field is
//! little-endian regardless of host byte order; these helpers are the only
//! place that fact is encoded, replacing the reference implementation's
//! three-axis (platform × endianness × word-size) macro matrix with a
//! single LE-only pair per word size.

/// Reads a little-endian `u16` from the first two bytes of `bytes`.
pub fn read_u16_le(bytes: &[u8]) -> u16 {
    u16::from_le_bytes([bytes[0], bytes[1]])
}

/// Writes `value` into the first two bytes of `out` as little-endian.
pub fn write_u16_le(out: &mut [u8], value: u16) {
    out[0..2].copy_from_slice(&value.to_le_bytes());
}

/// Reads a little-endian `u32` from the first four bytes of `bytes`.
pub fn read_u32_le(bytes: &[u8]) -> u32 {
    u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

/// Writes `value` into the first four bytes of `out` as little-endian.
pub fn write_u32_le(out: &mut [u8], value: u32) {
    out[0..4].copy_from_slice(&value.to_le_bytes());
}

/// A length-checked cursor over a byte slice, replacing the reference
/// implementation's pointer-plus-offset idiom. `advance` never reads past
/// the end of the buffer; callers get `None` instead of undefined
/// behavior.
pub struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    /// Wraps `bytes` in a cursor starting at offset 0.
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    /// Returns the next `n` bytes and advances the cursor, or `None` if
    /// fewer than `n` bytes remain.
    pub fn advance(&mut self, n: usize) -> Option<&'a [u8]> {
        let end = self.pos.checked_add(n)?;
        if end > self.bytes.len() {
            return None;
        }
        let slice = &self.bytes[self.pos..end];
        self.pos = end;
        Some(slice)
    }

    /// Returns the remaining, not-yet-read bytes.
    pub fn remaining(&self) -> &'a [u8] {
        &self.bytes[self.pos..]
    }
}

/// A length-checked cursor over a mutable byte slice, used by the producer
/// path to write fields in order without manual offset arithmetic.
pub struct CursorMut<'a> {
    bytes: &'a mut [u8],
    pos: usize,
}

impl<'a> CursorMut<'a> {
    /// Wraps `bytes` in a mutable cursor starting at offset 0.
    pub fn new(bytes: &'a mut [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    /// Returns a mutable view of the next `n` bytes and advances the
    /// cursor, or `None` if fewer than `n` bytes remain.
    pub fn advance(&mut self, n: usize) -> Option<&mut [u8]> {
        let end = self.pos.checked_add(n)?;
        if end > self.bytes.len() {
            return None;
        }
        let slice = &mut self.bytes[self.pos..end];
        self.pos = end;
        Some(slice)
    }

    /// Total bytes written so far.
    pub fn written(&self) -> usize {
        self.pos
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_u16_and_u32() {
        let mut buf = [0u8; 6];
        write_u16_le(&mut buf[0..2], 0xABCD);
        write_u32_le(&mut buf[2..6], 0x1234_5678);
        assert_eq!(read_u16_le(&buf[0..2]), 0xABCD);
        assert_eq!(read_u32_le(&buf[2..6]), 0x1234_5678);
        assert_eq!(buf, [0xCD, 0xAB, 0x78, 0x56, 0x34, 0x12]);
    }

    #[test]
    fn cursor_refuses_to_read_past_the_end() {
        let data = [1u8, 2, 3];
        let mut cur = Cursor::new(&data);
        assert_eq!(cur.advance(2), Some(&data[0..2]));
        assert_eq!(cur.advance(2), None);
        assert_eq!(cur.advance(1), Some(&data[2..3]));
    }

    #[test]
    fn cursor_mut_refuses_to_write_past_the_end() {
        let mut data = [0u8; 3];
        let mut cur = CursorMut::new(&mut data);
        assert!(cur.advance(2).is_some());
        assert!(cur.advance(2).is_none());
        assert_eq!(cur.written(), 2);
    }
}
