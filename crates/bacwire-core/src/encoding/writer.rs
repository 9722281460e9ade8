use crate::EncodeError;

/// Cursor over a caller-owned output buffer.
#[derive(Debug)]
pub struct Writer<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> Writer<'a> {
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    pub const fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.buf.len().saturating_sub(self.pos)
    }

    pub fn as_written(&self) -> &[u8] {
        &self.buf[..self.pos]
    }

    /// Position to hand to [`Writer::rewind`] later.
    pub const fn checkpoint(&self) -> usize {
        self.pos
    }

    /// Moves the cursor back to `pos` and zeroes everything written after it.
    ///
    /// Positions at or beyond the current cursor are ignored.
    pub fn rewind(&mut self, pos: usize) {
        if pos < self.pos {
            self.buf[pos..self.pos].fill(0);
            self.pos = pos;
        }
    }

    /// Runs `f` and rolls the cursor back if it fails, so a failed encode
    /// never leaves a partial value behind.
    pub fn transaction<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, EncodeError>,
    ) -> Result<T, EncodeError> {
        let start = self.checkpoint();
        let out = f(self);
        if out.is_err() {
            self.rewind(start);
        }
        out
    }

    pub fn write_u8(&mut self, value: u8) -> Result<(), EncodeError> {
        self.write_all(&[value])
    }

    /// Writes all of `data` or nothing.
    pub fn write_all(&mut self, data: &[u8]) -> Result<(), EncodeError> {
        let end = self.pos + data.len();
        let dst = self
            .buf
            .get_mut(self.pos..end)
            .ok_or(EncodeError::BufferTooSmall)?;
        dst.copy_from_slice(data);
        self.pos = end;
        Ok(())
    }

    pub fn write_be_u16(&mut self, value: u16) -> Result<(), EncodeError> {
        self.write_all(&value.to_be_bytes())
    }

    pub fn write_be_u32(&mut self, value: u32) -> Result<(), EncodeError> {
        self.write_all(&value.to_be_bytes())
    }
}
