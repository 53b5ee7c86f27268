use crate::boxes::FourCC;
use crate::parser::{ParseError, Result};
use byteorder::{BigEndian, ReadBytesExt};
use std::io::{Read, Seek, SeekFrom};

/// Big-endian reader over a seekable source of known length.
///
/// Every read checks the remaining length first, so running off the end
/// yields [`ParseError::ShortRead`] instead of a partially filled value.
pub struct BoxReader<R> {
    inner: R,
    len: u64,
    pos: u64,
    truncated: bool,
}

impl<R: Read + Seek> BoxReader<R> {
    /// Wrap `inner`, measuring its length by seeking to the end.
    pub fn new(mut inner: R) -> Result<Self> {
        let len = inner.seek(SeekFrom::End(0))?;
        inner.seek(SeekFrom::Start(0))?;
        Ok(Self { inner, len, pos: 0, truncated: false })
    }

    pub fn len(&self) -> u64 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn position(&self) -> u64 {
        self.pos
    }

    pub fn remaining(&self) -> u64 {
        self.len.saturating_sub(self.pos)
    }

    pub fn seek(&mut self, offset: u64) -> Result<()> {
        self.inner.seek(SeekFrom::Start(offset))?;
        self.pos = offset;
        Ok(())
    }

    /// Set once any range walk stopped because the source ran out.
    pub fn truncated(&self) -> bool {
        self.truncated
    }

    pub(crate) fn mark_truncated(&mut self) {
        self.truncated = true;
    }

    fn ensure(&self, needed: u64) -> Result<()> {
        let available = self.remaining();
        if needed > available {
            return Err(ParseError::ShortRead { offset: self.pos, needed, available });
        }
        Ok(())
    }

    /// Read an unsigned big-endian integer of `width` bytes (1..=8).
    pub fn read_uint(&mut self, width: usize) -> Result<u64> {
        debug_assert!((1..=8).contains(&width));
        self.ensure(width as u64)?;
        let v = self.inner.read_uint::<BigEndian>(width)?;
        self.pos += width as u64;
        Ok(v)
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.read_uint(1)? as u8)
    }

    pub fn read_u24(&mut self) -> Result<u32> {
        Ok(self.read_uint(3)? as u32)
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        Ok(self.read_uint(4)? as u32)
    }

    pub fn read_u64(&mut self) -> Result<u64> {
        self.read_uint(8)
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        self.ensure(4)?;
        let v = self.inner.read_i32::<BigEndian>()?;
        self.pos += 4;
        Ok(v)
    }

    pub fn read_fourcc(&mut self) -> Result<FourCC> {
        self.ensure(4)?;
        let mut b = [0u8; 4];
        self.inner.read_exact(&mut b)?;
        self.pos += 4;
        Ok(FourCC(b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn reads_big_endian_widths() {
        let data = vec![0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09];
        let mut r = BoxReader::new(Cursor::new(data)).unwrap();
        assert_eq!(r.read_u8().unwrap(), 0x01);
        assert_eq!(r.read_uint(2).unwrap(), 0x0203);
        assert_eq!(r.read_u24().unwrap(), 0x040506);
        assert_eq!(r.position(), 6);
        assert_eq!(r.remaining(), 3);
    }

    #[test]
    fn short_read_does_not_consume() {
        let mut r = BoxReader::new(Cursor::new(vec![0u8, 0, 1])).unwrap();
        match r.read_u32() {
            Err(ParseError::ShortRead { offset, needed, available }) => {
                assert_eq!((offset, needed, available), (0, 4, 3));
            }
            other => panic!("expected short read, got {:?}", other),
        }
        assert_eq!(r.position(), 0);
        assert_eq!(r.read_u24().unwrap(), 1);
    }

    #[test]
    fn signed_and_tag_reads() {
        let mut data = (-2i32).to_be_bytes().to_vec();
        data.extend_from_slice(b"moof");
        let mut r = BoxReader::new(Cursor::new(data)).unwrap();
        assert_eq!(r.read_i32().unwrap(), -2);
        assert_eq!(r.read_fourcc().unwrap(), FourCC(*b"moof"));
        assert_eq!(r.remaining(), 0);
    }
}
