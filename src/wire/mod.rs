//! Cursor-based big-endian readers over a resource blob, in the spirit of the
//! `ToFromNetworkOrder` primitives: every read advances a `(pos, remaining)` cursor
//! and fails the whole decode rather than returning a partial value.
use byteorder::{BigEndian, ByteOrder};

use crate::error::DNSError;
use crate::error::DNSResult;

pub mod name;

/// Printable-ASCII guard applied to every textual field: tab, LF, CR, or
/// `0x20..=0x7E`. `0x7F` (DEL) and other control bytes are rejected.
pub fn is_printable(byte: u8) -> bool {
    matches!(byte, 0x20..=0x7E | 0x09 | 0x0A | 0x0D)
}

pub struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Reader { buf, pos: 0 }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.pos >= self.buf.len()
    }

    pub fn whole_buffer(&self) -> &'a [u8] {
        self.buf
    }

    fn take(&mut self, n: usize) -> DNSResult<&'a [u8]> {
        if self.remaining() < n {
            return Err(DNSError::malformed(format!(
                "expected {} more bytes, only {} remain",
                n,
                self.remaining()
            )));
        }
        let slice = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    pub fn read_u8(&mut self) -> DNSResult<u8> {
        Ok(self.take(1)?[0])
    }

    pub fn read_u16(&mut self) -> DNSResult<u16> {
        Ok(BigEndian::read_u16(self.take(2)?))
    }

    pub fn read_u32(&mut self) -> DNSResult<u32> {
        Ok(BigEndian::read_u32(self.take(4)?))
    }

    pub fn read_i32(&mut self) -> DNSResult<i32> {
        Ok(BigEndian::read_i32(self.take(4)?))
    }

    pub fn read_bytes(&mut self, n: usize) -> DNSResult<Vec<u8>> {
        Ok(self.take(n)?.to_vec())
    }

    pub fn read_fixed<const N: usize>(&mut self) -> DNSResult<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    /// Reads a length-prefixed string, enforcing the printable-ASCII rule and the
    /// caller-supplied length cap.
    pub fn read_string(&mut self, limit: usize) -> DNSResult<String> {
        let len = self.read_u8()? as usize;
        if len > limit {
            return Err(DNSError::malformed(format!(
                "string of length {} exceeds cap of {}",
                len, limit
            )));
        }
        let bytes = self.take(len)?;
        for &b in bytes {
            if !is_printable(b) {
                return Err(DNSError::malformed(format!(
                    "non-printable byte {:#04x} in string field",
                    b
                )));
            }
        }
        // every byte was verified ASCII above, so this can't fail
        Ok(bytes.iter().map(|&b| b as char).collect())
    }

    /// Reads a compressed DNS name, resolving pointers against the whole blob.
    pub fn read_name(&mut self) -> DNSResult<String> {
        let (name, next) = name::decode_name(self.buf, self.pos)?;
        self.pos = next;
        Ok(name)
    }
}
