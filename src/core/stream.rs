// Big-endian primitives over a byte stream, with offset tracking for errors

use crate::core::error::{PlotError, Result};
use crate::core::token::FixedStr;
use std::io::{self, Read};

pub struct PlotStream<R> {
    inner: R,
    offset: u64,
}

impl<R: Read> PlotStream<R> {
    pub fn new(inner: R) -> Self {
        Self { inner, offset: 0 }
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn into_inner(self) -> R {
        self.inner
    }

    /// Fills `buf` completely; a short read is `UnexpectedEndOfFile`.
    pub fn read_exact(&mut self, buf: &mut [u8], field: &'static str) -> Result<()> {
        match self.inner.read_exact(buf) {
            Ok(()) => {
                self.offset += buf.len() as u64;
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                Err(PlotError::UnexpectedEndOfFile {
                    offset: self.offset,
                    field,
                })
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Discards `n` bytes.
    pub fn skip(&mut self, n: u64, field: &'static str) -> Result<()> {
        let copied = io::copy(&mut (&mut self.inner).take(n), &mut io::sink())?;
        self.offset += copied;
        if copied < n {
            return Err(PlotError::UnexpectedEndOfFile {
                offset: self.offset,
                field,
            });
        }
        Ok(())
    }

    pub fn read_token<const N: usize>(&mut self, field: &'static str) -> Result<FixedStr<N>> {
        let mut buf = [0u8; N];
        self.read_exact(&mut buf, field)?;
        Ok(FixedStr::new(buf))
    }

    /// Reads `N` big-endian 32-bit words as signed integers.
    pub fn read_i32s<const N: usize>(&mut self, field: &'static str) -> Result<[i32; N]> {
        let mut out = [0i32; N];
        let words = self.read_words(N, field)?;
        for (dst, word) in out.iter_mut().zip(words) {
            *dst = word as i32;
        }
        Ok(out)
    }

    /// Reads exactly `n` bytes. The buffer grows with the bytes actually
    /// present, so a corrupt length cannot force a huge allocation.
    pub fn read_bytes(&mut self, n: u64, field: &'static str) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        let read = (&mut self.inner).take(n).read_to_end(&mut buf)? as u64;
        self.offset += read;
        if read < n {
            return Err(PlotError::UnexpectedEndOfFile {
                offset: self.offset,
                field,
            });
        }
        Ok(buf)
    }

    /// Reads `count` big-endian 32-bit words in host order.
    pub fn read_words(&mut self, count: usize, field: &'static str) -> Result<Vec<u32>> {
        let buf = self.read_bytes(count as u64 * 4, field)?;
        Ok(buf
            .chunks_exact(4)
            .map(|c| u32::from_be_bytes([c[0], c[1], c[2], c[3]]))
            .collect())
    }

    /// Reads `count` big-endian words and reinterprets each bit pattern as
    /// an IEEE float.
    pub fn read_f32s(&mut self, count: usize, field: &'static str) -> Result<Vec<f32>> {
        Ok(self
            .read_words(count, field)?
            .into_iter()
            .map(f32::from_bits)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_words_are_big_endian() {
        let bytes = [0x00, 0x00, 0x00, 0x02, 0xff, 0xff, 0xff, 0xfe];
        let mut s = PlotStream::new(&bytes[..]);
        assert_eq!(s.read_i32s::<2>("ints").unwrap(), [2, -2]);
        assert_eq!(s.offset(), 8);
    }

    #[test]
    fn test_floats_are_bit_reinterpreted() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&12.5f32.to_bits().to_be_bytes());
        bytes.extend_from_slice(&1u32.to_be_bytes());
        let mut s = PlotStream::new(&bytes[..]);
        let values = s.read_f32s(2, "values").unwrap();
        assert_eq!(values[0], 12.5);
        // A numeric cast would give 1.0
        assert_eq!(values[1].to_bits(), 1);
    }

    #[test]
    fn test_short_read_reports_offset() {
        let bytes = [0u8; 10];
        let mut s = PlotStream::new(&bytes[..]);
        s.skip(8, "separator").unwrap();
        let err = s.read_token::<4>("variable code").unwrap_err();
        assert!(matches!(
            err,
            PlotError::UnexpectedEndOfFile { offset: 8, field: "variable code" }
        ));
    }

    #[test]
    fn test_short_skip() {
        let bytes = [0u8; 3];
        let mut s = PlotStream::new(&bytes[..]);
        let err = s.skip(8, "padding").unwrap_err();
        assert!(matches!(
            err,
            PlotError::UnexpectedEndOfFile { offset: 3, field: "padding" }
        ));
    }

    #[test]
    fn test_huge_word_count_on_short_stream() {
        let bytes = [0u8; 12];
        let mut s = PlotStream::new(&bytes[..]);
        let err = s.read_words(i32::MAX as usize, "variable counts").unwrap_err();
        assert!(matches!(
            err,
            PlotError::UnexpectedEndOfFile { offset: 12, field: "variable counts" }
        ));
    }
}
