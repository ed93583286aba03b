//! Bounds-checked cursors over a flat signature buffer.
//!
//! A signature is `R || FORS signature || (W-OTS+ signature || auth path) * SPX_D`. Signing
//! and verification walk it front to back with these cursors; running past the end is an
//! `InvalidSignatureLength` error rather than a slice panic.

use crate::error::{Error, Result};
use core::mem;

/// Hands out consecutive, non-overlapping mutable sections of a buffer.
pub(crate) struct SigWriter<'a> {
    buf: &'a mut [u8],
    total: usize,
}

impl<'a> SigWriter<'a> {
    pub(crate) fn new(buf: &'a mut [u8]) -> Self {
        let total = buf.len();
        Self { buf, total }
    }

    /// Bytes handed out so far.
    pub(crate) fn position(&self) -> usize {
        self.total - self.buf.len()
    }

    pub(crate) fn next(&mut self, len: usize) -> Result<&'a mut [u8]> {
        if len > self.buf.len() {
            return Err(Error::InvalidSignatureLength(
                self.position() + len,
                self.total,
            ));
        }
        let (head, tail) = mem::take(&mut self.buf).split_at_mut(len);
        self.buf = tail;
        Ok(head)
    }

    /// Succeeds only if every byte of the buffer has been handed out.
    pub(crate) fn finish(self) -> Result<()> {
        if self.buf.is_empty() {
            Ok(())
        } else {
            Err(Error::InvalidSignatureLength(self.position(), self.total))
        }
    }
}

/// Reads consecutive sections of a buffer.
pub(crate) struct SigReader<'a> {
    buf: &'a [u8],
    total: usize,
}

impl<'a> SigReader<'a> {
    pub(crate) fn new(buf: &'a [u8]) -> Self {
        Self {
            buf,
            total: buf.len(),
        }
    }

    pub(crate) fn position(&self) -> usize {
        self.total - self.buf.len()
    }

    pub(crate) fn next(&mut self, len: usize) -> Result<&'a [u8]> {
        if len > self.buf.len() {
            return Err(Error::InvalidSignatureLength(
                self.position() + len,
                self.total,
            ));
        }
        let (head, tail) = self.buf.split_at(len);
        self.buf = tail;
        Ok(head)
    }

    pub(crate) fn finish(self) -> Result<()> {
        if self.buf.is_empty() {
            Ok(())
        } else {
            Err(Error::InvalidSignatureLength(self.position(), self.total))
        }
    }
}
