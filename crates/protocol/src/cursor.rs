//! Position-tracked reading over immutable byte slices.
//!
//! The handshake has to peek at the first bytes of a connection and, when the
//! version guess turns out wrong, re-read them under different protocol rules.
//! [`ReadCursor`] makes that explicit: the caller saves [`position`] before a
//! parse attempt and calls [`rewind_to`] when the attempt cannot finish, so a
//! peek can never be confused with true consumption. Short reads return
//! `None` without advancing; running out of bytes is an expected buffering
//! condition, never a fault.
//!
//! [`position`]: ReadCursor::position
//! [`rewind_to`]: ReadCursor::rewind_to

/// A forward reader over a byte slice with an explicit, rewindable position.
#[derive(Clone, Copy, Debug)]
pub struct ReadCursor<'a> {
    bytes: &'a [u8],
    position: usize,
}

impl<'a> ReadCursor<'a> {
    /// Creates a cursor positioned at the start of `bytes`.
    #[must_use]
    pub const fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, position: 0 }
    }

    /// Returns the number of bytes consumed so far.
    ///
    /// Callers that accumulate inbound data in their own buffer use this to
    /// know how far the handshake advanced, draining exactly that many bytes
    /// before the next delivery.
    #[must_use]
    #[inline]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Returns the number of unread bytes.
    #[must_use]
    #[inline]
    pub const fn remaining(&self) -> usize {
        self.bytes.len() - self.position
    }

    /// Returns `true` when every byte has been consumed.
    #[must_use]
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Moves the cursor back to a previously saved position.
    ///
    /// Only backward movement is meaningful: the saved offset must come from
    /// an earlier [`position`](Self::position) call on the same cursor.
    pub fn rewind_to(&mut self, position: usize) {
        debug_assert!(
            position <= self.position,
            "rewind target {position} is ahead of cursor position {}",
            self.position
        );
        self.position = position;
    }

    /// Reads a single byte, or returns `None` without advancing when the
    /// cursor is exhausted.
    #[must_use]
    pub fn read_u8(&mut self) -> Option<u8> {
        let byte = *self.bytes.get(self.position)?;
        self.position += 1;
        Some(byte)
    }

    /// Reads a big-endian `u64`, or returns `None` without advancing when
    /// fewer than eight bytes remain.
    #[must_use]
    pub fn read_u64_be(&mut self) -> Option<u64> {
        let slice = self.read_slice(8)?;
        let mut raw = [0u8; 8];
        raw.copy_from_slice(slice);
        Some(u64::from_be_bytes(raw))
    }

    /// Reads `len` bytes as a borrowed slice, or returns `None` without
    /// advancing when fewer remain.
    #[must_use]
    pub fn read_slice(&mut self, len: usize) -> Option<&'a [u8]> {
        let end = self.position.checked_add(len)?;
        let slice = self.bytes.get(self.position..end)?;
        self.position = end;
        Some(slice)
    }

    /// Skips `len` bytes, or returns `None` without advancing when fewer
    /// remain.
    #[must_use]
    pub fn skip(&mut self, len: usize) -> Option<()> {
        self.read_slice(len).map(|_| ())
    }
}
