//! Sliding-window input buffer over a byte source.
//!
//! The window holds `2 * page` bytes. Bytes before the cursor are dead; once
//! the cursor passes the first page, the live region is moved to the front
//! and the freed space is refilled from the source. Tokens may therefore
//! straddle any number of refills without the whole input ever being held
//! in memory.

use std::io::{self, Read};

/// Smallest page size the tokenizer can work with: a complete hex escape
/// (`\'xx`) must fit in one page.
pub const MIN_PAGE_SIZE: usize = 4;

/// Owned, bounds-checked sliding window over a [`Read`] source.
///
/// Invariant: `cursor <= filled <= 2 * page`, checked after every refill.
pub struct InputBuffer<R> {
    source: R,
    buf: Box<[u8]>,
    page: usize,
    cursor: usize,
    filled: usize,
    /// Absolute stream offset of `buf[0]`.
    base: usize,
    exhausted: bool,
    read_error: Option<io::Error>,
}

impl<R: Read> InputBuffer<R> {
    /// Create a buffer with the given page size.
    ///
    /// `page` is clamped to at least [`MIN_PAGE_SIZE`].
    pub fn new(source: R, page: usize) -> Self {
        let page = page.max(MIN_PAGE_SIZE);
        Self {
            source,
            buf: vec![0u8; page * 2].into_boxed_slice(),
            page,
            cursor: 0,
            filled: 0,
            base: 0,
            exhausted: false,
            read_error: None,
        }
    }

    /// Page size in bytes.
    pub fn page(&self) -> usize {
        self.page
    }

    /// Guarantee at least one unread byte, or report end of stream.
    pub fn ensure_available(&mut self) -> bool {
        self.ensure(1)
    }

    /// Guarantee at least `n` unread bytes at the cursor.
    ///
    /// Returns `false` when the source is exhausted before `n` bytes could
    /// be buffered. `n` must not exceed the page size.
    pub fn ensure(&mut self, n: usize) -> bool {
        debug_assert!(n <= self.page, "lookahead {n} exceeds page {}", self.page);
        if self.available() >= n {
            return true;
        }
        if self.cursor >= self.page {
            self.compact();
        }
        while self.available() < n && !self.exhausted && self.filled < self.buf.len() {
            self.refill();
        }
        debug_assert!(self.cursor <= self.filled && self.filled <= self.buf.len());
        self.available() >= n
    }

    /// Byte `ahead` positions past the cursor, if already buffered.
    pub fn peek(&self, ahead: usize) -> Option<u8> {
        let idx = self.cursor + ahead;
        if idx < self.filled {
            Some(self.buf[idx])
        } else {
            None
        }
    }

    /// Advance the cursor over `n` bytes previously guaranteed by [`ensure`].
    ///
    /// [`ensure`]: InputBuffer::ensure
    pub fn consume(&mut self, n: usize) {
        assert!(
            n <= self.available(),
            "consume({n}) past buffered data ({} available)",
            self.available()
        );
        self.cursor += n;
    }

    /// Absolute stream offset of the cursor.
    pub fn offset(&self) -> usize {
        self.base + self.cursor
    }

    /// Take the I/O error that ended the stream early, if any.
    pub fn take_read_error(&mut self) -> Option<io::Error> {
        self.read_error.take()
    }

    fn available(&self) -> usize {
        self.filled - self.cursor
    }

    fn compact(&mut self) {
        self.buf.copy_within(self.cursor..self.filled, 0);
        self.filled -= self.cursor;
        self.base += self.cursor;
        self.cursor = 0;
    }

    fn refill(&mut self) {
        match self.source.read(&mut self.buf[self.filled..]) {
            Ok(0) => self.exhausted = true,
            Ok(read) => self.filled += read,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => {
                self.exhausted = true;
                self.read_error = Some(e);
            }
        }
    }

    #[cfg(test)]
    fn indices(&self) -> (usize, usize) {
        (self.cursor, self.filled)
    }
}
