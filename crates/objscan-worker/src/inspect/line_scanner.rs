//! Line-oriented decoding of object content.

use std::str::Utf8Error;

/// Default longest line accepted by the scanner, in bytes.
pub const DEFAULT_MAX_LINE_LENGTH: usize = 64 * 1024;

/// Failure to decode content into lines.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScanError {
    /// A line exceeds the scanner's length limit.
    #[error("line {line} exceeds {limit} bytes")]
    TooLong { line: usize, limit: usize },

    /// A line is not valid UTF-8.
    #[error("line {line} is not valid UTF-8: {source}")]
    InvalidUtf8 {
        line: usize,
        #[source]
        source: Utf8Error,
    },
}

/// Iterator over the lines of a byte buffer.
///
/// Lines end at `\n`; one trailing `\r` is dropped. A final line without a
/// terminator is still yielded, and empty content yields no lines. The
/// iterator stops after the first [`ScanError`].
#[derive(Debug, Clone)]
pub struct LineScanner<'a> {
    remaining: &'a [u8],
    max_line_length: usize,
    line: usize,
    failed: bool,
}

impl<'a> LineScanner<'a> {
    /// Creates a scanner over `content`.
    pub fn new(content: &'a [u8], max_line_length: usize) -> Self {
        Self {
            remaining: content,
            max_line_length,
            line: 0,
            failed: false,
        }
    }

    fn fail(&mut self, error: ScanError) -> Option<Result<&'a str, ScanError>> {
        self.failed = true;
        self.remaining = &[];
        Some(Err(error))
    }
}

impl<'a> Iterator for LineScanner<'a> {
    type Item = Result<&'a str, ScanError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.remaining.is_empty() {
            return None;
        }

        self.line += 1;
        let remaining = self.remaining;
        let (raw, rest) = match remaining.iter().position(|&b| b == b'\n') {
            Some(end) => (&remaining[..end], &remaining[end + 1..]),
            None => (remaining, &remaining[remaining.len()..]),
        };
        self.remaining = rest;

        let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
        if raw.len() > self.max_line_length {
            return self.fail(ScanError::TooLong {
                line: self.line,
                limit: self.max_line_length,
            });
        }

        match std::str::from_utf8(raw) {
            Ok(text) => Some(Ok(text)),
            Err(source) => self.fail(ScanError::InvalidUtf8 {
                line: self.line,
                source,
            }),
        }
    }
}
