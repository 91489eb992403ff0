//! Byte stream → text lines for the serial transport.

use heapless::String;

/// Accumulates bytes until `\n`.
///
/// `\r` is ignored, non-ASCII bytes are dropped and anything past the
/// capacity is discarded until the line ends, so an overlong line
/// arrives truncated rather than split.
pub struct LineAssembler<const N: usize> {
    line: String<N>,
}

impl<const N: usize> LineAssembler<N> {
    pub const fn new() -> Self {
        Self {
            line: String::new(),
        }
    }

    /// Feed one byte; returns the finished line on `\n`.
    ///
    /// Empty lines are not reported.
    pub fn push(&mut self, byte: u8) -> Option<String<N>> {
        match byte {
            b'\r' => None,
            b'\n' => {
                if self.line.is_empty() {
                    None
                } else {
                    Some(core::mem::take(&mut self.line))
                }
            }
            b if b.is_ascii() && !b.is_ascii_control() => {
                let _ = self.line.push(b as char);
                None
            }
            _ => None,
        }
    }

    pub fn clear(&mut self) {
        self.line.clear();
    }
}

impl<const N: usize> Default for LineAssembler<N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed<const N: usize>(asm: &mut LineAssembler<N>, bytes: &[u8]) -> Option<String<N>> {
        let mut last = None;
        for &b in bytes {
            if let Some(line) = asm.push(b) {
                last = Some(line);
            }
        }
        last
    }

    #[test]
    fn crlf_terminated_line() {
        let mut asm = LineAssembler::<16>::new();
        let line = feed(&mut asm, b"... ---\r\n").unwrap();
        assert_eq!(line.as_str(), "... ---");
        let next = feed(&mut asm, b"-\n").unwrap();
        assert_eq!(next.as_str(), "-");
    }

    #[test]
    fn empty_lines_are_skipped() {
        let mut asm = LineAssembler::<16>::new();
        assert!(feed(&mut asm, b"\r\n\n").is_none());
    }

    #[test]
    fn overlong_line_is_truncated() {
        let mut asm = LineAssembler::<4>::new();
        let line = feed(&mut asm, b"abcdefgh\n").unwrap();
        assert_eq!(line.as_str(), "abcd");
        let next = feed(&mut asm, b"xy\n").unwrap();
        assert_eq!(next.as_str(), "xy");
    }

    #[test]
    fn control_and_non_ascii_bytes_are_dropped() {
        let mut asm = LineAssembler::<16>::new();
        let line = feed(&mut asm, &[b'.', 0x07, 0xC3, b'-', b'\n']).unwrap();
        assert_eq!(line.as_str(), ".-");
    }
}
