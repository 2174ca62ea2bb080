use std::iter::FusedIterator;
use std::str::Chars;

/// Single-pass codepoint stream with one codepoint of lookahead.
///
/// Offsets are counted in UTF-16 code units, the unit diagnoses report.
pub(crate) struct Reader<'a> {
    chars: Chars<'a>,
    lookahead: Option<Option<char>>,
    index: usize,
    prev_index: usize,
}

impl<'a> Reader<'a> {
    pub(crate) fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars(),
            lookahead: None,
            index: 0,
            prev_index: 0,
        }
    }

    /// Next codepoint without consuming it.
    pub(crate) fn peek(&mut self) -> Option<char> {
        *self.lookahead.get_or_insert_with(|| self.chars.next())
    }

    /// Offset of the codepoint returned by the last `next()`.
    pub(crate) fn prev_index(&self) -> usize {
        self.prev_index
    }
}

impl Iterator for Reader<'_> {
    type Item = char;

    fn next(&mut self) -> Option<char> {
        let rune = match self.lookahead.take() {
            Some(peeked) => peeked,
            None => self.chars.next(),
        };
        self.prev_index = self.index;
        self.index += rune.map_or(0, char::len_utf16);
        rune
    }
}

impl FusedIterator for Reader<'_> {}
