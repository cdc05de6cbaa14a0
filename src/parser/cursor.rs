use derive_more::Display;

/// A position in some source text. A cursor is never changed in place: every
/// scanning step derives a new one.
#[derive(Clone, Copy, Debug, Display, PartialEq, Eq)]
#[display("[{}:{}]", self.line(), self.column())]
pub struct Cursor<'source> {
    pub text: &'source str,
    /// Byte offset into `text`. Always on a char boundary, never past the end.
    pub offset: usize,
}

impl<'source> Cursor<'source> {
    pub const fn new(text: &'source str) -> Self {
        Self { text, offset: 0 }
    }

    pub const fn at(text: &'source str, offset: usize) -> Self {
        Self { text, offset }
    }

    pub fn rest(&self) -> &'source str {
        &self.text[self.offset..]
    }

    pub fn is_done(&self) -> bool {
        self.offset >= self.text.len()
    }

    pub fn peek(&self, literal: &str) -> bool {
        self.rest().starts_with(literal)
    }

    /// The caller must make sure `n` bytes are left.
    pub fn advance(self, n: usize) -> Self {
        debug_assert!(self.offset + n <= self.text.len());
        Self {
            offset: self.offset + n,
            ..self
        }
    }

    pub fn next_char(&self) -> Option<char> {
        self.rest().chars().next()
    }

    pub fn prev_char(&self) -> Option<char> {
        self.text[..self.offset].chars().next_back()
    }

    /// The text between this cursor and a later cursor over the same text.
    pub fn slice_to(&self, end: Cursor<'source>) -> &'source str {
        &self.text[self.offset..end.offset]
    }

    /// The rest of the current line, without the newline.
    pub fn rest_of_line(&self) -> &'source str {
        let rest = self.rest();
        match rest.find('\n') {
            Some(i) => &rest[..i],
            None => rest,
        }
    }

    /// The offset where the cursor's line starts.
    pub fn line_start(&self) -> usize {
        self.text[..self.offset].rfind('\n').map_or(0, |i| i + 1)
    }

    /// Whether only whitespace comes between the start of the line and the
    /// cursor.
    pub fn at_line_start(&self) -> bool {
        self.text[..self.offset]
            .chars()
            .rev()
            .take_while(|&c| c != '\n')
            .all(char::is_whitespace)
    }

    /// Whether `word` is here as a whole word. Boundaries are only checked on
    /// the sides of `word` that are alphanumeric, so symbols like `->` match
    /// anywhere.
    pub fn matches_word(&self, word: &str) -> bool {
        if word.is_empty() || !self.peek(word) {
            return false;
        }
        let is_alnum = |c: char| c.is_alphanumeric() || c == '_';
        let separated = |c: Option<char>| c.is_none_or(char::is_whitespace);
        let begins = !word.starts_with(is_alnum) || separated(self.prev_char());
        let ends = !word.ends_with(is_alnum) || separated(self.advance(word.len()).next_char());
        begins && ends
    }

    /// Whether `word` is here and its neighbours are not letters, digits or
    /// `_`. Looser than `matches_word`: `(if` has `if` as a term.
    pub fn matches_term(&self, word: &str) -> bool {
        let is_alnum = |c: char| c.is_alphanumeric() || c == '_';
        let separated = |c: Option<char>| !c.is_some_and(is_alnum);
        self.peek(word)
            && !word.is_empty()
            && separated(self.prev_char())
            && separated(self.advance(word.len()).next_char())
    }

    /// Up to `width` characters of the remaining text, for error reports.
    pub fn window(&self, width: usize) -> &'source str {
        let rest = self.rest();
        match rest.char_indices().nth(width) {
            Some((i, _)) => &rest[..i],
            None => rest,
        }
    }

    pub fn line(&self) -> usize {
        self.text[..self.offset]
            .chars()
            .filter(|&c| c == '\n')
            .count()
            + 1
    }

    pub fn column(&self) -> usize {
        self.text[..self.offset]
            .chars()
            .rev()
            .take_while(|&c| c != '\n')
            .count()
            + 1
    }
}
