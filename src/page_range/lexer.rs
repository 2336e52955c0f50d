use super::error::PageRangeError;

/// Split a pages expression into tokens on runs of commas and/or whitespace.
///
/// Separators inside parentheses do not split, so `range(1, 9, 2)` stays a
/// single token.
pub fn tokenize(expr: &str) -> Result<Vec<&str>, PageRangeError> {
    let mut tokens = Vec::new();
    let mut start = None;
    let mut depth = 0usize;

    for (i, c) in expr.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            _ => {}
        }

        let separator = depth == 0 && (c == ',' || c.is_whitespace());
        match (separator, start) {
            (true, Some(s)) => {
                tokens.push(&expr[s..i]);
                start = None;
            }
            (false, None) => start = Some(i),
            _ => {}
        }
    }
    if let Some(s) = start {
        tokens.push(&expr[s..]);
    }

    if tokens.is_empty() {
        return Err(PageRangeError::EmptyExpression);
    }
    Ok(tokens)
}

/// Cursor over a single token, used by the classifier.
pub(crate) struct Scanner<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    pub(crate) fn new(src: &'a str) -> Self {
        Scanner { src, pos: 0 }
    }

    pub(crate) fn is_done(&self) -> bool {
        self.pos == self.src.len()
    }

    pub(crate) fn skip_ws(&mut self) {
        while self
            .src
            .as_bytes()
            .get(self.pos)
            .is_some_and(|b| b.is_ascii_whitespace())
        {
            self.pos += 1;
        }
    }

    /// Consume `lit` if the remaining input starts with it.
    pub(crate) fn eat(&mut self, lit: &str) -> bool {
        if self.src[self.pos..].starts_with(lit) {
            self.pos += lit.len();
            true
        } else {
            false
        }
    }

    /// A run of ASCII digits.
    pub(crate) fn unsigned(&mut self) -> Option<&'a str> {
        let start = self.pos;
        while self
            .src
            .as_bytes()
            .get(self.pos)
            .is_some_and(|b| b.is_ascii_digit())
        {
            self.pos += 1;
        }
        if self.pos == start {
            None
        } else {
            Some(&self.src[start..self.pos])
        }
    }

    /// Digits with at most one leading `-` or `+`.
    pub(crate) fn signed(&mut self) -> Option<&'a str> {
        let start = self.pos;
        if matches!(self.src.as_bytes().get(self.pos), Some(b'-' | b'+')) {
            self.pos += 1;
        }
        if self.unsigned().is_some() {
            Some(&self.src[start..self.pos])
        } else {
            self.pos = start;
            None
        }
    }
}
