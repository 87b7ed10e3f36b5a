/// Cursor over the source text being recognized. Every scan first skips
/// leading whitespace, then attempts a longest-prefix match; the cursor is
/// never rewound past the post-whitespace position on failure.
pub struct Scanner<'i> {
    input: &'i str,
    cursor: usize,
}

impl<'i> Scanner<'i> {
    pub fn new(input: &'i str) -> Scanner<'i> {
        Scanner { input, cursor: 0 }
    }

    pub fn remaining(&self) -> &'i str {
        &self.input[self.cursor..]
    }

    fn skip_whitespace(&mut self) {
        let skip = self.remaining().len()
            - self
                .remaining()
                .trim_start_matches(char::is_whitespace)
                .len();
        self.cursor += skip;
    }

    /// `TST s`: does the input, after whitespace, begin with the literal `s`?
    pub fn tst(&mut self, s: &str) -> bool {
        self.skip_whitespace();
        if self.remaining().starts_with(s) {
            self.cursor += s.len();
            true
        } else {
            false
        }
    }

    /// `ID`: letter followed by at least one further word character
    /// (minimum match length 2 — reproduces the bootstrap source's
    /// `[A-Za-z]\w+` regex, which rejects single-letter identifiers).
    pub fn id(&mut self) -> Option<String> {
        self.skip_whitespace();
        let rest = self.remaining();
        let mut chars = rest.char_indices();

        let first_is_letter = matches!(chars.next(), Some((_, c)) if c.is_ascii_alphabetic());
        if !first_is_letter {
            return None;
        }

        let mut end = rest.len();
        for (i, c) in chars {
            if c.is_ascii_alphanumeric() || c == '_' {
                continue;
            }
            end = i;
            break;
        }

        if end < 2 {
            return None;
        }

        let token = &rest[..end];
        self.cursor += end;
        Some(token.to_owned())
    }

    /// `NUM`: one or more decimal digits.
    pub fn num(&mut self) -> Option<String> {
        self.skip_whitespace();
        let rest = self.remaining();
        let end = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());

        if end == 0 {
            return None;
        }

        let token = &rest[..end];
        self.cursor += end;
        Some(token.to_owned())
    }

    /// `SR`: a single-quoted string, including the enclosing quotes in the
    /// captured token. Interior `''` is not treated as an escaped quote —
    /// a known, deliberate limitation shared with the bootstrap source.
    pub fn sr(&mut self) -> Option<String> {
        self.skip_whitespace();
        let rest = self.remaining();

        let mut chars = rest.char_indices();
        if chars.next().map(|(_, c)| c) != Some('\'') {
            return None;
        }

        for (i, c) in chars {
            if c == '\'' {
                let end = i + 1;
                let token = &rest[..end];
                self.cursor += end;
                return Some(token.to_owned());
            }
        }

        None
    }
}
