//! Keystring tokenization.
//!
//! A keystring is a sequence of keys. Printable keys are single characters;
//! everything else is an angle-bracket token such as `<Enter>` or `<C-a>`.
//! A `<` only opens a token when a matching `>` follows with no whitespace
//! or nested `<` in between, so `a<b` tokenizes as `a`, `<`, `b`.

pub const ENTER: &str = "<Enter>";
pub const TAB: &str = "<Tab>";
pub const ESCAPE: &str = "<Escape>";
/// Escaped form of a literal `<` key.
pub const LESS_THAN: &str = "<lt>";

/// Iterator over the tokens of a keystring.
pub struct Tokens<'a> {
    remaining: &'a str,
}

impl<'a> Iterator for Tokens<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let len = first_token_len(self.remaining)?;
        let (token, rest) = self.remaining.split_at(len);
        self.remaining = rest;
        Some(token)
    }
}

pub fn tokens(keystring: &str) -> Tokens<'_> {
    Tokens {
        remaining: keystring,
    }
}

/// Byte offsets at which each token of `keystring` ends.
pub fn token_ends(keystring: &str) -> impl Iterator<Item = usize> + '_ {
    tokens(keystring).scan(0, |end, token| {
        *end += token.len();
        Some(*end)
    })
}

pub fn first_token(keystring: &str) -> Option<&str> {
    first_token_len(keystring).map(|len| &keystring[..len])
}

/// Byte length of the first token, `None` for an empty keystring.
fn first_token_len(keystring: &str) -> Option<usize> {
    let first = keystring.chars().next()?;
    if first == '<' {
        let body = &keystring[1..];
        for (index, ch) in body.char_indices() {
            match ch {
                '>' if index > 0 => return Some(index + 2),
                '<' | '>' => break,
                ch if ch.is_whitespace() => break,
                _ => {}
            }
        }
    }
    Some(first.len_utf8())
}

pub fn token_count(keystring: &str) -> usize {
    tokens(keystring).count()
}

/// Keystring for a single typed character, escaping characters that would
/// otherwise be read as the start of a token.
pub fn char_keystring(ch: char) -> String {
    match ch {
        '<' => LESS_THAN.to_string(),
        '\n' | '\r' => ENTER.to_string(),
        '\t' => TAB.to_string(),
        ch => ch.to_string(),
    }
}

/// Text typed into a keystring, with escaped `<` keys restored.
pub fn unescape(keystring: &str) -> String {
    tokens(keystring)
        .map(|token| if token == LESS_THAN { "<" } else { token })
        .collect()
}
