use std::fmt;

pub const MAX_NAME_LEN: usize = 10;

/// A player name as accepted by the name prompt: ASCII letters only, at most
/// ten of them, capitalised on the first letter and lower-case after it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlayerName(String);

impl PlayerName {
    /// Normalises raw input, dropping characters the prompt would not accept.
    /// Returns `None` if nothing usable remains.
    pub fn parse(raw: &str) -> Option<Self> {
        let mut input = NameInput::default();
        for c in raw.chars() {
            input.push(c);
        }
        input.finish()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Keystroke-level name editing for an input layer.
#[derive(Debug, Clone, Default)]
pub struct NameInput {
    buf: String,
}

impl NameInput {
    /// Appends a letter. Returns false if the character was rejected.
    pub fn push(&mut self, c: char) -> bool {
        if !c.is_ascii_alphabetic() || self.buf.len() >= MAX_NAME_LEN {
            return false;
        }
        if self.buf.is_empty() {
            self.buf.push(c.to_ascii_uppercase());
        } else {
            self.buf.push(c.to_ascii_lowercase());
        }
        true
    }

    pub fn pop(&mut self) -> Option<char> {
        self.buf.pop()
    }

    pub fn as_str(&self) -> &str {
        &self.buf
    }

    pub fn finish(self) -> Option<PlayerName> {
        (!self.buf.is_empty()).then_some(PlayerName(self.buf))
    }
}
