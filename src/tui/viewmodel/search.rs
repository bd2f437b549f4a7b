//! Text input for the product lookup.

/// Query being typed into the lookup overlay.
#[derive(Debug, Clone, Default)]
pub struct LookupInput {
    pub query: String,
}

impl LookupInput {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            query: String::new(),
        }
    }

    pub fn push_char(&mut self, c: char) {
        self.query.push(c);
    }

    pub fn pop_char(&mut self) {
        self.query.pop();
    }

    pub fn clear(&mut self) {
        self.query.clear();
    }

    /// The query as submitted for lookup.
    #[must_use]
    pub fn trimmed(&self) -> &str {
        self.query.trim()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_editing() {
        let mut input = LookupInput::new();
        for c in " Brötchen ".chars() {
            input.push_char(c);
        }
        input.pop_char();
        assert_eq!(input.query, " Brötchen");
        assert_eq!(input.trimmed(), "Brötchen");
        input.clear();
        assert!(input.query.is_empty());
    }
}
