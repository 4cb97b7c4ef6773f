const MAX_LENGTH: usize = 100;

/// Free text matched against book titles and authors.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchTerm(String);

impl SearchTerm {
    /// Blank input means "no search" and yields `Ok(None)`.
    pub fn parse(term: String) -> Result<Option<SearchTerm>, String> {
        let term = term.trim();
        if term.is_empty() {
            return Ok(None);
        }
        if term.chars().count() > MAX_LENGTH {
            return Err(format!("search term is longer than {} characters", MAX_LENGTH));
        }
        Ok(Some(Self(term.to_string())))
    }

    /// Case-insensitive substring pattern for `ILIKE`. LIKE metacharacters
    /// typed by the user are matched literally.
    pub fn ilike_pattern(&self) -> String {
        let mut pattern = String::with_capacity(self.0.len() + 2);
        pattern.push('%');
        for c in self.0.chars() {
            if matches!(c, '%' | '_' | '\\') {
                pattern.push('\\');
            }
            pattern.push(c);
        }
        pattern.push('%');
        pattern
    }

    pub fn inner(&self) -> &str {
        &self.0
    }
}
