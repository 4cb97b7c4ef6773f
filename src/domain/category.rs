const MAX_LENGTH: usize = 50;
const ALL: &str = "all";

#[derive(Debug, Clone, PartialEq)]
pub struct Category(String);

impl Category {
    pub fn parse(category: String) -> Result<Category, String> {
        let category = category.trim();
        if category.is_empty() {
            return Err("category can't be empty".to_string());
        }
        if category.chars().count() > MAX_LENGTH {
            return Err(format!("category is longer than {} characters", MAX_LENGTH));
        }
        if category.eq_ignore_ascii_case(ALL) {
            return Err(format!("\"{}\" is reserved and can't be used as a category", ALL));
        }
        Ok(Self(category.to_string()))
    }

    pub fn inner(&self) -> String {
        self.0.clone()
    }
}

/// Category filter of the catalog listing; `all` (or nothing) disables it.
#[derive(Debug, Clone, PartialEq)]
pub enum CategoryFilter {
    All,
    Only(Category),
}

impl CategoryFilter {
    pub fn parse(category: Option<String>) -> Result<CategoryFilter, String> {
        match category {
            None => Ok(CategoryFilter::All),
            Some(c) if c.trim().is_empty() || c.trim().eq_ignore_ascii_case(ALL) => Ok(CategoryFilter::All),
            Some(c) => Category::parse(c).map(CategoryFilter::Only),
        }
    }
}
