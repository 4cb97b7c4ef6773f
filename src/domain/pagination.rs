use crate::configuration::CatalogSettings;

/// A validated page window, translated to LIMIT / OFFSET.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: i64,
    pub offset: i64,
}

impl Page {
    /// Pages are 1-based. A missing limit falls back to the configured
    /// default and an oversized one is clamped to the configured maximum.
    pub fn new(page: Option<i64>, limit: Option<i64>, settings: &CatalogSettings) -> Result<Page, String> {
        let page = page.unwrap_or(1);
        if page < 1 {
            return Err(format!("page must be at least 1, got {}", page));
        }

        let limit = limit.unwrap_or(settings.default_page_size);
        if limit < 1 {
            return Err(format!("limit must be at least 1, got {}", limit));
        }
        let limit = limit.min(settings.max_page_size);

        let offset = (page - 1)
            .checked_mul(limit)
            .ok_or_else(|| "page is out of range".to_string())?;

        Ok(Page { limit, offset })
    }
}
