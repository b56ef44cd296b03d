//! Listing parameters for paged endpoints

use std::fmt;

/// Page number (1-based) and page size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// 1-based page number
    pub page: u32,
    /// Items per page
    pub per_page: u32,
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    /// Ascending
    Asc,
    /// Descending
    Desc,
}

impl SortDirection {
    /// Wire form (`asc` / `desc`)
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Query parameters of a listing endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ListParams {
    filter_text: Option<String>,
    ruc: Option<String>,
    offset: Option<u64>,
    limit: Option<u32>,
    sort_by: Option<String>,
}

impl ListParams {
    /// Empty parameter set
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Free-text filter
    #[must_use]
    pub fn with_filter_text(mut self, filter_text: impl Into<String>) -> Self {
        self.filter_text = Some(filter_text.into());
        self
    }

    /// Restrict to one company
    #[must_use]
    pub fn with_ruc(mut self, ruc: impl Into<String>) -> Self {
        self.ruc = Some(ruc.into());
        self
    }

    /// Offset and limit from a page; page 0 is treated as page 1
    #[must_use]
    pub fn with_pagination(mut self, pagination: Pagination) -> Self {
        let page = u64::from(pagination.page.max(1));
        self.offset = Some((page - 1) * u64::from(pagination.per_page));
        self.limit = Some(pagination.per_page);
        self
    }

    /// Sort as `field:direction`
    #[must_use]
    pub fn with_sorting(mut self, field: &str, direction: SortDirection) -> Self {
        self.sort_by = Some(format!("{field}:{direction}"));
        self
    }

    /// Items to skip
    #[must_use]
    pub fn offset(&self) -> Option<u64> {
        self.offset
    }

    /// Page size
    #[must_use]
    pub fn limit(&self) -> Option<u32> {
        self.limit
    }

    /// Set parameters as query pairs, in a fixed order
    #[must_use]
    pub fn to_query(&self) -> Vec<(String, String)> {
        let pairs = [
            ("filterText", self.filter_text.clone()),
            ("ruc", self.ruc.clone()),
            ("offset", self.offset.map(|v| v.to_string())),
            ("limit", self.limit.map(|v| v.to_string())),
            ("sort_by", self.sort_by.clone()),
        ];
        pairs
            .into_iter()
            .filter_map(|(name, value)| value.map(|v| (name.to_string(), v)))
            .collect()
    }
}

impl fmt::Display for ListParams {
    /// Stable form used in query keys
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let query = self.to_query();
        for (i, (name, value)) in query.iter().enumerate() {
            if i > 0 {
                f.write_str("&")?;
            }
            write!(f, "{name}={value}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn pagination_to_offset_and_limit() {
        let params = ListParams::new().with_pagination(Pagination { page: 3, per_page: 10 });
        assert_eq!(params.offset(), Some(20));
        assert_eq!(params.limit(), Some(10));

        let first = ListParams::new().with_pagination(Pagination { page: 0, per_page: 10 });
        assert_eq!(first.offset(), Some(0));
    }

    #[test]
    fn query_skips_unset_params() {
        let params = ListParams::new()
            .with_filter_text("F001")
            .with_sorting("createdOn", SortDirection::Desc);
        assert_eq!(
            params.to_query(),
            vec![
                ("filterText".to_string(), "F001".to_string()),
                ("sort_by".to_string(), "createdOn:desc".to_string()),
            ]
        );
        assert_eq!(params.to_string(), "filterText=F001&sort_by=createdOn:desc");
        assert_eq!(ListParams::new().to_string(), "");
    }
}
