use serde::Deserialize;

use crate::utils::error::AppError;

pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const MAX_PAGE_SIZE: u32 = 100;

/// `?page=&limit=` query parameters accepted by every list endpoint.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct Pagination {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

/// Resolved window into an ordered list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: i64,
    pub offset: i64,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            limit: i64::from(DEFAULT_PAGE_SIZE),
            offset: 0,
        }
    }
}

impl Page {
    /// Applies the window to an already ordered iterator.
    pub fn slice<T>(&self, items: impl IntoIterator<Item = T>) -> Vec<T> {
        items
            .into_iter()
            .skip(self.offset as usize)
            .take(self.limit as usize)
            .collect()
    }
}

impl TryFrom<Pagination> for Page {
    type Error = AppError;

    fn try_from(params: Pagination) -> Result<Self, Self::Error> {
        let page = params.page.unwrap_or(1);
        let limit = params.limit.unwrap_or(DEFAULT_PAGE_SIZE);

        if page == 0 {
            return Err(AppError::ValidationError(
                "page must be greater than or equal to 1".to_string(),
            ));
        }
        if limit == 0 || limit > MAX_PAGE_SIZE {
            return Err(AppError::ValidationError(format!(
                "limit must be between 1 and {}",
                MAX_PAGE_SIZE
            )));
        }

        Ok(Page {
            limit: i64::from(limit),
            offset: (i64::from(page) - 1) * i64::from(limit),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let page = Page::try_from(Pagination::default()).unwrap();
        assert_eq!(page, Page::default());
    }

    #[test]
    fn test_offset_follows_page_number() {
        let page = Page::try_from(Pagination {
            page: Some(3),
            limit: Some(20),
        })
        .unwrap();
        assert_eq!(page.offset, 40);
        assert_eq!(page.limit, 20);
    }

    #[test]
    fn test_rejects_out_of_range_values() {
        assert!(Page::try_from(Pagination {
            page: Some(0),
            limit: None
        })
        .is_err());
        assert!(Page::try_from(Pagination {
            page: None,
            limit: Some(MAX_PAGE_SIZE + 1)
        })
        .is_err());
    }

    #[test]
    fn test_slice() {
        let page = Page {
            limit: 2,
            offset: 1,
        };
        assert_eq!(page.slice(1..=5), vec![2, 3]);
    }
}
