//! This modules defines the common functionality for paging data.

use crate::Error;

/// The config for pagination
#[derive(Debug, Clone)]
pub struct PaginationConfig {
    /// The page number to default to when not specified in a request.
    pub default_page: u64,
    /// The number of rows to return per page when not specified in a request.
    pub default_page_size: u64,
    /// The largest page size a client may ask for.
    pub max_page_size: u64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page: 1,
            default_page_size: 20,
            max_page_size: 100,
        }
    }
}

/// The `LIMIT` and `OFFSET` for a page of rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageBounds {
    /// The maximum number of rows on the page.
    pub limit: i64,
    /// The number of rows to skip.
    pub offset: i64,
}

impl PageBounds {
    /// SQLite treats a negative limit as "no limit".
    pub const UNBOUNDED: PageBounds = PageBounds {
        limit: -1,
        offset: 0,
    };
}

/// Work out which rows a request for `page` of size `per_page` covers.
///
/// Returns `None` when the request did not ask for pagination at all, in
/// which case callers return every row. A page size larger than
/// [PaginationConfig::max_page_size] is clamped.
///
/// # Errors
/// Returns [Error::InvalidRequest] if `page` or `per_page` is zero, or if
/// the page starts past the largest offset SQLite accepts.
pub fn page_bounds(
    page: Option<u64>,
    per_page: Option<u64>,
    config: &PaginationConfig,
) -> Result<Option<PageBounds>, Error> {
    if page.is_none() && per_page.is_none() {
        return Ok(None);
    }

    let page = page.unwrap_or(config.default_page);
    let per_page = per_page.unwrap_or(config.default_page_size);

    if page == 0 {
        return Err(Error::InvalidRequest("page must be at least 1".to_owned()));
    }

    if per_page == 0 {
        return Err(Error::InvalidRequest(
            "perPage must be at least 1".to_owned(),
        ));
    }

    let per_page = per_page.min(config.max_page_size);
    let too_large = || Error::InvalidRequest("page is too large".to_owned());

    let offset = (page - 1).checked_mul(per_page).ok_or_else(too_large)?;

    Ok(Some(PageBounds {
        limit: i64::try_from(per_page).map_err(|_| too_large())?,
        offset: i64::try_from(offset).map_err(|_| too_large())?,
    }))
}
