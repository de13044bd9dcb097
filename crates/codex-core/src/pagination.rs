//! Page validation, slicing and navigation links
//!
//! A request carries an optional page number and an optional page size. It is
//! validated against the server's maximum page size and the collection length,
//! in this order:
//!
//! 1. a size above the maximum is too large
//! 2. an explicit size `<= 0` is invalid; an omitted size defaults to half the maximum
//! 3. a number `<= 0` is invalid; an omitted number defaults to 1
//! 4. `max * number > len + max` is out of range
//!
//! Rule 4 bounds the number with the *maximum* page size, not the requested
//! one. A page that passes may still be empty at the requested size; the check
//! only rejects numbers that are absurdly far out.

use crate::config::ApiConfig;
use crate::error::{Error, Result};
use crate::identity::EntityKind;
use crate::locale::Locale;
use serde::Serialize;
use std::ops::Range;
use thiserror::Error;
use url::Url;

/// Query parameter carrying the page number
pub const PAGE_NUMBER_PARAM: &str = "page[number]";
/// Query parameter carrying the page size
pub const PAGE_SIZE_PARAM: &str = "page[size]";

/// Rejected page parameters
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PageError {
    #[error("page size too large: {requested} > {max}")]
    PageSizeTooLarge { requested: i64, max: u32 },

    #[error("invalid page size: {0}")]
    InvalidPageSize(i64),

    #[error("invalid page number: {0}")]
    InvalidPageNumber(i64),

    #[error("page number out of range: {number} for {len} entries")]
    PageOutOfRange { number: i64, len: usize },
}

/// Page parameters as the caller supplied them
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageRequest {
    pub number: Option<i64>,
    pub size: Option<i64>,
}

impl PageRequest {
    pub fn new(number: i64, size: i64) -> Self {
        Self {
            number: Some(number),
            size: Some(size),
        }
    }
}

/// A validated page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    number: u32,
    size: u32,
    max_size: u32,
}

impl Page {
    /// Validate a request against the maximum page size and collection length
    pub fn validate(
        request: PageRequest,
        max_size: u32,
        len: usize,
    ) -> std::result::Result<Self, PageError> {
        let size = match request.size {
            Some(requested) if requested > i64::from(max_size) => {
                return Err(PageError::PageSizeTooLarge { requested, max: max_size })
            }
            Some(requested) if requested <= 0 => return Err(PageError::InvalidPageSize(requested)),
            Some(requested) => requested as u32,
            None => (max_size / 2).max(1),
        };

        let number = request.number.unwrap_or(1);
        if number <= 0 {
            return Err(PageError::InvalidPageNumber(number));
        }

        let max = u128::from(max_size);
        if max * number as u128 > len as u128 + max {
            return Err(PageError::PageOutOfRange { number, len });
        }
        // rule 4 caps number at len / max + 1
        let number = u32::try_from(number).map_err(|_| PageError::PageOutOfRange { number, len })?;

        Ok(Self {
            number,
            size,
            max_size,
        })
    }

    /// 1-based page number
    pub fn number(&self) -> u32 {
        self.number
    }

    /// Effective page size
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Server maximum this page was validated against
    pub fn max_size(&self) -> u32 {
        self.max_size
    }

    /// Slice bounds `[start, end)` within a collection of `len` entries
    pub fn bounds(&self, len: usize) -> Range<usize> {
        let size = self.size as usize;
        let start = (self.number as usize - 1).saturating_mul(size).min(len);
        let end = start.saturating_add(size).min(len);
        start..end
    }

    /// Last page number for `len` entries at this page's size.
    ///
    /// An empty collection still has one (empty) page.
    pub fn last_page(&self, len: usize) -> u32 {
        let size = self.size as usize;
        let full = len / size;
        let last = if len % size == 0 { full } else { full + 1 };
        u32::try_from(last.max(1)).unwrap_or(u32::MAX)
    }
}

/// Navigation links for one page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaginationLinks {
    pub first: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
    pub last: String,
}

/// Links plus whether the collection fits on a single page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLinks {
    pub links: PaginationLinks,
    /// First and last page coincide; callers drop the links from the envelope
    pub single_page: bool,
}

/// Builds list URLs on top of the configured API address
#[derive(Debug, Clone)]
pub struct LinkBuilder {
    base: Url,
    path_prefix: String,
}

impl LinkBuilder {
    /// Parse the API address once
    pub fn new(api: &ApiConfig) -> Result<Self> {
        let authority = match api.port {
            Some(port) => format!("{}://{}:{}", api.scheme, api.host, port),
            None => format!("{}://{}", api.scheme, api.host),
        };
        let base = Url::parse(&authority)
            .map_err(|e| Error::ConfigValidation(format!("api address {}: {}", authority, e)))?;
        if base.cannot_be_a_base() {
            return Err(Error::ConfigValidation(format!(
                "api address {} cannot carry a path",
                authority
            )));
        }
        Ok(Self {
            base,
            path_prefix: api.path_prefix.trim_end_matches('/').to_string(),
        })
    }

    /// URL of one page of a list
    pub fn page_url(&self, locale: Locale, kind: EntityKind, number: u32, size: u32) -> String {
        let mut url = self.base.clone();
        url.set_path(&format!("{}/{}/{}", self.path_prefix, locale, kind.slug()));
        url.query_pairs_mut()
            .append_pair(PAGE_NUMBER_PARAM, &number.to_string())
            .append_pair(PAGE_SIZE_PARAM, &size.to_string());
        url.into()
    }

    /// First/prev/next/last links for a page of `len` entries.
    ///
    /// `prev` is absent on page 1 and `next` is absent from the last page on.
    pub fn links(&self, locale: Locale, kind: EntityKind, page: &Page, len: usize) -> PageLinks {
        let last_page = page.last_page(len);
        let url = |number| self.page_url(locale, kind, number, page.size);

        let first = url(1);
        let last = url(last_page);
        let prev = (page.number > 1).then(|| url(page.number - 1));
        let next = (page.number < last_page).then(|| url(page.number + 1));

        PageLinks {
            single_page: first == last,
            links: PaginationLinks {
                first,
                prev,
                next,
                last,
            },
        }
    }
}
