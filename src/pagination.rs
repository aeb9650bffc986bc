use axum::http::{HeaderMap, HeaderValue};

/// Default page size when the caller supplies no usable `limit`.
pub const DEFAULT_LIMIT: u64 = 10;

/// A 1-based page window resolved from the `page`/`limit` query parameters.
///
/// Zero is treated the same as absent for both parameters, so `page=0`
/// resolves to page 1 and `limit=0` to the default page size. There is no
/// upper bound on `limit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub page: u64,
    pub limit: u64,
}

impl PageWindow {
    #[must_use]
    pub fn new(page: Option<u64>, limit: Option<u64>) -> Self {
        let page = match page {
            Some(page) if page > 0 => page,
            _ => 1,
        };
        let limit = match limit {
            Some(limit) if limit > 0 => limit,
            _ => DEFAULT_LIMIT,
        };
        Self { page, limit }
    }

    /// Number of rows to skip: `(page - 1) * limit`.
    #[must_use]
    pub fn offset(self) -> u64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

impl Default for PageWindow {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// Strip anything that could smuggle extra headers through a caller-supplied
/// model name. Model names reach this header verbatim from the query string.
fn sanitize_model_name(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-'))
        .collect()
}

/// Build the `Content-Range` header for a paginated listing:
/// `<model> <first>-<last>/<total>`.
#[must_use]
pub fn content_range_header(
    offset: u64,
    limit: u64,
    total_count: u64,
    model_name: &str,
) -> HeaderMap {
    let last = if total_count == 0 {
        0
    } else {
        (offset + limit - 1).min(total_count - 1)
    };

    let mut name = sanitize_model_name(model_name);
    if name.is_empty() {
        name = "items".to_string();
    }

    let mut headers = HeaderMap::new();
    let content_range = format!("{name} {offset}-{last}/{total_count}");
    if let Ok(value) = HeaderValue::from_str(&content_range) {
        headers.insert("Content-Range", value);
    }
    headers
}
