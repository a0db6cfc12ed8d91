use axum::http::Uri;
use serde::{Deserialize, Serialize};

use foodgram_domain::pagination::{Page, PageRequest};

/// `page` and `limit` query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl PageQuery {
    pub fn to_request(&self, default_limit: u32) -> PageRequest {
        PageRequest::new(self.page, self.limit, default_limit)
    }
}

/// Paginated list envelope.
#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub count: u64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

impl<T> Paginated<T> {
    /// Wrap `page`, linking neighbours relative to the request URI.
    pub fn new(page: Page<T>, request: PageRequest, public_url: &str, uri: &Uri) -> Self {
        let next = page
            .has_next(request)
            .then(|| page_url(public_url, uri, request.page + 1));
        let previous = page
            .has_previous(request)
            .then(|| page_url(public_url, uri, request.page - 1));
        Self {
            count: page.count,
            next,
            previous,
            results: page.items,
        }
    }
}

/// Absolute URL of the same request with `page` replaced. Page 1 drops the parameter.
fn page_url(public_url: &str, uri: &Uri, page: u32) -> String {
    let mut params: Vec<String> = uri
        .query()
        .unwrap_or_default()
        .split('&')
        .filter(|p| !p.is_empty() && *p != "page" && !p.starts_with("page="))
        .map(str::to_owned)
        .collect();
    if page > 1 {
        params.push(format!("page={page}"));
    }
    let mut url = format!("{public_url}{}", uri.path());
    if !params.is_empty() {
        url.push('?');
        url.push_str(&params.join("&"));
    }
    url
}
