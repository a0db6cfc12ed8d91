//! Mock gateway identity for integration tests.
//!
//! The gateway injects `x-foodgram-user-id` in front of the service. Tests
//! build the same header with `MockAuth` so no gateway is needed.

use axum::http::{HeaderMap, HeaderName, HeaderValue};

use foodgram_auth_types::USER_ID_HEADER;

/// Identity injected into test requests.
pub struct MockAuth {
    pub user_id: i32,
}

impl MockAuth {
    pub fn new(user_id: i32) -> Self {
        Self { user_id }
    }

    pub fn header_name() -> HeaderName {
        HeaderName::from_static(USER_ID_HEADER)
    }

    pub fn header_value(&self) -> HeaderValue {
        HeaderValue::from(self.user_id)
    }

    /// Return headers as if the gateway injected them.
    pub fn headers(&self) -> HeaderMap {
        let mut map = HeaderMap::new();
        map.insert(Self::header_name(), self.header_value());
        map
    }
}
