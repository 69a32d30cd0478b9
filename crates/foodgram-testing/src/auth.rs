//! Mock auth helpers for handler tests.
//!
//! Services behind the gateway receive an `x-foodgram-user-id` header injected
//! by the gateway. In tests, `MockAuth` builds that header directly so no real
//! gateway or token is needed.

use axum::http::{HeaderMap, HeaderName, HeaderValue, request::Builder};
use uuid::Uuid;

use foodgram_auth_types::identity::USER_ID_HEADER;

/// Configurable identity injected into test requests.
#[derive(Debug, Clone, Copy)]
pub struct MockAuth {
    pub user_id: Uuid,
}

impl MockAuth {
    pub fn new(user_id: Uuid) -> Self {
        Self { user_id }
    }

    pub fn random() -> Self {
        Self::new(Uuid::new_v4())
    }

    /// Return headers as if the gateway injected them.
    pub fn headers(&self) -> HeaderMap {
        let mut map = HeaderMap::new();
        map.insert(
            HeaderName::from_static(USER_ID_HEADER),
            HeaderValue::from_str(&self.user_id.to_string()).unwrap(),
        );
        map
    }

    /// Attach the identity header to a request builder.
    pub fn apply(&self, builder: Builder) -> Builder {
        builder.header(USER_ID_HEADER, self.user_id.to_string())
    }
}
