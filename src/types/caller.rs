use uuid::Uuid;

/// Who a row operation runs on behalf of. Nothing here is authenticated by
/// the crate itself; the active `AccessPolicy` decides what it is worth.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Caller {
    pub user_id: Option<Uuid>,
    pub secret: Option<String>,
}

impl Caller {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn user(user_id: Uuid) -> Self {
        Self { user_id: Some(user_id), secret: None }
    }

    pub fn with_secret(mut self, secret: impl Into<String>) -> Self {
        self.secret = Some(secret.into());
        self
    }
}
