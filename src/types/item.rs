use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Insert payload. Anything left `None` is omitted from the INSERT so the
/// table's own defaults and NOT NULL checks apply.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct CreateItem {
    #[serde(default)]
    pub id: Option<Uuid>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub quantity: Option<i32>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl CreateItem {
    pub fn new(category: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            category: Some(category.into()),
            name: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn quantity(mut self, quantity: i32) -> Self {
        self.quantity = Some(quantity);
        self
    }

    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// Partial update. `id` and `created_at` are not part of it.
/// For the nullable columns the outer `Option` means "leave as is" and
/// `Some(None)` writes NULL; in JSON that is a missing key versus `null`.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct UpdateItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "present")]
    pub quantity: Option<Option<i32>>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "present")]
    pub notes: Option<Option<String>>,
}

// Only runs for keys that are present, so `null` becomes `Some(None)`.
fn present<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl UpdateItem {
    pub fn is_empty(&self) -> bool {
        self.category.is_none() && self.name.is_none() && self.quantity.is_none() && self.notes.is_none()
    }
}
