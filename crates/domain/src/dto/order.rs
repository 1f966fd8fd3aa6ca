//! Order payloads.

use serde::{Deserialize, Serialize};

/// Order lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderStatus {
    /// Newly created.
    #[default]
    Open,
    /// Accepted by a courier.
    Accepted,
    /// Being delivered.
    InProgress,
    /// Delivered.
    Delivered,
}

/// An order record.
///
/// `id` is assigned by the server after creation and is omitted from
/// outgoing payloads until then.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Server-assigned id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Lifecycle status.
    pub status: OrderStatus,
    /// Number of items.
    pub quantity: i64,
    /// Customer display name.
    pub customer_name: String,
    /// Customer phone.
    pub phone: String,
    /// Free-form note.
    pub note: String,
}

impl Order {
    /// Creates an order without an id.
    #[must_use]
    pub fn new(
        status: OrderStatus,
        quantity: i64,
        customer_name: impl Into<String>,
        phone: impl Into<String>,
        note: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            status,
            quantity,
            customer_name: customer_name.into(),
            phone: phone.into(),
            note: note.into(),
        }
    }

    /// Returns the order with an id attached.
    #[must_use]
    pub const fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }
}
