//! # Response Formatting
//!
//! Bodies for the order mutation endpoints. The legacy success messages
//! are kept verbatim, with the matched/deleted count alongside so
//! callers can tell a real update from a no-op.

use serde::Serialize;

/// Response to `PUT /updateOrder/:id`
#[derive(Debug, Clone, Serialize)]
pub struct UpdateOrderResponse {
    pub message: String,
    pub matched: u64,
}

impl UpdateOrderResponse {
    pub fn new(matched: u64) -> Self {
        Self {
            message: "Order Updated".to_string(),
            matched,
        }
    }
}

/// Response to `DELETE /deleteOrder/:id`
#[derive(Debug, Clone, Serialize)]
pub struct DeleteOrderResponse {
    pub message: String,
    pub deleted: u64,
}

impl DeleteOrderResponse {
    pub fn new(deleted: u64) -> Self {
        Self {
            message: "Order Deleted".to_string(),
            deleted,
        }
    }
}
