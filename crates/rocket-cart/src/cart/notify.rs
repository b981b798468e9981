//! User-facing notifications for failed cart mutations.

use std::sync::Mutex;

use crate::error::CartError;

/// Shown when the requested amount exceeds stock.
pub const MSG_OUT_OF_STOCK: &str = "Quantidade solicitada fora de estoque";
/// Generic failure of `add_product`.
pub const MSG_ADD_FAILED: &str = "Erro na adição do produto";
/// Generic failure of `remove_product`.
pub const MSG_REMOVE_FAILED: &str = "Erro na remoção do produto";
/// Generic failure of `update_product_amount`.
pub const MSG_UPDATE_FAILED: &str = "Erro na alteração de quantidade do produto";

/// Displays user-visible error messages (a toast, a status line, ...).
///
/// Fire-and-forget: implementations must not block or fail.
pub trait NotificationSink: Send + Sync {
    /// Show an error message.
    fn error(&self, message: &str);
}

/// The cart mutation a failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CartOperation {
    Add,
    Remove,
    UpdateAmount,
}

impl CartOperation {
    /// Operation name for logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Add => "add_product",
            Self::Remove => "remove_product",
            Self::UpdateAmount => "update_product_amount",
        }
    }

    /// Generic failure message for this operation.
    pub fn failure_message(&self) -> &'static str {
        match self {
            Self::Add => MSG_ADD_FAILED,
            Self::Remove => MSG_REMOVE_FAILED,
            Self::UpdateAmount => MSG_UPDATE_FAILED,
        }
    }

    /// Message to show for `error`, or `None` if it is reported silently.
    pub fn message_for(&self, error: &CartError) -> Option<&'static str> {
        match error {
            CartError::InvalidAmount(_) => None,
            CartError::StockExceeded { .. } => Some(MSG_OUT_OF_STOCK),
            CartError::ProductNotInCart(_)
            | CartError::Lookup(_)
            | CartError::Storage(_)
            | CartError::InvalidCart(_) => Some(self.failure_message()),
        }
    }
}

impl std::fmt::Display for CartOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Sink that forwards messages to the `tracing` log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl NotificationSink for LogSink {
    fn error(&self, message: &str) {
        tracing::error!(target: "rocket::notify", "{message}");
    }
}

/// Sink that records every message; useful in tests and headless callers.
#[derive(Debug, Default)]
pub struct RecordingSink {
    messages: Mutex<Vec<String>>,
}

impl RecordingSink {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages received so far, oldest first.
    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .map(|m| m.clone())
            .unwrap_or_default()
    }

    /// Drain recorded messages.
    pub fn take(&self) -> Vec<String> {
        self.messages
            .lock()
            .map(|mut m| std::mem::take(&mut *m))
            .unwrap_or_default()
    }
}

impl NotificationSink for RecordingSink {
    fn error(&self, message: &str) {
        if let Ok(mut messages) = self.messages.lock() {
            messages.push(message.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::ProductId;

    #[test]
    fn test_stock_message_is_shared() {
        let err = CartError::StockExceeded {
            product_id: ProductId::new(1),
            requested: 3,
            available: 2,
        };
        assert_eq!(CartOperation::Add.message_for(&err), Some(MSG_OUT_OF_STOCK));
        assert_eq!(
            CartOperation::UpdateAmount.message_for(&err),
            Some(MSG_OUT_OF_STOCK)
        );
    }

    #[test]
    fn test_generic_messages_per_operation() {
        let err = CartError::ProductNotInCart(ProductId::new(1));
        assert_eq!(CartOperation::Add.message_for(&err), Some(MSG_ADD_FAILED));
        assert_eq!(CartOperation::Remove.message_for(&err), Some(MSG_REMOVE_FAILED));
        assert_eq!(
            CartOperation::UpdateAmount.message_for(&err),
            Some(MSG_UPDATE_FAILED)
        );
    }

    #[test]
    fn test_invalid_amount_is_silent() {
        let err = CartError::InvalidAmount(0);
        assert_eq!(CartOperation::UpdateAmount.message_for(&err), None);
    }

    #[test]
    fn test_recording_sink() {
        let sink = RecordingSink::new();
        sink.error("one");
        sink.error("two");
        assert_eq!(sink.messages(), vec!["one", "two"]);
        assert_eq!(sink.take().len(), 2);
        assert!(sink.messages().is_empty());
    }
}
