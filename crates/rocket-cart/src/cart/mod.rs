//! Shopping cart module.
//!
//! Contains the cart snapshot types, the notification contract, and the
//! [`CartStore`] state container that ties them to storage and the catalog.

mod cart;
mod notify;
mod store;

pub use cart::{Cart, LineItem, CART_STORAGE_KEY};
pub use notify::{
    CartOperation, LogSink, NotificationSink, RecordingSink, MSG_ADD_FAILED, MSG_OUT_OF_STOCK,
    MSG_REMOVE_FAILED, MSG_UPDATE_FAILED,
};
pub use store::{CartStore, MutationOutcome};
