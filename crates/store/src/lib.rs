//! Pagemark store library
//!
//! Durable key/value storage for the viewer. The loaded document, the
//! annotation list, the last viewed page and the user profile each live
//! under a fixed key and survive restarts.

pub mod store;

pub use store::{
    Store, StoreError, StoreResult, ANNOTATIONS_KEY, DOCUMENT_KEY, LAST_PAGE_KEY, USER_INFO_KEY,
};
