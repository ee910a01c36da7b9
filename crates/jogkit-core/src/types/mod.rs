//! Shared-state helpers.
//!
//! - [`aliases`]: `Arc<Mutex<Vec<T>>>` and `Arc<RwLock<T>>` aliases.

pub mod aliases;

pub use aliases::*;
