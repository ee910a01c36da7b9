//! Type aliases for the lock-wrapped state shared between the operator
//! control thread and the status poller.
//!
//! ```rust,ignore
//! use jogkit_core::types::*;
//!
//! // Instead of: Arc<Mutex<Vec<DriverCommand>>>
//! let journal: ThreadSafeVec<DriverCommand> = thread_safe_vec();
//! ```

use parking_lot::{Mutex, RwLock};
use std::sync::Arc;

/// A thread-safe append log, shared by every clone of its owner.
pub type ThreadSafeVec<T> = Arc<Mutex<Vec<T>>>;

/// Reader-writer locked state for read-heavy access.
///
/// Position reads from the poller and the control thread proceed together;
/// commands take the write lock.
pub type ThreadSafeRw<T> = Arc<RwLock<T>>;

/// Create a new empty `ThreadSafeVec<T>`.
#[inline]
pub fn thread_safe_vec<T>() -> ThreadSafeVec<T> {
    Arc::new(Mutex::new(Vec::new()))
}

/// Create a new `ThreadSafeRw<T>` from a value.
#[inline]
pub fn thread_safe_rw<T>(value: T) -> ThreadSafeRw<T> {
    Arc::new(RwLock::new(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Position;
    use crate::driver::DriverCommand;

    #[test]
    fn test_clones_share_journal() {
        let journal: ThreadSafeVec<DriverCommand> = thread_safe_vec();
        let view = journal.clone();
        journal.lock().push(DriverCommand::Stop);
        journal.lock().push(DriverCommand::SetFeedrate(480.0));

        assert_eq!(view.lock().len(), 2);
        assert_eq!(view.lock()[0], DriverCommand::Stop);
    }

    #[test]
    fn test_rw_readers_and_writer() {
        let position = thread_safe_rw(Position::new());
        {
            let a = position.read();
            let b = position.read();
            assert_eq!(*a, *b);
        }

        *position.write() = Position::from_xyz(1.0, 2.0, 3.0);
        assert_eq!(position.read().z(), 3.0);
    }
}
