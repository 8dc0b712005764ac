use std::sync::atomic::{AtomicBool, Ordering};

/// Serializes backend-facing operations.
#[derive(Debug, Default)]
pub(crate) struct BusyLock {
    held: AtomicBool,
}

impl BusyLock {
    /// `None` if another operation already holds the lock.
    pub(crate) fn try_acquire(&self) -> Option<BusyGuard<'_>> {
        self.held
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| BusyGuard { lock: self })
    }

    pub(crate) fn is_held(&self) -> bool {
        self.held.load(Ordering::Acquire)
    }
}

/// Releases the lock on drop, once.
#[derive(Debug)]
pub(crate) struct BusyGuard<'a> {
    lock: &'a BusyLock,
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.lock.held.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_acquire_fails_while_held() {
        let lock = BusyLock::default();
        let guard = lock.try_acquire().expect("first acquire");
        assert!(lock.try_acquire().is_none());
        assert!(lock.is_held());

        drop(guard);
        assert!(!lock.is_held());
        assert!(lock.try_acquire().is_some());
    }
}
