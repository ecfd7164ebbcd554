//! Port allocation for listener-backed sources.

use crate::error::SourceError;
use std::sync::atomic::{AtomicU32, Ordering};

/// First port handed out by [`PortAllocator::default`].
pub const DEFAULT_START_PORT: u16 = 5555;

const PAST_LAST_PORT: u32 = u16::MAX as u32 + 1;

/// Monotonic port counter owned by the test-orchestration context and shared
/// (usually through an `Arc`) with every HTTP source it creates.
#[derive(Debug)]
pub struct PortAllocator {
    next: AtomicU32,
}

impl PortAllocator {
    pub fn new(start: u16) -> Self {
        Self {
            next: AtomicU32::new(u32::from(start)),
        }
    }

    /// Hand out the next port. Fails once 65535 has been handed out.
    pub fn allocate(&self) -> Result<u16, SourceError> {
        self.next
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |next| {
                (next < PAST_LAST_PORT).then_some(next + 1)
            })
            .ok()
            .and_then(|port| u16::try_from(port).ok())
            .ok_or(SourceError::PortsExhausted)
    }

    /// The port the next call to [`allocate`](Self::allocate) will return,
    /// or `None` when the range is used up.
    pub fn peek(&self) -> Option<u16> {
        u16::try_from(self.next.load(Ordering::SeqCst)).ok()
    }
}

impl Default for PortAllocator {
    fn default() -> Self {
        Self::new(DEFAULT_START_PORT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_monotonic() {
        let ports = PortAllocator::default();
        assert_eq!(ports.allocate().unwrap(), 5555);
        assert_eq!(ports.allocate().unwrap(), 5556);
        assert_eq!(ports.peek(), Some(5557));
    }

    #[test]
    fn test_shared_allocators_do_not_collide() {
        let ports = Arc::new(PortAllocator::new(9000));
        let other = Arc::clone(&ports);
        let a = ports.allocate().unwrap();
        let b = other.allocate().unwrap();
        assert_ne!(a, b);

        // Independent contexts start over.
        assert_eq!(PortAllocator::new(9000).allocate().unwrap(), 9000);
    }

    #[test]
    fn test_exhaustion_does_not_wrap() {
        let ports = PortAllocator::new(u16::MAX - 1);
        assert_eq!(ports.allocate().unwrap(), u16::MAX - 1);
        assert_eq!(ports.allocate().unwrap(), u16::MAX);
        assert_eq!(ports.peek(), None);
        assert!(matches!(ports.allocate(), Err(SourceError::PortsExhausted)));
        assert!(matches!(ports.allocate(), Err(SourceError::PortsExhausted)));
    }
}
