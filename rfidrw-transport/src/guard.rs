//! Scoped read timeout
//!
//! The engine switches the read timeout several times per exchange. A
//! [`TimeoutGuard`] applies a timeout for its lifetime and puts the
//! previous one back when dropped, whichever way the scope is left.

use std::ops::{Deref, DerefMut};
use std::time::Duration;

use bytes::BytesMut;
use tracing::{trace, warn};

use crate::{error::Result, Transport};

/// Transport borrowed with a temporary read timeout
pub struct TimeoutGuard<'a, T: Transport + ?Sized> {
    transport: &'a mut T,
    previous: Duration,
}

impl<'a, T: Transport + ?Sized> TimeoutGuard<'a, T> {
    /// Apply `timeout` to `transport` until the guard is dropped
    pub fn new(transport: &'a mut T, timeout: Duration) -> Result<Self> {
        let previous = transport.timeout();
        transport.set_timeout(timeout)?;

        trace!(?previous, ?timeout, "Read timeout applied");

        Ok(Self {
            transport,
            previous,
        })
    }
}

impl<T: Transport + ?Sized> Deref for TimeoutGuard<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        self.transport
    }
}

impl<T: Transport + ?Sized> DerefMut for TimeoutGuard<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        self.transport
    }
}

impl<T: Transport + ?Sized> Drop for TimeoutGuard<'_, T> {
    fn drop(&mut self) {
        if let Err(e) = self.transport.set_timeout(self.previous) {
            warn!(
                "Failed to restore read timeout {:?} on {}: {}",
                self.previous,
                self.transport.endpoint(),
                e
            );
        }
    }
}

/// Read `n` bytes, waiting up to `timeout` for each chunk
///
/// Returns fewer than `n` bytes (possibly none) if the timeout elapsed
/// first. The transport's previous timeout is restored before returning.
pub fn read_exact_or_timeout<T: Transport + ?Sized>(
    transport: &mut T,
    n: usize,
    timeout: Duration,
) -> Result<BytesMut> {
    let mut guard = TimeoutGuard::new(transport, timeout)?;
    let mut buf = BytesMut::with_capacity(n);

    while buf.len() < n {
        let chunk = guard.read_available(n - buf.len())?;
        if chunk.is_empty() {
            break;
        }
        buf.extend_from_slice(&chunk);
    }

    Ok(buf)
}
