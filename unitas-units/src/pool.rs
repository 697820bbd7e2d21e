//! Scoped buffer pool
//!
//! A render borrows a `String` for its duration; dropping the guard clears the
//! buffer and hands it back, on every exit path including early returns and
//! unwinding.

use std::ops::{Deref, DerefMut};
use std::sync::Mutex;
use tracing::trace;

/// A bounded pool of reusable text buffers
///
/// When no idle buffer is available a fresh one is allocated instead of
/// blocking; buffers released while the pool is full are dropped.
pub struct BufferPool {
    idle: Mutex<Vec<String>>,
    capacity: usize,
    buffer_capacity: usize,
}

impl BufferPool {
    pub fn new(capacity: usize, buffer_capacity: usize) -> Self {
        BufferPool {
            idle: Mutex::new(Vec::with_capacity(capacity)),
            capacity,
            buffer_capacity,
        }
    }

    /// Check out an empty buffer, exclusively owned until the guard drops
    pub fn borrow(&self) -> PooledBuffer<'_> {
        let reused = match self.idle.lock() {
            Ok(mut idle) => idle.pop(),
            Err(_) => None,
        };
        let buffer = reused.unwrap_or_else(|| {
            trace!(capacity = self.capacity, "buffer pool empty, allocating");
            String::with_capacity(self.buffer_capacity)
        });

        PooledBuffer { pool: self, buffer }
    }

    fn release(&self, mut buffer: String) {
        buffer.clear();
        if buffer.capacity() > self.buffer_capacity.saturating_mul(4) {
            buffer.shrink_to(self.buffer_capacity);
        }
        if let Ok(mut idle) = self.idle.lock() {
            if idle.len() < self.capacity {
                idle.push(buffer);
            }
        }
    }

    /// Maximum number of idle buffers kept
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn buffer_capacity(&self) -> usize {
        self.buffer_capacity
    }

    /// Number of buffers currently waiting for reuse
    pub fn idle_count(&self) -> usize {
        self.idle.lock().map(|idle| idle.len()).unwrap_or(0)
    }
}

/// RAII guard over a pooled buffer
///
/// Derefs to `String`. The buffer returns to its pool when the guard is
/// dropped.
pub struct PooledBuffer<'a> {
    pool: &'a BufferPool,
    buffer: String,
}

impl PooledBuffer<'_> {
    /// Copy the contents out; the buffer itself goes back to the pool
    pub fn to_owned_string(&self) -> String {
        self.buffer.as_str().to_owned()
    }
}

impl Drop for PooledBuffer<'_> {
    fn drop(&mut self) {
        self.pool.release(std::mem::take(&mut self.buffer));
    }
}

impl Deref for PooledBuffer<'_> {
    type Target = String;

    fn deref(&self) -> &Self::Target {
        &self.buffer
    }
}

impl DerefMut for PooledBuffer<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.buffer
    }
}
