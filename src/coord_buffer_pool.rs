use crate::coord_buffer::CoordBuffer;
use std::{
    ops::{Deref, DerefMut},
    sync::{Mutex, PoisonError},
};

pub struct CoordBufferPool {
    idle: Mutex<Vec<CoordBuffer>>,
    initial_capacity: usize,
}

impl CoordBufferPool {
    pub fn new(initial_capacity: usize) -> Self {
        Self {
            idle: Mutex::new(Vec::new()),
            initial_capacity,
        }
    }

    /// Takes an idle buffer or creates one. The buffer is always empty.
    pub fn acquire(&self) -> PooledCoordBuffer<'_> {
        let buffer = self
            .idle
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop()
            .unwrap_or_else(|| CoordBuffer::with_capacity(self.initial_capacity));

        PooledCoordBuffer {
            pool: self,
            buffer: Some(buffer),
        }
    }

    pub fn idle_count(&self) -> usize {
        self.idle.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    fn release(&self, mut buffer: CoordBuffer) {
        buffer.reset();

        self.idle
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(buffer);
    }
}

impl Default for CoordBufferPool {
    fn default() -> Self {
        Self::new(4096)
    }
}

/// Buffer on loan from a [`CoordBufferPool`], reset and returned on drop.
pub struct PooledCoordBuffer<'a> {
    pool: &'a CoordBufferPool,
    buffer: Option<CoordBuffer>,
}

impl Deref for PooledCoordBuffer<'_> {
    type Target = CoordBuffer;

    fn deref(&self) -> &CoordBuffer {
        self.buffer.as_ref().expect("buffer present until drop")
    }
}

impl DerefMut for PooledCoordBuffer<'_> {
    fn deref_mut(&mut self) -> &mut CoordBuffer {
        self.buffer.as_mut().expect("buffer present until drop")
    }
}

impl Drop for PooledCoordBuffer<'_> {
    fn drop(&mut self) {
        if let Some(buffer) = self.buffer.take() {
            self.pool.release(buffer);
        }
    }
}
