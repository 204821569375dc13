//! Bounded pool of reusable operand stacks.

use std::ops::{Deref, DerefMut};
use std::sync::{Mutex, MutexGuard, PoisonError};

use log::debug;

/// A free list of `Vec<f64>` buffers shared by concurrent VM runs.
///
/// The lock is held only while a buffer is pushed to or popped from the
/// free list.
#[derive(Debug)]
pub struct StackPool {
    free: Mutex<Vec<Vec<f64>>>,
    max_idle: usize,
    capacity: usize,
}

impl StackPool {
    pub fn new(max_idle: usize, capacity: usize) -> Self {
        Self {
            free: Mutex::new(Vec::with_capacity(max_idle)),
            max_idle,
            capacity,
        }
    }

    /// Take a buffer from the pool, allocating one when none is idle.
    pub fn acquire(&self) -> PooledStack<'_> {
        let reused = self.lock().pop();
        let stack = reused.unwrap_or_else(|| {
            debug!("stack pool empty, allocating {} slots", self.capacity);
            Vec::with_capacity(self.capacity)
        });
        PooledStack {
            stack,
            pool: self,
        }
    }

    /// Number of buffers currently waiting in the pool.
    pub fn idle(&self) -> usize {
        self.lock().len()
    }

    pub fn max_idle(&self) -> usize {
        self.max_idle
    }

    fn release(&self, mut stack: Vec<f64>) {
        stack.clear();
        let mut free = self.lock();
        if free.len() < self.max_idle {
            free.push(stack);
        } else {
            debug!("stack pool full, dropping buffer");
        }
    }

    // The free list stays consistent even if a holder panicked.
    fn lock(&self) -> MutexGuard<'_, Vec<Vec<f64>>> {
        self.free.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// A stack checked out of a [`StackPool`]. Returned to the pool, empty,
/// when dropped.
#[derive(Debug)]
pub struct PooledStack<'p> {
    stack: Vec<f64>,
    pool: &'p StackPool,
}

impl Deref for PooledStack<'_> {
    type Target = Vec<f64>;

    fn deref(&self) -> &Vec<f64> {
        &self.stack
    }
}

impl DerefMut for PooledStack<'_> {
    fn deref_mut(&mut self) -> &mut Vec<f64> {
        &mut self.stack
    }
}

impl Drop for PooledStack<'_> {
    fn drop(&mut self) {
        self.pool.release(std::mem::take(&mut self.stack));
    }
}
