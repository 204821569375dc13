//! Virtual machine configuration.

use std::env;
use std::str::FromStr;

use log::warn;

pub const DEFAULT_STACK_POOL_SIZE: usize = 10;
pub const DEFAULT_STACK_CAPACITY: usize = 32;

pub const STACK_POOL_SIZE_VAR: &str = "RECKON_STACK_POOL_SIZE";
pub const STACK_CAPACITY_VAR: &str = "RECKON_STACK_CAPACITY";

/// Sizing for the VM's pool of operand stacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VmConfig {
    /// Most idle stacks kept for reuse. Zero means the default.
    pub stack_pool_size: usize,
    /// Initial capacity of a freshly allocated stack.
    pub stack_capacity: usize,
}

impl Default for VmConfig {
    fn default() -> Self {
        Self {
            stack_pool_size: DEFAULT_STACK_POOL_SIZE,
            stack_capacity: DEFAULT_STACK_CAPACITY,
        }
    }
}

impl VmConfig {
    pub fn new(stack_pool_size: usize, stack_capacity: usize) -> Self {
        Self {
            stack_pool_size,
            stack_capacity,
        }
    }

    /// Defaults overridden by `RECKON_STACK_POOL_SIZE` and
    /// `RECKON_STACK_CAPACITY` where those are set to valid numbers.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Like [`VmConfig::from_env`], reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(size) = read_var(&lookup, STACK_POOL_SIZE_VAR) {
            config.stack_pool_size = size;
        }
        if let Some(capacity) = read_var(&lookup, STACK_CAPACITY_VAR) {
            config.stack_capacity = capacity;
        }
        config.with_defaults()
    }

    /// Replace unset fields with their defaults.
    pub fn with_defaults(mut self) -> Self {
        if self.stack_pool_size == 0 {
            self.stack_pool_size = DEFAULT_STACK_POOL_SIZE;
        }
        self
    }
}

fn read_var<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("ignoring {}={:?}: not a valid number", key, raw);
            None
        }
    }
}
