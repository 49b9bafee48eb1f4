//! Buffer-backed path parameter store.
//!
//! Names and values live in two index-aligned vectors that are never shrunk.
//! Only the first `len` slots belong to the current request; anything past
//! that is leftover storage from an earlier one and must not be read.

/// Default number of parameter slots reserved for a fresh store.
pub const DEFAULT_PARAM_CAPACITY: usize = 10;

/// Path parameters registered by the router for the current request.
#[derive(Debug)]
pub struct Params {
    names: Vec<String>,
    values: Vec<Vec<u8>>,
    /// Number of live slots.
    len: usize,
}

impl Params {
    /// Create an empty store with `capacity` slots reserved.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            names: Vec::with_capacity(capacity),
            values: Vec::with_capacity(capacity),
            len: 0,
        }
    }

    /// Register a parameter.
    ///
    /// Reuses the buffers of a previously occupied slot when there is one.
    pub fn push(&mut self, name: &str, value: &[u8]) {
        if self.len < self.names.len() {
            let slot_name = &mut self.names[self.len];
            slot_name.clear();
            slot_name.push_str(name);

            let slot_value = &mut self.values[self.len];
            slot_value.clear();
            slot_value.extend_from_slice(value);
        } else {
            self.names.push(name.to_owned());
            self.values.push(value.to_vec());
        }
        self.len += 1;
    }

    /// Value of the first live parameter called `name`.
    ///
    /// Always matches on the name slot first; value slots are never
    /// indexed by position alone.
    #[inline]
    pub fn get(&self, name: &str) -> Option<&[u8]> {
        self.names[..self.len]
            .iter()
            .position(|n| n == name)
            .map(|i| self.values[i].as_slice())
    }

    /// Whether `name` is registered for the current request.
    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.names[..self.len].iter().any(|n| n == name)
    }

    /// Forget all live parameters. Slot storage is kept for reuse.
    #[inline]
    pub fn reset(&mut self) {
        self.len = 0;
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of slots that can be filled without growing the vectors.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.names.capacity().min(self.values.capacity())
    }

    /// Live parameters in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[u8])> {
        self.names[..self.len]
            .iter()
            .zip(&self.values[..self.len])
            .map(|(n, v)| (n.as_str(), v.as_slice()))
    }
}

impl Default for Params {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_PARAM_CAPACITY)
    }
}
