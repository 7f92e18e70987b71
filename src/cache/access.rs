//! Access Order Module
//!
//! Tracks the order in which keys were last touched, for recency eviction.

use std::collections::VecDeque;

// == Access Order ==
/// Tracks access order for the recency eviction strategy.
///
/// Keys are stored in a VecDeque where:
/// - Front = Least recently touched
/// - Back = Most recently touched
///
/// Each tracked key appears exactly once.
#[derive(Debug, Default)]
pub struct AccessOrder {
    order: VecDeque<String>,
}

impl AccessOrder {
    // == Constructor ==
    /// Creates a new empty tracker.
    pub fn new() -> Self {
        Self {
            order: VecDeque::new(),
        }
    }

    // == Touch ==
    /// Marks a key as most recently touched (moves it to the back).
    pub fn touch(&mut self, key: &str) {
        self.remove(key);
        self.order.push_back(key.to_string());
    }

    // == Remove ==
    /// Removes a key from the tracker. Unknown keys are ignored.
    pub fn remove(&mut self, key: &str) {
        self.order.retain(|k| k != key);
    }

    // == Least Recent ==
    /// Returns the least recently touched key without removing it.
    pub fn least_recent(&self) -> Option<&str> {
        self.order.front().map(String::as_str)
    }

    // == Clear ==
    pub fn clear(&mut self) {
        self.order.clear();
    }

    // == Length ==
    /// Returns the number of tracked keys.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    // == Contains ==
    /// Checks if a key is being tracked.
    #[allow(dead_code)]
    pub(crate) fn contains(&self, key: &str) -> bool {
        self.order.iter().any(|k| k == key)
    }

    /// Iterates keys from least to most recently touched.
    #[allow(dead_code)]
    pub(crate) fn iter(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }
}
