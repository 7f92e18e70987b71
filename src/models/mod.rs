//! Typed content models
//!
//! Records the manager's convenience accessors store and fetch.

pub mod content;

pub use content::{Product, Testimonial};
