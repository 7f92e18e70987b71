//! Content records cached on behalf of the storefront
//!
//! Defines the typed values stored by the manager's convenience accessors.

use serde::{Deserialize, Serialize};

/// A product shown on product and listing pages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub description: String,
    /// Image URL or path
    pub image: String,
}

/// A customer testimonial.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Testimonial {
    pub id: String,
    pub name: String,
    /// Avatar URL or path
    pub avatar: String,
    pub testimonial: String,
}
