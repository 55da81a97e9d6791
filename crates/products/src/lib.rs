//! Product catalog wire models.
//!
//! These types mirror the JSON shapes served by the product API. The server
//! owns the shapes; the client keeps the fields it knows about and carries any
//! other fields through untouched.

pub mod page;
pub mod product;

pub use page::{PageRequest, ProductPage};
pub use product::{Link, Links, Product, ProductDraft, ProductId};
