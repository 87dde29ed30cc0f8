//! URL handling module for Shelf-Sweep
//!
//! Item links on listing pages come in several relative shapes depending on
//! where the page sits in the catalog tree. This module turns them into
//! absolute URLs and resolves category and pagination links.

mod normalize;

// Re-export main functions
pub use normalize::{resolve_sibling, LinkNormalizer};
