//! Error types for catalog resolution.
//!
//! Nothing in this crate treats an error as fatal. The taxonomy mirrors
//! how each failure degrades:
//!
//! - missing page region: the component silently no-ops
//! - fetch failure or an empty parse: the catalog cascades to its next
//!   fallback tier
//! - malformed citation text: the entry gets an empty tag set
//! - no dated entries: the chart renders nothing
//!
//! Only the catalog cascade carries a concrete error type, and it stays
//! internal to the tier logic; callers of [`crate::TagCatalog::resolve`]
//! always get a usable catalog.

use thiserror::Error;

/// Why a catalog resolution tier was skipped.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Every candidate resource path failed to fetch.
    #[error("no candidate resource path could be fetched")]
    AllPathsFailed,

    /// The resource fetched fine but parsing yielded zero tag records.
    #[error("resource at {path:?} contained no tag records")]
    EmptyResource {
        /// The candidate path that was fetched.
        path: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_error_display() {
        let err = CatalogError::AllPathsFailed;
        assert_eq!(
            err.to_string(),
            "no candidate resource path could be fetched"
        );

        let err = CatalogError::EmptyResource {
            path: "assets/tags.yml".to_string(),
        };
        assert!(err.to_string().contains("assets/tags.yml"));
        assert!(err.to_string().contains("no tag records"));
    }
}
