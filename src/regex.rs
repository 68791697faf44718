//! Regex engine selection.
//!
//! The `regex` feature (default) pulls the full `regex` crate; `lite`
//! swaps in `regex-lite` for smaller builds. Both expose the same API
//! surface used here.

#[cfg(feature = "regex")]
pub(crate) use regex::{Regex, escape};

#[cfg(all(feature = "lite", not(feature = "regex")))]
pub(crate) use regex_lite::{Regex, escape};

#[cfg(not(any(feature = "regex", feature = "lite")))]
compile_error!("bibfilter requires either the `regex` or the `lite` feature");
