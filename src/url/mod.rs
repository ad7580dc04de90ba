//! URL handling module
//!
//! Canonicalization and domain predicates. Every URL that enters the
//! frontier or the visited set goes through [`normalize_url`] first, so
//! equivalent URLs collapse to one identity.

mod domain;
mod normalize;

pub use domain::{host_of, same_domain};
pub use normalize::normalize_url;
