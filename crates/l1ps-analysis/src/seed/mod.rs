//! The seed-name micro-grammar.
//!
//! Seed names follow `L1_<Basename><DigitSuffix>?<AttributeSegments>*`.
//! Everything here is stateless string surgery; criteria call into this
//! module to isolate exactly one dimension of a name at a time.

pub mod basename;
pub mod numeric;
pub mod segments;

pub use basename::{basename, MultiplicityClass};
pub use numeric::parse_decimal;
pub use segments::{first_match, occurrences, strip_once};
