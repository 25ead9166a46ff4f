//! Report generation and rendering.
//!
//! # Submodules
//!
//! - [`report`]: Builds the plain-text [`Report`](crate::models::Report) from scores
//! - [`json`]: Serializes a report for `--json` output
//!
//! Neither module writes anywhere; printing is left to `main`.

pub mod json;
pub mod report;
