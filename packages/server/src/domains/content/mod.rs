//! Content domain - turns a completed job into page and social content.
//!
//! Everything here is pure: no I/O, and any stylistic randomness comes from a
//! caller-seeded `fastrand::Rng`.

pub mod builder;
pub mod captions;
pub mod error;
pub mod extractor;
pub mod models;

pub use builder::{build_project, BuildOptions};
pub use captions::{caption_variants, draft_email, promo_post};
pub use error::ContentError;
pub use extractor::extract_content;
pub use models::*;
