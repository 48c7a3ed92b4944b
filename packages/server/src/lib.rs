// Job Showcase Pipeline - Core
//
// Turns completed field-service jobs into published marketing content:
// a project page in the website repository, a business profile post, and
// social caption drafts emailed for review.
//
// Pipeline steps live in domains/pipeline; external services sit behind the
// kernel's Base* traits.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
