//! Data models for the journal application.
//!
//! These models match the frontend TypeScript interfaces exactly for seamless interoperability.

mod draft;
mod photo;
mod post;

pub use draft::*;
pub use photo::*;
pub use post::*;
