//! Completion reply domain.
//!
//! - [`reply::CompletionReply`]: the tagged union of known reply shapes
//! - [`reply::FALLBACK_REPLY`]: text used when the completion call fails

pub mod reply;
