//! Insight summarizer boundary for MedisSync.
//!
//! Wraps the external text-suggestion service behind a single
//! request/response seam: the request is either a SOAP note or a batch of
//! (department, status) encounter digests, the response is one free-text
//! string. The service is purely advisory and never authoritative; the
//! public helpers fold every backend failure into a fixed fallback string,
//! so callers never see an error.

pub mod prompts;
pub mod summarizer;

#[cfg(feature = "remote")]
pub mod remote;

pub use prompts::*;
pub use summarizer::*;
