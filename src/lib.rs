// ABOUTME: Root module for translate-tool - the Translate Text tool for LLM hosts.
// ABOUTME: Re-exports the manifest, tool plumbing, backend, and built-in tools.

pub mod backend;
pub mod error;
pub mod manifest;
pub mod prelude;
pub mod tool;
pub mod tools;

pub use error::{BackendError, TranslateError};
