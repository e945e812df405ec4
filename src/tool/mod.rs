// ABOUTME: Tool module - the host-facing trait, results, and registry.
// ABOUTME: Core abstraction through which a host discovers and invokes tools.

mod registry;
mod result;
mod traits;

pub use registry::*;
pub use result::*;
pub use traits::*;
