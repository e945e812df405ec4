// ABOUTME: Built-in tools exposed to LLM hosts.
// ABOUTME: Currently the Translate Text adapter.

mod translate_text;

pub use translate_text::{TranslateTextTool, TranslationResult};
