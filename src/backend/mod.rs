// ABOUTME: Backend module - the translation provider abstraction and the
// ABOUTME: NiuTrans implementation the tool ships with.

mod client;
mod config;
mod niutrans;

pub use client::*;
pub use config::*;
pub use niutrans::*;
