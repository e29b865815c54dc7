//! Interactive chat module
//!
//! Provides a line-editor based interactive chat interface for docqa.

mod repl;

pub use repl::{ChatRepl, SlashCommand};
