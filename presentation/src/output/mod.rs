//! Output formatting for answers, history and index status

pub mod console;
