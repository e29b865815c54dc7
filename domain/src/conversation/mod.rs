//! Conversation domain: turns, caller-owned history, and the
//! request/result contracts of the answerer.

pub mod entities;
pub mod query;
