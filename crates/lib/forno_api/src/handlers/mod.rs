//! Request handlers.

pub mod chat;
pub mod history;
pub mod page;
