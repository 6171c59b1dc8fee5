//! Request-scoped services shared by handlers.

pub mod cookies;
pub mod session;
