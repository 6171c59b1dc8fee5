//! # forno_core
//!
//! Conversation, session and model gateway logic for Forno.

pub mod chat;
pub mod conversation;
pub mod gateway;
pub mod session;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_not_empty() {
        assert!(!version().is_empty());
    }
}
