//! Conversation state — the per-session snapshot sent to the model.
//!
//! Every operation takes a snapshot and returns a new one; nothing here
//! touches session storage.
//!
//! # Public API
//!
//! - [`create_initial_state`] / [`reset_session`] — fresh state for a session
//! - [`ConversationState::append_user_turn`] — validated user turn
//! - [`ConversationState::trim_history`] — suffix-keep sliding window
//! - [`ConversationState::append_model_turn`] — record the model's reply

pub mod prompt;

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default bound on the number of turns kept in history.
pub const MAX_TURNS: usize = 20;

/// Default `maxOutputTokens` sent with every request.
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 200;

/// Default sampling temperature sent with every request.
pub const DEFAULT_TEMPERATURE: f32 = 0.1;

/// Errors raised by conversation operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConversationError {
    #[error("message is empty")]
    InvalidInput,
}

/// Who spoke a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

/// One message in the conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub text: String,
}

impl Turn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: Role::Model,
            text: text.into(),
        }
    }
}

/// Sampling parameters for the model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    pub max_output_tokens: u32,
    pub temperature: f32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

/// Full serializable state of one chat session.
///
/// `system_instruction` and `generation_config` are fixed at creation; only
/// `turns` evolves, through the methods below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationState {
    system_instruction: String,
    turns: Vec<Turn>,
    generation_config: GenerationConfig,
}

impl ConversationState {
    pub fn system_instruction(&self) -> &str {
        &self.system_instruction
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn generation_config(&self) -> &GenerationConfig {
        &self.generation_config
    }

    /// Append a user turn.
    ///
    /// Fails with [`ConversationError::InvalidInput`] when `text` is empty or
    /// whitespace-only. The text is stored as given, untrimmed.
    pub fn append_user_turn(&self, text: &str) -> Result<Self, ConversationError> {
        if text.trim().is_empty() {
            return Err(ConversationError::InvalidInput);
        }
        Ok(self.with_turn(Turn::user(text)))
    }

    /// Keep only the most recent `max_turns` turns.
    pub fn trim_history(&self, max_turns: usize) -> Self {
        let skip = self.turns.len().saturating_sub(max_turns);
        Self {
            system_instruction: self.system_instruction.clone(),
            turns: self.turns[skip..].to_vec(),
            generation_config: self.generation_config,
        }
    }

    /// Append the model's reply.
    pub fn append_model_turn(&self, turn: Turn) -> Self {
        debug_assert_eq!(turn.role, Role::Model);
        self.with_turn(turn)
    }

    fn with_turn(&self, turn: Turn) -> Self {
        let mut next = self.clone();
        next.turns.push(turn);
        next
    }
}

/// Build a fresh state stamped with the local wall-clock time.
pub fn create_initial_state() -> ConversationState {
    create_initial_state_at(Local::now().naive_local())
}

/// Build a fresh state stamped with `now`.
pub fn create_initial_state_at(now: NaiveDateTime) -> ConversationState {
    ConversationState {
        system_instruction: prompt::system_instruction(now),
        turns: Vec::new(),
        generation_config: GenerationConfig::default(),
    }
}

/// Fresh state for a "clear history" action or a first visit.
pub fn reset_session() -> ConversationState {
    create_initial_state()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn fixed_clock() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2001, 3, 14)
            .and_then(|d| d.and_hms_opt(20, 30, 0))
            .unwrap()
    }

    /// State with `n` alternating user/model turns numbered from 1.
    fn state_with_turns(n: usize) -> ConversationState {
        let mut state = create_initial_state_at(fixed_clock());
        for i in 1..=n {
            let text = format!("turn {i}");
            state = if i % 2 == 1 {
                state.append_user_turn(&text).unwrap()
            } else {
                state.append_model_turn(Turn::model(text))
            };
        }
        state
    }

    #[test]
    fn initial_state_is_empty_with_instruction() {
        let state = create_initial_state();
        assert!(state.turns().is_empty());
        assert!(!state.system_instruction().is_empty());
        assert_eq!(state.generation_config().max_output_tokens, 200);
        assert_eq!(state.generation_config().temperature, 0.1);
    }

    #[test]
    fn append_user_turn_keeps_prior_turns() {
        let state = state_with_turns(4);
        for s in ["oi", "  Quero uma pizza  ", "ç"] {
            let next = state.append_user_turn(s).unwrap();
            assert_eq!(next.turns().len(), 5);
            assert_eq!(&next.turns()[..4], state.turns());
            assert_eq!(next.turns()[4], Turn::user(s));
        }
    }

    #[test]
    fn append_user_turn_rejects_blank_text() {
        let state = state_with_turns(2);
        for s in ["", "   ", "\n\t"] {
            assert_eq!(state.append_user_turn(s), Err(ConversationError::InvalidInput));
        }
        assert_eq!(state.turns().len(), 2);
    }

    #[test]
    fn trim_history_keeps_suffix() {
        for n in 0..25 {
            for k in [0, 1, 5, 20, 30] {
                let state = state_with_turns(n);
                let trimmed = state.trim_history(k);
                let kept = n.min(k);
                assert_eq!(trimmed.turns().len(), kept);
                assert_eq!(trimmed.turns(), &state.turns()[n - kept..]);
                assert_eq!(trimmed.trim_history(k), trimmed);
            }
        }
    }

    #[test]
    fn trim_history_preserves_fixed_fields() {
        let state = state_with_turns(22);
        let trimmed = state.trim_history(MAX_TURNS);
        assert_eq!(trimmed.system_instruction(), state.system_instruction());
        assert_eq!(trimmed.generation_config(), state.generation_config());
    }

    #[test]
    fn twenty_first_turn_drops_the_oldest() {
        let state = state_with_turns(20)
            .append_user_turn("turn 21")
            .unwrap()
            .trim_history(MAX_TURNS);

        assert_eq!(state.turns().len(), 20);
        assert_eq!(state.turns()[0].text, "turn 2");
        assert!(state.turns().iter().all(|t| t.text != "turn 1"));
        assert_eq!(state.turns()[19], Turn::user("turn 21"));
    }

    #[test]
    fn reset_discards_turns() {
        let state = state_with_turns(10);
        let fresh = reset_session();
        assert!(fresh.turns().is_empty());
        assert!(!fresh.system_instruction().is_empty());
        assert_ne!(fresh.system_instruction(), state.system_instruction());
    }

    #[test]
    fn state_round_trips_through_json() {
        let state = state_with_turns(3);
        let json = serde_json::to_value(&state).expect("serialize");
        assert_eq!(json["turns"][1]["role"], "model");
        let back: ConversationState = serde_json::from_value(json).expect("deserialize");
        assert_eq!(back, state);
    }
}
