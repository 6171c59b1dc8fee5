//! One chat exchange: user turn → trim → gateway → model turn.

use tracing::debug;

use crate::conversation::{ConversationError, ConversationState, Turn};
use crate::gateway::{GatewayError, ModelGateway};

/// Outcome of [`send_message`].
///
/// `state` is always the snapshot to persist. When `reply` is an error it still
/// holds the user's turn, but no model turn.
#[derive(Debug)]
pub struct Exchange {
    pub state: ConversationState,
    pub reply: Result<Turn, GatewayError>,
}

/// Run one exchange against `gateway`.
///
/// Blank messages fail with [`ConversationError::InvalidInput`] before the
/// gateway is called; nothing should be persisted in that case. The history
/// window never drops the new user turn, so `max_turns` below 1 acts as 1.
pub async fn send_message(
    gateway: &dyn ModelGateway,
    state: &ConversationState,
    text: &str,
    max_turns: usize,
) -> Result<Exchange, ConversationError> {
    let pending = state.append_user_turn(text)?.trim_history(max_turns.max(1));

    match gateway.request_completion(&pending).await {
        Ok(turn) => {
            let state = pending.append_model_turn(turn.clone());
            debug!(turns = state.turns().len(), "exchange completed");
            Ok(Exchange {
                state,
                reply: Ok(turn),
            })
        }
        Err(e) => {
            debug!(error = %e, "exchange failed, keeping user turn");
            Ok(Exchange {
                state: pending,
                reply: Err(e),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::conversation::{MAX_TURNS, Role, create_initial_state};

    /// Gateway returning a fixed result and recording what it was sent.
    struct ScriptedGateway {
        result: Result<Turn, GatewayError>,
        seen: Mutex<Vec<ConversationState>>,
    }

    impl ScriptedGateway {
        fn new(result: Result<Turn, GatewayError>) -> Self {
            Self {
                result,
                seen: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<ConversationState> {
            self.seen.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ModelGateway for ScriptedGateway {
        async fn request_completion(
            &self,
            state: &ConversationState,
        ) -> Result<Turn, GatewayError> {
            self.seen.lock().unwrap().push(state.clone());
            self.result.clone()
        }
    }

    #[tokio::test]
    async fn successful_exchange_appends_both_turns() {
        let gateway = ScriptedGateway::new(Ok(Turn::model("Ótima escolha! Deseja bebida?")));
        let state = create_initial_state();

        let exchange = send_message(&gateway, &state, "Quero uma pizza de calabresa", MAX_TURNS)
            .await
            .unwrap();

        assert_eq!(
            exchange.state.turns(),
            &[
                Turn::user("Quero uma pizza de calabresa"),
                Turn::model("Ótima escolha! Deseja bebida?"),
            ]
        );
        assert_eq!(exchange.reply, Ok(Turn::model("Ótima escolha! Deseja bebida?")));

        // The gateway saw the user turn but not its own reply.
        let calls = gateway.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].turns(), &[Turn::user("Quero uma pizza de calabresa")]);
    }

    #[tokio::test]
    async fn failed_exchange_keeps_user_turn_only() {
        let gateway = ScriptedGateway::new(Err(GatewayError::Timeout));
        let state = create_initial_state();

        let exchange = send_message(&gateway, &state, "Oi", MAX_TURNS).await.unwrap();

        assert_eq!(exchange.reply, Err(GatewayError::Timeout));
        assert_eq!(exchange.state.turns(), &[Turn::user("Oi")]);
    }

    #[tokio::test]
    async fn blank_message_never_reaches_gateway() {
        let gateway = ScriptedGateway::new(Ok(Turn::model("x")));
        let state = create_initial_state();

        let result = send_message(&gateway, &state, "   ", MAX_TURNS).await;

        assert!(matches!(result, Err(ConversationError::InvalidInput)));
        assert!(gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn history_is_trimmed_before_the_gateway_call() {
        let gateway = ScriptedGateway::new(Ok(Turn::model("ok")));
        let mut state = create_initial_state();
        for i in 0..10 {
            state = state
                .append_user_turn(&format!("pedido {i}"))
                .unwrap()
                .append_model_turn(Turn::model(format!("resposta {i}")));
        }

        let exchange = send_message(&gateway, &state, "mais um", MAX_TURNS).await.unwrap();

        let sent = &gateway.calls()[0];
        assert_eq!(sent.turns().len(), MAX_TURNS);
        assert_eq!(sent.turns()[0], Turn::model("resposta 0"));
        assert_eq!(sent.turns()[MAX_TURNS - 1], Turn::user("mais um"));

        // The reply lands after trimming, so the stored history is one over.
        assert_eq!(exchange.state.turns().len(), MAX_TURNS + 1);
        assert_eq!(exchange.state.turns().last().map(|t| t.role), Some(Role::Model));
    }

    #[tokio::test]
    async fn zero_window_still_sends_the_user_turn() {
        let gateway = ScriptedGateway::new(Ok(Turn::model("Olá!")));
        let state = create_initial_state()
            .append_user_turn("antes")
            .unwrap()
            .append_model_turn(Turn::model("ok"));

        let exchange = send_message(&gateway, &state, "oi", 0).await.unwrap();

        assert_eq!(gateway.calls()[0].turns(), &[Turn::user("oi")]);
        assert_eq!(
            exchange.state.turns(),
            &[Turn::user("oi"), Turn::model("Olá!")]
        );
    }
}
