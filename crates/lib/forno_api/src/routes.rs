//! Route paths served by the router.

pub const GET_INDEX: &str = "/";
pub const POST_ENVIAR_MENSAGEM: &str = "/enviar_mensagem";
pub const POST_LIMPAR_HISTORICO: &str = "/limpar_historico";
