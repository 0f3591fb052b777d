use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::models::vagas::StatusVaga;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
// As mensagens são exatamente as que o desktop já conhece.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0} é obrigatório")]
    CampoObrigatorio(&'static str),

    #[error("quantidade deve ser maior que 0")]
    QuantidadeInvalida,

    #[error("turno deve ser \"manha\" ou \"noite\"")]
    TurnoInvalido,

    #[error("Formato de data inválido. Use YYYY-MM-DD")]
    FormatoDataInvalido,

    #[error("Contrato ativo não encontrado para o estabelecimento {0}")]
    ContratoNaoEncontrado(i64),

    #[error("Vaga não encontrada")]
    VagaNaoEncontrada,

    // A resposta carrega o status atual da vaga para diagnóstico do chamador.
    #[error("Vaga não está aberta")]
    VagaNaoAberta { status: StatusVaga },

    #[error("JSON inválido")]
    JsonInvalido,

    // Variante para erros de banco de dados (sqlx)
    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado
    // `anyhow::Error` é ótimo para capturar o contexto do erro.
    #[error("Erro interno do servidor")]
    Interno(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::CampoObrigatorio(_)
            | AppError::QuantidadeInvalida
            | AppError::TurnoInvalido
            | AppError::FormatoDataInvalido
            | AppError::JsonInvalido => StatusCode::BAD_REQUEST,

            AppError::ContratoNaoEncontrado(_) | AppError::VagaNaoEncontrada => {
                StatusCode::NOT_FOUND
            }

            AppError::VagaNaoAberta { status } => {
                let body = Json(json!({
                    "error": "Vaga não está aberta",
                    "status": status,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }

            // Todos os outros erros (DatabaseError, Interno) viram 500.
            // O `tracing` loga a mensagem detalhada e a resposta leva um
            // resumo em `details` para diagnóstico do chamador.
            AppError::DatabaseError(ref e) => {
                tracing::error!("Erro de banco de dados: {}", e);
                let body = Json(json!({
                    "error": "Erro interno do servidor",
                    "details": e.to_string(),
                }));
                return (StatusCode::INTERNAL_SERVER_ERROR, body).into_response();
            }
            AppError::Interno(ref e) => {
                tracing::error!("Erro interno do servidor: {:#}", e);
                let body = Json(json!({
                    "error": "Erro interno do servidor",
                    "details": e.to_string(),
                }));
                return (StatusCode::INTERNAL_SERVER_ERROR, body).into_response();
            }
        };

        // Resposta padrão para erros simples que só têm uma mensagem.
        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn erros_de_validacao_viram_400() {
        for erro in [
            AppError::CampoObrigatorio("estabelecimento_id"),
            AppError::QuantidadeInvalida,
            AppError::TurnoInvalido,
            AppError::FormatoDataInvalido,
            AppError::JsonInvalido,
            AppError::VagaNaoAberta {
                status: StatusVaga::Encerrada,
            },
        ] {
            assert_eq!(erro.into_response().status(), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn recursos_ausentes_viram_404() {
        assert_eq!(
            AppError::ContratoNaoEncontrado(11).into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::VagaNaoEncontrada.into_response().status(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn mensagens_preservam_o_contrato_do_desktop() {
        assert_eq!(
            AppError::CampoObrigatorio("data_inicio").to_string(),
            "data_inicio é obrigatório"
        );
        assert_eq!(
            AppError::ContratoNaoEncontrado(11).to_string(),
            "Contrato ativo não encontrado para o estabelecimento 11"
        );
    }
}
