use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::models::lead::LeadStatus;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Token inválido")]
    InvalidToken,

    #[error("Lead não encontrado: {0}")]
    LeadNotFound(String),

    #[error("Regra de automação não encontrada: {0}")]
    RuleNotFound(String),

    // Transições do ciclo de vida que o quadro de status não permite
    #[error("Transição '{action}' inválida para lead com status {from:?}")]
    InvalidTransition {
        from: LeadStatus,
        action: &'static str,
    },

    #[error("Nada para exportar")]
    NothingToExport,

    #[error("Nenhum lead selecionado")]
    EmptySelection,

    #[error("Ação desconhecida: {0}")]
    UnknownAction(String),

    #[error("Parâmetro inválido: {0}")]
    InvalidQuery(String),

    #[error("Corpo JSON inválido: {0}")]
    MalformedBody(#[from] serde_json::Error),

    // A reserva não foi salva; o visitante precisa tentar de novo
    #[error("Falha ao salvar a reserva")]
    SubmissionFailed,

    // Variante para erros de banco de dados
    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl AppError {
    /// Status HTTP e a mensagem pública (em inglês, como o resto do produto).
    pub fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            AppError::ValidationError(_) => {
                (StatusCode::BAD_REQUEST, "One or more fields are invalid.".to_string())
            }
            AppError::InvalidCredentials => (StatusCode::UNAUTHORIZED, "Invalid password".to_string()),
            AppError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                "Missing or invalid authentication token.".to_string(),
            ),
            AppError::LeadNotFound(id) => (StatusCode::NOT_FOUND, format!("Lead '{id}' not found.")),
            AppError::RuleNotFound(id) => {
                (StatusCode::NOT_FOUND, format!("Automation rule '{id}' not found."))
            }
            AppError::InvalidTransition { from, action } => (
                StatusCode::CONFLICT,
                format!("Cannot {action} a lead whose status is {}.", from.as_str()),
            ),
            AppError::NothingToExport => (StatusCode::BAD_REQUEST, "No data to download".to_string()),
            AppError::EmptySelection => (StatusCode::BAD_REQUEST, "No leads selected".to_string()),
            AppError::UnknownAction(action) => {
                (StatusCode::BAD_REQUEST, format!("Unknown action '{action}'."))
            }
            AppError::InvalidQuery(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::MalformedBody(_) => {
                (StatusCode::BAD_REQUEST, "Request body is not valid JSON for this action.".to_string())
            }
            AppError::SubmissionFailed => (
                StatusCode::BAD_GATEWAY,
                "There was a problem saving your booking. Please check your internet connection and try again."
                    .to_string(),
            ),
            // Todos os outros erros (DatabaseError, InternalServerError...) viram 500.
            // O `tracing` loga a mensagem detalhada que o `thiserror` nos deu.
            e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An unexpected error occurred.".to_string(),
                )
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Retorna todos os detalhes da validação, campo a campo.
        if let AppError::ValidationError(errors) = &self {
            let mut details = std::collections::HashMap::new();
            for (field, field_errors) in errors.field_errors() {
                let messages: Vec<String> = field_errors
                    .iter()
                    .map(|e| {
                        e.message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| e.code.to_string())
                    })
                    .collect();
                details.insert(field.to_string(), messages);
            }
            let body = Json(json!({
                "error": "One or more fields are invalid.",
                "details": details,
            }));
            return (StatusCode::BAD_REQUEST, body).into_response();
        }

        let (status, error_message) = self.status_and_message();
        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
