// src/common/error.rs

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

// Nosso tipo de erro central, com `thiserror` para melhor ergonomia.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Horário em formato inválido")]
    InvalidTimeLabel,

    #[error("Serviço inválido")]
    InvalidService,

    #[error("Horário já ocupado para este serviço")]
    SlotTaken,

    #[error("Este depoimento já foi enviado")]
    TestimonialAlreadySubmitted,

    #[error("{0}")]
    NotFound(&'static str),

    #[error("E-mail já existe")]
    EmailAlreadyExists,

    #[error("Telefone já cadastrado")]
    PhoneAlreadyExists,

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Token inválido")]
    InvalidToken,

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
    /// Converte violação de chave única do Postgres no erro de domínio dado.
    /// É assim que o índice parcial de agendamentos vira um 409 de conflito.
    pub fn map_unique_violation(err: sqlx::Error, conflict: AppError) -> AppError {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                return conflict;
            }
        }
        err.into()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            // Retorna todos os detalhes da validação, campo a campo.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "Um ou mais campos são inválidos.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }

            AppError::InvalidTimeLabel => {
                (StatusCode::BAD_REQUEST, "Horário em formato inválido. Use HH:MM.".to_string())
            }
            AppError::InvalidService => (StatusCode::BAD_REQUEST, "Serviço inválido.".to_string()),
            AppError::SlotTaken => {
                (StatusCode::CONFLICT, "Horário já ocupado para este serviço.".to_string())
            }
            AppError::TestimonialAlreadySubmitted => {
                (StatusCode::BAD_REQUEST, "Este depoimento já foi enviado.".to_string())
            }
            AppError::NotFound(message) => (StatusCode::NOT_FOUND, message.to_string()),
            AppError::EmailAlreadyExists => {
                (StatusCode::CONFLICT, "Este e-mail já está em uso.".to_string())
            }
            AppError::PhoneAlreadyExists => {
                (StatusCode::CONFLICT, "Este telefone já está cadastrado.".to_string())
            }
            AppError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, "E-mail ou senha inválidos.".to_string())
            }
            AppError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                "Token de autenticação inválido ou ausente.".to_string(),
            ),

            // Todos os outros erros (DatabaseError, InternalServerError...) viram 500.
            // O `tracing` registra a mensagem detalhada que `thiserror` nos deu.
            ref e => {
                tracing::error!("Erro interno do servidor: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Ocorreu um erro inesperado.".to_string())
            }
        };

        // Resposta padrão para erros simples que só têm uma mensagem.
        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
