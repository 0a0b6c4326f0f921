use crate::errors::CmoError;

/// Minimum length of an alert comment, in characters (after trimming).
pub const MIN_LARGO_COMENTARIO: usize = 10;

#[derive(Debug, thiserror::Error)]
pub enum AlertaError {
    #[error("Alerta '{id}' not found")]
    NotFound { id: String },

    #[error("Alerta '{id}' is already resolved")]
    YaResuelta { id: String },

    #[error("Comment too short: {len} characters (minimum {MIN_LARGO_COMENTARIO})")]
    ComentarioMuyCorto { len: usize },
}

impl CmoError for AlertaError {
    fn error_code(&self) -> &'static str {
        match self {
            AlertaError::NotFound { .. } => "ALERTA_NOT_FOUND",
            AlertaError::YaResuelta { .. } => "ALERTA_YA_RESUELTA",
            AlertaError::ComentarioMuyCorto { .. } => "ALERTA_COMENTARIO_MUY_CORTO",
        }
    }

    fn is_user_error(&self) -> bool {
        true
    }
}
