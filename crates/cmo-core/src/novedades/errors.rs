use crate::errors::CmoError;

#[derive(Debug, thiserror::Error)]
pub enum NovedadError {
    #[error("Novedad '{id}' not found")]
    NotFound { id: String },

    #[error("Novedad '{id}' is already resolved")]
    YaResuelta { id: String },

    #[error("Novedad description cannot be empty")]
    DescripcionVacia,
}

impl CmoError for NovedadError {
    fn error_code(&self) -> &'static str {
        match self {
            NovedadError::NotFound { .. } => "NOVEDAD_NOT_FOUND",
            NovedadError::YaResuelta { .. } => "NOVEDAD_YA_RESUELTA",
            NovedadError::DescripcionVacia => "NOVEDAD_DESCRIPCION_VACIA",
        }
    }

    fn is_user_error(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_novedad_error_codes() {
        let error = NovedadError::YaResuelta {
            id: "n-3".to_string(),
        };
        assert_eq!(error.to_string(), "Novedad 'n-3' is already resolved");
        assert_eq!(error.error_code(), "NOVEDAD_YA_RESUELTA");
        assert!(error.is_user_error());
    }
}
