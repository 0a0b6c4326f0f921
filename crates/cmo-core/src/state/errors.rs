use crate::alerts::errors::AlertaError;
use crate::errors::CmoError;
use crate::novedades::errors::NovedadError;

#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error(transparent)]
    Alerta(#[from] AlertaError),
    #[error(transparent)]
    Novedad(#[from] NovedadError),
}

impl CmoError for DispatchError {
    fn error_code(&self) -> &'static str {
        match self {
            DispatchError::Alerta(e) => e.error_code(),
            DispatchError::Novedad(e) => e.error_code(),
        }
    }

    fn is_user_error(&self) -> bool {
        match self {
            DispatchError::Alerta(e) => e.is_user_error(),
            DispatchError::Novedad(e) => e.is_user_error(),
        }
    }
}
