use thiserror::Error;

/// Errores del dominio de casos de inspección.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Erro de validação: {0}")]
    ValidationError(String),
    #[error("Transição inválida: {0}")]
    InvalidTransition(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_variant_format() {
        let err = DomainError::ValidationError("CNPJ vazio".into());
        assert_eq!(err.to_string(), "Erro de validação: CNPJ vazio");
    }

    #[test]
    fn test_transition_variant_format() {
        let err = DomainError::InvalidTransition("processo 3 já concluído".into());
        assert_eq!(err.to_string(), "Transição inválida: processo 3 já concluído");
    }
}
