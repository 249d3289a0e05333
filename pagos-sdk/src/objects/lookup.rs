//! Lookup API response types.
//!
//! These types mirror the JSON bodies of the backend's `GET /pagos`
//! endpoint, the only remote surface this application consumes.

use serde::{Deserialize, Serialize};

/// Successful response of `GET /pagos?codigo={code}`.
///
/// `pagos[i]` is a human-readable concept label ("Matrícula 2024",
/// "Pensión Marzo", …) and `detalle[i]` is the free-text detail line for
/// the same index. The backend does not guarantee both arrays have the
/// same length, and either may be absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentsQueryResponse {
    pub nombre: String,
    pub grado: String,
    #[serde(default)]
    pub pagos: Vec<String>,
    #[serde(default)]
    pub detalle: Vec<String>,
}

/// Error body returned with any non-2xx status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_response_parsing() {
        let json = r#"{
            "nombre": "María Fernández",
            "grado": "3ro de Secundaria",
            "pagos": ["Matrícula 2024", "Pensión Marzo"],
            "detalle": ["Matrícula 2024: 350 soles", "Pensión Marzo: 150 soles"]
        }"#;
        let response: PaymentsQueryResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.nombre, "María Fernández");
        assert_eq!(response.pagos.len(), 2);
        assert_eq!(response.detalle[1], "Pensión Marzo: 150 soles");
    }

    #[test]
    fn test_missing_arrays_default_to_empty() {
        let json = r#"{"nombre": "Ana", "grado": "1ro"}"#;
        let response: PaymentsQueryResponse = serde_json::from_str(json).unwrap();
        assert!(response.pagos.is_empty());
        assert!(response.detalle.is_empty());
    }

    #[test]
    fn test_error_body_parsing() {
        let json = r#"{"error": "Código modular (SIAGE) no encontrado"}"#;
        let body: ApiErrorBody = serde_json::from_str(json).unwrap();
        assert_eq!(body.error, "Código modular (SIAGE) no encontrado");
    }
}
