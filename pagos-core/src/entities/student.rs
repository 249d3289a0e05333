//! Student identity and the lookup-derived record.

use pagos_sdk::objects::lookup::PaymentsQueryResponse;
use rust_decimal::Decimal;

use super::payment::PaymentItem;
use crate::flow::summary;

/// Maximum digit count accepted for a código modular.
pub const MAX_CODE_LEN: usize = 14;

/// Errors raised while validating a student code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CodeError {
    /// The input was empty after trimming.
    #[error("student code is empty")]
    Empty,

    /// More than [`MAX_CODE_LEN`] digits.
    #[error("student code is longer than {MAX_CODE_LEN} digits")]
    TooLong,

    /// A non-digit character was found.
    #[error("student code must contain only digits")]
    NonNumeric,
}

/// A validated código modular (SIAGE): 1 to 14 ASCII digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StudentCode(String);

impl StudentCode {
    /// Parse user input into a code. Surrounding whitespace is ignored.
    pub fn parse(input: &str) -> Result<Self, CodeError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(CodeError::Empty);
        }
        if trimmed.len() > MAX_CODE_LEN {
            return Err(CodeError::TooLong);
        }
        if !trimmed.chars().all(|c| c.is_ascii_digit()) {
            return Err(CodeError::NonNumeric);
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for StudentCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A student and their payment concepts, as derived from one lookup.
///
/// Exists only while a query is active; the Finish/New-Query action
/// discards it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentRecord {
    pub name: String,
    pub grade: String,
    pub photo_url: String,
    pub payments: Vec<PaymentItem>,
}

impl StudentRecord {
    /// Build a record from the raw lookup response.
    ///
    /// `pagos[i]` is paired with `detalle[i]`; a missing detail line maps
    /// to the empty string, matching the backend's loose contract. Detail
    /// lines beyond the end of `pagos` are ignored.
    pub fn from_lookup(response: PaymentsQueryResponse) -> Self {
        let photo_url = format!(
            "https://ui-avatars.com/api/?name={}",
            urlencoding::encode(&response.nombre)
        );
        let payments = response
            .pagos
            .iter()
            .enumerate()
            .map(|(idx, label)| {
                let detail = response.detalle.get(idx).map(String::as_str).unwrap_or("");
                PaymentItem::from_labels(idx, label, detail)
            })
            .collect();
        Self {
            name: response.nombre,
            grade: response.grado,
            photo_url,
            payments,
        }
    }

    /// Number of concepts still pending.
    pub fn pending_count(&self) -> usize {
        summary::pending_count(&self.payments)
    }

    /// Sum of the amounts over pending concepts.
    pub fn total_pending_amount(&self) -> Decimal {
        summary::total_pending_amount(&self.payments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::payment::{PaymentKind, PaymentStatus};
    use rust_decimal_macros::dec;

    #[test]
    fn test_code_parsing() {
        let code = StudentCode::parse("  12345 ").unwrap();
        assert_eq!(code.as_str(), "12345");

        assert_eq!(StudentCode::parse("   "), Err(CodeError::Empty));
        assert_eq!(
            StudentCode::parse("123456789012345"),
            Err(CodeError::TooLong)
        );
        assert_eq!(StudentCode::parse("12a45"), Err(CodeError::NonNumeric));
    }

    #[test]
    fn test_record_mapping() {
        let response = PaymentsQueryResponse {
            nombre: "Ana Perez".to_owned(),
            grado: "5to de Primaria".to_owned(),
            pagos: vec![
                "Matrícula 2024".to_owned(),
                "Pensión Marzo".to_owned(),
                "Pensión Abril".to_owned(),
            ],
            detalle: vec![
                "Matrícula 2024: 350 soles".to_owned(),
                "Pensión Marzo: 150 soles".to_owned(),
                "Pensión Abril: 150 soles".to_owned(),
            ],
        };
        let record = StudentRecord::from_lookup(response);

        assert_eq!(record.name, "Ana Perez");
        assert_eq!(record.photo_url, "https://ui-avatars.com/api/?name=Ana%20Perez");
        assert_eq!(record.payments.len(), 3);
        assert_eq!(record.payments[0].kind, PaymentKind::Matricula);
        assert_eq!(record.payments[1].amount, dec!(150));
        assert!(record.payments.iter().all(|p| p.status == PaymentStatus::Pending));
        assert_eq!(record.pending_count(), 3);
        assert_eq!(record.total_pending_amount(), dec!(650));
    }

    #[test]
    fn test_record_mapping_with_short_detalle() {
        let response = PaymentsQueryResponse {
            nombre: "Ana".to_owned(),
            grado: "1ro".to_owned(),
            pagos: vec!["Pensión Marzo".to_owned(), "Pensión Abril".to_owned()],
            detalle: vec!["Pensión Marzo: 150 soles".to_owned()],
        };
        let record = StudentRecord::from_lookup(response);

        assert_eq!(record.payments.len(), 2);
        assert_eq!(record.payments[0].amount, dec!(150));
        // Missing detail line: amount falls back to zero.
        assert_eq!(record.payments[1].amount, Decimal::ZERO);
    }

    #[test]
    fn test_record_mapping_ignores_extra_detalle() {
        let response = PaymentsQueryResponse {
            nombre: "Ana".to_owned(),
            grado: "1ro".to_owned(),
            pagos: vec!["Matrícula 2024".to_owned()],
            detalle: vec![
                "Matrícula 2024: 350 soles".to_owned(),
                "Pensión Marzo: 150 soles".to_owned(),
            ],
        };
        let record = StudentRecord::from_lookup(response);
        assert_eq!(record.payments.len(), 1);
    }
}
