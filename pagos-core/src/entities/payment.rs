//! Payment concepts and the gateway-facing value objects.

use rust_decimal::Decimal;
use time::macros::date;

use super::student::StudentCode;

/// Due date assigned to every mapped concept.
///
/// The lookup endpoint does not return a due date yet; this stands in
/// until the backend contract grows a typed field for it.
pub const PLACEHOLDER_DUE_DATE: time::Date = date!(2024 - 12 - 15);

/// Concept type of a payment item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaymentKind {
    /// Enrollment fee.
    Matricula,
    /// Monthly tuition installment.
    Pension,
}

impl PaymentKind {
    /// Display label, as printed on receipts and in the list.
    pub fn label(&self) -> &'static str {
        match self {
            PaymentKind::Matricula => "Matrícula",
            PaymentKind::Pension => "Pensión",
        }
    }
}

/// Settlement status of a payment item.
///
/// `Pending → Paid` only, via the settlement step; never reverses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PaymentStatus {
    #[default]
    Pending,
    Paid,
}

/// Payment method selected in the gateway phase.
///
/// Selects which sub-form the gateway shows; `Card` is the default every
/// time a payment is selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PaymentMethod {
    #[default]
    Card,
    Bank,
    Mobile,
}

/// A single payable concept belonging to a student record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentItem {
    /// Backend-derived identifier: `"{label}-{index}"`.
    pub id: String,
    pub kind: PaymentKind,
    /// Month label ("Mes 3") for Pensión concepts.
    pub month: Option<String>,
    /// Amount in soles.
    pub amount: Decimal,
    pub due_date: time::Date,
    pub status: PaymentStatus,
}

impl PaymentItem {
    /// Build an item from one `pagos` label and its `detalle` line.
    pub(crate) fn from_labels(idx: usize, label: &str, detail: &str) -> Self {
        let kind = if label.contains("Matrícula") {
            PaymentKind::Matricula
        } else {
            PaymentKind::Pension
        };
        let month = label
            .contains("Pensión")
            .then(|| format!("Mes {}", idx + 1));
        Self {
            id: format!("{label}-{idx}"),
            kind,
            month,
            amount: amount_from_detail(detail),
            due_date: PLACEHOLDER_DUE_DATE,
            status: PaymentStatus::Pending,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == PaymentStatus::Pending
    }
}

/// Extract the amount from a free-text detail line.
///
/// Takes the first run of digits immediately preceding the word "soles"
/// (whitespace allowed in between); 0 when there is no such run. Wording
/// changes on the backend silently break this — the contract should grow
/// a typed amount field instead of this text mining.
pub(crate) fn amount_from_detail(detail: &str) -> Decimal {
    let bytes = detail.as_bytes();
    let mut from = 0;
    while let Some(found) = detail[from..].find("soles") {
        let at = from + found;
        let mut end = at;
        while end > 0 && bytes[end - 1].is_ascii_whitespace() {
            end -= 1;
        }
        let mut start = end;
        while start > 0 && bytes[start - 1].is_ascii_digit() {
            start -= 1;
        }
        if start < end {
            return Decimal::from_str_exact(&detail[start..end]).unwrap_or(Decimal::ZERO);
        }
        from = at + "soles".len();
    }
    Decimal::ZERO
}

/// Static bank-transfer data shown in the gateway's bank sub-form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BankTransferDetails {
    pub bank: &'static str,
    pub account: &'static str,
    pub cci: &'static str,
    pub holder: &'static str,
    pub treasury_email: &'static str,
    /// Reference the payer must include in the transfer description.
    pub reference: String,
}

impl BankTransferDetails {
    /// Bank details for one payment: the reference is
    /// `"{payment_id}-{student_code}"` so treasury can reconcile it.
    pub fn for_payment(payment_id: &str, code: &StudentCode) -> Self {
        Self {
            bank: "Banco de Crédito del Perú",
            account: "191-2345678-0-45",
            cci: "002-191-002345678045-10",
            holder: "Colegio Barton",
            treasury_email: "tesoreria@colegio.edu.pe",
            reference: format!("{payment_id}-{code}"),
        }
    }
}

/// Result of a settled (simulated) payment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    /// Synthetic operation code ("PAY-482913"). Simulation only — a real
    /// integration needs a processor-issued idempotent transaction id.
    pub operation_code: String,
    pub payment_id: String,
    pub concept: PaymentKind,
    pub month: Option<String>,
    pub amount: Decimal,
    pub settled_on: time::Date,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_amount_extracted_before_soles() {
        assert_eq!(amount_from_detail("350 soles"), dec!(350));
        assert_eq!(
            amount_from_detail("Pensión Marzo: 150 soles, vence el 15"),
            dec!(150)
        );
        assert_eq!(amount_from_detail("cuesta 150  soles al mes"), dec!(150));
    }

    #[test]
    fn test_amount_skips_soles_without_digits() {
        // Only the second occurrence has digits in front of it.
        assert_eq!(amount_from_detail("pagar en soles: 200 soles"), dec!(200));
    }

    #[test]
    fn test_amount_defaults_to_zero() {
        assert_eq!(amount_from_detail(""), Decimal::ZERO);
        assert_eq!(amount_from_detail("S/ 350"), Decimal::ZERO);
        assert_eq!(amount_from_detail("soles"), Decimal::ZERO);
    }

    #[test]
    fn test_kind_inferred_from_label() {
        let matricula = PaymentItem::from_labels(0, "Matrícula 2024", "350 soles");
        assert_eq!(matricula.kind, PaymentKind::Matricula);
        assert_eq!(matricula.month, None);
        assert_eq!(matricula.id, "Matrícula 2024-0");

        let pension = PaymentItem::from_labels(2, "Pensión Marzo", "150 soles");
        assert_eq!(pension.kind, PaymentKind::Pension);
        assert_eq!(pension.month.as_deref(), Some("Mes 3"));

        // Anything that is not a Matrícula counts as a Pensión, but only
        // labels naming Pensión get a month.
        let otro = PaymentItem::from_labels(1, "Cuota APAFA", "50 soles");
        assert_eq!(otro.kind, PaymentKind::Pension);
        assert_eq!(otro.month, None);
    }

    #[test]
    fn test_bank_reference_combines_payment_and_code() {
        let code = StudentCode::parse("12345").unwrap();
        let details = BankTransferDetails::for_payment("Matrícula 2024-0", &code);
        assert_eq!(details.reference, "Matrícula 2024-0-12345");
        assert_eq!(details.bank, "Banco de Crédito del Perú");
    }
}
