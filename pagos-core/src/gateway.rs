//! Settlement gateway seam.
//!
//! The flow never talks to a real processor: settlement is a fixed-delay
//! simulation that always succeeds. The trait keeps that boundary
//! explicit so a real gateway could slot in behind it later.

use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use tracing::debug;

use crate::entities::payment::{PaymentItem, Receipt};

/// Default settlement delay, matching the product's simulated processing
/// time.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(1500);

/// Settles a selected payment and produces a receipt.
#[async_trait]
pub trait SettlementGateway: Send + Sync {
    /// Settle one payment. The simulation models no failure path.
    async fn settle(&self, item: &PaymentItem) -> Receipt;
}

/// Fixed-delay simulated gateway.
#[derive(Debug, Clone)]
pub struct SimulatedGateway {
    delay: Duration,
}

impl SimulatedGateway {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for SimulatedGateway {
    fn default() -> Self {
        Self::new(DEFAULT_SETTLE_DELAY)
    }
}

#[async_trait]
impl SettlementGateway for SimulatedGateway {
    async fn settle(&self, item: &PaymentItem) -> Receipt {
        tokio::time::sleep(self.delay).await;

        // Random operation code: simulation scope only.
        let code = rand::rng().random_range(0..1_000_000u32);
        let receipt = Receipt {
            operation_code: format!("PAY-{code}"),
            payment_id: item.id.clone(),
            concept: item.kind,
            month: item.month.clone(),
            amount: item.amount,
            settled_on: time::OffsetDateTime::now_utc().date(),
        };
        debug!(payment = %item.id, operation = %receipt.operation_code, "simulated settlement");
        receipt
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::payment::{PaymentKind, PaymentStatus};
    use rust_decimal_macros::dec;
    use time::macros::date;

    #[tokio::test]
    async fn test_simulated_settlement_produces_receipt() {
        let gateway = SimulatedGateway::new(Duration::from_millis(1));
        let item = PaymentItem {
            id: "Matrícula 2024-0".to_owned(),
            kind: PaymentKind::Matricula,
            month: None,
            amount: dec!(350),
            due_date: date!(2024 - 12 - 15),
            status: PaymentStatus::Pending,
        };

        let receipt = gateway.settle(&item).await;

        assert!(receipt.operation_code.starts_with("PAY-"));
        assert_eq!(receipt.payment_id, item.id);
        assert_eq!(receipt.amount, dec!(350));
        let digits = &receipt.operation_code["PAY-".len()..];
        assert!(!digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()));
    }
}
