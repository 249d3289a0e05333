//! Payment flow controller.
//!
//! Owns the view-state machine and all student/payment/form data for one
//! session. The four phases cycle:
//!
//! verify → list → gateway → confirmation → verify
//!
//! A failed operation never changes the current phase; rendering layers
//! subscribe to [`FlowEvent`]s instead of owning any logic.

use async_trait::async_trait;
use pagos_sdk::client::{ClientError, PagosClient};
use pagos_sdk::objects::lookup::PaymentsQueryResponse;
use tracing::{debug, info, warn};

use crate::entities::card::CardForm;
use crate::entities::payment::{PaymentItem, PaymentMethod, PaymentStatus, Receipt};
use crate::entities::student::{CodeError, StudentCode, StudentRecord};
use crate::events::{FlowEvent, FlowEventSender};
use crate::gateway::SettlementGateway;

/// Fallback when the backend rejects a code without a usable message.
const CODE_NOT_FOUND_MESSAGE: &str = "Código modular (SIAGE) no encontrado";

/// The four rendering phases of the payment flow. Exactly one is active
/// at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlowState {
    Verify,
    List,
    Gateway,
    Confirmation,
}

/// Errors produced by flow operations.
///
/// Every failure is terminal to the operation: it is reported to the
/// caller and the state machine stays where it was.
#[derive(Debug, thiserror::Error)]
pub enum FlowError {
    /// The entered code failed local validation; no network call is made.
    #[error("invalid student code: {0}")]
    Code(#[from] CodeError),

    /// The backend rejected the code; `message` is shown to the user
    /// verbatim.
    #[error("lookup rejected: {0}")]
    Rejected(String),

    /// Network or decoding failure; the user is asked to retry.
    #[error("could not reach the payments backend: {0}")]
    Connection(ClientError),

    /// A lookup is already in flight; re-submission is blocked.
    #[error("a lookup is already in progress")]
    LookupInFlight,

    /// The selected concept is already paid.
    #[error("payment {0} is already paid")]
    AlreadyPaid(String),

    /// No payment with that id in the current record.
    #[error("unknown payment {0}")]
    UnknownPayment(String),

    /// The operation does not apply to the current phase.
    #[error("{action} is not available in the {state:?} phase")]
    InvalidTransition {
        action: &'static str,
        state: FlowState,
    },
}

impl FlowError {
    fn from_client(err: ClientError) -> Self {
        match err {
            ClientError::Api { message, .. } => {
                if message.trim().is_empty() {
                    FlowError::Rejected(CODE_NOT_FOUND_MESSAGE.to_owned())
                } else {
                    FlowError::Rejected(message)
                }
            }
            other => FlowError::Connection(other),
        }
    }
}

/// Lookup seam between the flow and the backend client.
#[async_trait]
pub trait PaymentLookup: Send + Sync {
    async fn fetch_payments(
        &self,
        code: &StudentCode,
    ) -> Result<PaymentsQueryResponse, ClientError>;
}

#[async_trait]
impl PaymentLookup for PagosClient {
    async fn fetch_payments(
        &self,
        code: &StudentCode,
    ) -> Result<PaymentsQueryResponse, ClientError> {
        PagosClient::fetch_payments(self, code.as_str()).await
    }
}

/// The payment flow controller: one instance per session.
///
/// All fields are private; rendering layers read through the accessors
/// and mutate only through the transition operations.
pub struct PaymentFlow {
    lookup: Box<dyn PaymentLookup>,
    gateway: Box<dyn SettlementGateway>,
    events: FlowEventSender,
    state: FlowState,
    code: Option<StudentCode>,
    student: Option<StudentRecord>,
    selected: Option<String>,
    method: PaymentMethod,
    card: CardForm,
    receipt: Option<Receipt>,
    loading: bool,
}

impl PaymentFlow {
    pub fn new(
        lookup: Box<dyn PaymentLookup>,
        gateway: Box<dyn SettlementGateway>,
        events: FlowEventSender,
    ) -> Self {
        Self {
            lookup,
            gateway,
            events,
            state: FlowState::Verify,
            code: None,
            student: None,
            selected: None,
            method: PaymentMethod::default(),
            card: CardForm::default(),
            receipt: None,
            loading: false,
        }
    }

    pub fn state(&self) -> FlowState {
        self.state
    }

    /// The verified code. `Some` exactly when a record is loaded.
    pub fn student_code(&self) -> Option<&StudentCode> {
        self.code.as_ref()
    }

    pub fn student(&self) -> Option<&StudentRecord> {
        self.student.as_ref()
    }

    /// The payment being paid. `Some` only in the gateway and
    /// confirmation phases.
    pub fn selected_payment(&self) -> Option<&PaymentItem> {
        let id = self.selected.as_deref()?;
        self.student.as_ref()?.payments.iter().find(|p| p.id == id)
    }

    pub fn method(&self) -> PaymentMethod {
        self.method
    }

    pub fn set_method(&mut self, method: PaymentMethod) {
        self.method = method;
    }

    pub fn card(&self) -> &CardForm {
        &self.card
    }

    pub fn card_mut(&mut self) -> &mut CardForm {
        &mut self.card
    }

    pub fn receipt(&self) -> Option<&Receipt> {
        self.receipt.as_ref()
    }

    /// True while the lookup fetch or the settlement delay is running, so
    /// renderers can disable re-submission.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Verify a código modular and load the student's payments.
    ///
    /// On success the flow enters the list phase. On any failure the flow
    /// stays in the verify phase: the backend's rejection message is
    /// carried verbatim in [`FlowError::Rejected`], transport and decode
    /// failures become [`FlowError::Connection`].
    pub async fn verify_code(&mut self, input: &str) -> Result<(), FlowError> {
        if self.state != FlowState::Verify {
            return Err(FlowError::InvalidTransition {
                action: "verify_code",
                state: self.state,
            });
        }
        if self.loading {
            return Err(FlowError::LookupInFlight);
        }
        let code = StudentCode::parse(input)?;

        self.loading = true;
        let outcome = self.lookup.fetch_payments(&code).await;
        self.loading = false;

        match outcome {
            Ok(response) => {
                let record = StudentRecord::from_lookup(response);
                info!(
                    code = %code,
                    payments = record.payments.len(),
                    "student lookup succeeded"
                );
                self.student = Some(record);
                self.code = Some(code);
                self.transition(FlowState::List);
                Ok(())
            }
            Err(err) => {
                warn!(code = %code, error = %err, "student lookup failed");
                let flow_err = FlowError::from_client(err);
                if let FlowError::Rejected(message) = &flow_err {
                    self.emit(FlowEvent::LookupFailed {
                        message: message.clone(),
                    });
                }
                Err(flow_err)
            }
        }
    }

    /// Select a pending payment and open the gateway.
    ///
    /// Paid items are rejected and the flow stays in the list phase.
    pub fn select_payment(&mut self, payment_id: &str) -> Result<(), FlowError> {
        if self.state != FlowState::List {
            return Err(FlowError::InvalidTransition {
                action: "select_payment",
                state: self.state,
            });
        }
        let record = self.student.as_ref().ok_or(FlowError::InvalidTransition {
            action: "select_payment",
            state: self.state,
        })?;
        let item = record
            .payments
            .iter()
            .find(|p| p.id == payment_id)
            .ok_or_else(|| FlowError::UnknownPayment(payment_id.to_owned()))?;
        if item.status == PaymentStatus::Paid {
            return Err(FlowError::AlreadyPaid(payment_id.to_owned()));
        }

        debug!(payment = %item.id, "payment selected");
        self.selected = Some(item.id.clone());
        self.method = PaymentMethod::default();
        self.transition(FlowState::Gateway);
        Ok(())
    }

    /// Settle the selected payment through the gateway.
    ///
    /// The simulated gateway always succeeds after its fixed delay; the
    /// in-memory item flips to Paid and the flow shows the confirmation.
    /// No cancellation of the delay is exposed.
    pub async fn process_payment(&mut self) -> Result<(), FlowError> {
        if self.state != FlowState::Gateway {
            return Err(FlowError::InvalidTransition {
                action: "process_payment",
                state: self.state,
            });
        }
        let item = self
            .selected_payment()
            .cloned()
            .ok_or(FlowError::InvalidTransition {
                action: "process_payment",
                state: self.state,
            })?;

        self.loading = true;
        let receipt = self.gateway.settle(&item).await;
        self.loading = false;

        if let Some(record) = self.student.as_mut() {
            if let Some(paid) = record.payments.iter_mut().find(|p| p.id == item.id) {
                paid.status = PaymentStatus::Paid;
            }
        }
        info!(
            payment = %item.id,
            operation = %receipt.operation_code,
            "payment settled"
        );
        self.emit(FlowEvent::PaymentSettled {
            payment_id: receipt.payment_id.clone(),
            operation_code: receipt.operation_code.clone(),
        });
        self.receipt = Some(receipt);
        self.transition(FlowState::Confirmation);
        Ok(())
    }

    /// Abandon the gateway and go back to the list.
    pub fn cancel_payment(&mut self) -> Result<(), FlowError> {
        if self.state != FlowState::Gateway {
            return Err(FlowError::InvalidTransition {
                action: "cancel_payment",
                state: self.state,
            });
        }
        self.selected = None;
        self.receipt = None;
        self.transition(FlowState::List);
        Ok(())
    }

    /// Reset everything and go back to code verification.
    ///
    /// Available from the list ("Nueva Consulta") and from the
    /// confirmation ("Finalizar"). The record and all selection and form
    /// state are discarded.
    pub fn finish(&mut self) -> Result<(), FlowError> {
        if !matches!(self.state, FlowState::List | FlowState::Confirmation) {
            return Err(FlowError::InvalidTransition {
                action: "finish",
                state: self.state,
            });
        }
        self.code = None;
        self.student = None;
        self.selected = None;
        self.method = PaymentMethod::default();
        self.card = CardForm::default();
        self.receipt = None;
        self.transition(FlowState::Verify);
        Ok(())
    }

    fn transition(&mut self, to: FlowState) {
        let from = self.state;
        self.state = to;
        debug!(?from, ?to, "flow state changed");
        self.emit(FlowEvent::StateChanged { from, to });
    }

    fn emit(&self, event: FlowEvent) {
        // Best-effort: a slow or missing subscriber must never stall the
        // flow.
        if let Err(err) = self.events.try_send(event) {
            debug!(error = %err, "flow event dropped");
        }
    }

    #[cfg(test)]
    fn set_state_for_test(&mut self, state: FlowState) {
        self.state = state;
    }
}
