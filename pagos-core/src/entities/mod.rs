pub mod card;
pub mod payment;
pub mod student;

pub use card::CardForm;
pub use payment::{
    BankTransferDetails, PaymentItem, PaymentKind, PaymentMethod, PaymentStatus, Receipt,
};
pub use student::{CodeError, StudentCode, StudentRecord};
