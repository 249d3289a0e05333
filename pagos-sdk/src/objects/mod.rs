pub mod lookup;

pub use lookup::{ApiErrorBody, PaymentsQueryResponse};
