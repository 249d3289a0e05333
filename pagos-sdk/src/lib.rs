//! Wire contract and HTTP client for the Colegio Barton payments backend.
//!
//! The backend is an external collaborator: this crate only describes its
//! JSON contract and provides a typed client for it.

pub mod objects;

#[cfg(feature = "client")]
pub mod client;
