//! Client for the remote tarot interpretation service.
//!
//! A reading is requested in two stages. The concise interpretation comes
//! first; its [`ConciseReading`] is a required input of the detailed advice
//! request, so the second call cannot be made without the first succeeding.

pub mod client;
pub mod config;
pub mod error;
pub mod request;

pub use client::{HttpInterpreter, Interpreter};
pub use config::{DEFAULT_BASE_URL, OracleConfig};
pub use error::{OracleError, OracleResult};
pub use request::{CardPayload, ConciseReading, DetailedAdvice, DetailedRequest, ReadingRequest};
