//! Test module for the apigen runtime
//!
//! Unit and property-based tests for the request abstraction, the envelope,
//! error mapping, and the auth guard.


#[cfg(test)]
pub mod request_tests;
