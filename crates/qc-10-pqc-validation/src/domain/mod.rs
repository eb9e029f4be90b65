//! # Domain Layer
//!
//! Pure validation logic with no I/O dependencies.
//! This is the inner layer of the hexagonal architecture.

pub mod algorithm;
pub mod block;
pub mod codec;
pub mod entities;
pub mod errors;
pub mod policy;
pub mod transaction;
pub mod validator;
