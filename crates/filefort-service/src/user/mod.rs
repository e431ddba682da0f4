//! Account registration, login, and session operations.

pub mod service;

pub use service::{LoginOutcome, RegisterUser, UserService};
