//! Credential verification.

pub mod hasher;

pub use hasher::PasswordHasher;
