//! Server-held session pointers.

pub mod authority;

pub use authority::SessionAuthority;
