//! Infrastructure layer
//!
//! Concrete implementations of the domain ports: PostgreSQL
//! persistence, Argon2 hashing, JWT signing, configuration loading and
//! outbound OTP delivery.

pub mod config;
pub mod notification;
pub mod persistence;
pub mod security;
