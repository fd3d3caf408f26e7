//! Multi-tenant account authentication backend.
//!
//! Registration ties every user to at least one company, login is a
//! two-step credential + OTP flow, and password reset runs as a
//! stateless four-step conversation. The crate follows a hexagonal
//! layout: `domain` holds entities, ports and services, `application`
//! the use cases, `adapters` the HTTP boundary and `infrastructure`
//! the PostgreSQL, crypto and delivery implementations.

pub mod adapters;
pub mod application;
pub mod domain;
pub mod infrastructure;
