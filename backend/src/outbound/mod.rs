//! Outbound adapters: infrastructure implementations of the domain ports.
//!
//! Everything here translates between domain types and an external system
//! without adding business rules. The only backing store today is
//! PostgreSQL, reached through the Diesel repositories in [`persistence`].

pub mod persistence;
