//! Inbound adapters: the surfaces through which callers reach the domain.
//!
//! HTTP handlers live under [`http`] and hold every framework concern, so
//! the domain stays transport-agnostic.

pub mod http;
