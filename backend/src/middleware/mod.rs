//! Middleware the server wraps around every route.
//!
//! Only the trace identifier middleware lives here; session handling comes
//! from `actix-session` and is wired up in the server module.

pub mod trace;

pub use trace::Trace;
