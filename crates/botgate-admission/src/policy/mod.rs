//! Bypass policy layer.
//!
//! Compiles the bypass config section into fast lookup structures the gate
//! consumes at admission time.

pub mod bypass;

pub use bypass::BypassRules;
