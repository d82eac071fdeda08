//! Top-level facade crate for botgate.
//!
//! Re-exports core types and the admission engine so hosts can depend on a single crate.

pub mod core {
    pub use botgate_core::*;
}

pub mod admission {
    pub use botgate_admission::*;
}
