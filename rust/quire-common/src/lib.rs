//! Core definitions (error taxonomy and common macros), relied upon by all
//! quire-* crates.

pub mod error;
pub mod macros;
pub mod result;

pub use result::Result;
