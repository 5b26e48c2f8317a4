//! # Oracle Module
//!
//! Pure amount computations the engine consults before touching the
//! destination pool.

pub mod amounts;

pub use amounts::*;
