//! # Session State
//!
//! Shared mutable state for one register session. Each state type is its
//! own struct so services take only what they need.

pub mod cart;

pub use cart::CartState;
