//! # Repository Layer
//!
//! Data access built around the repository pattern: one repository per
//! aggregate, holding a cloned pool handle so it can be passed around and
//! used from concurrent tasks.

pub mod bill;

pub use bill::BillRepository;
