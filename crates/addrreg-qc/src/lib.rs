//! # addrreg-qc: Address Register Quality Control
//!
//! Checks that need no schema. Currently one: house numbers must be unique
//! within a street of an Urban Local Body (ULB). See [`find_duplicates`].
//!
//! ## Crate Policy
//!
//! - Depends only on `addrreg-core` internally.
//! - Every finding is reported; a pass never stops at the first.

pub mod duplicates;

pub use duplicates::{check, find_duplicates, DuplicateRecord, GroupKey, QcReport};
