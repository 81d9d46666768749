//! # Repository Implementations
//!
//! One repository per table group. Each holds a clone of the pool and is
//! cheap to construct from [`crate::Database`]'s accessor methods.

pub mod product;
pub mod profile;
pub mod shop;
pub mod stock;
pub mod transaction;
