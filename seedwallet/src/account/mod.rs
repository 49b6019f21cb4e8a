//! Account management functionality
//!
//! This module provides the account index allocation policy and address
//! validation for the supported chains.

pub mod allocator;
pub mod address;

pub use allocator::*;
pub use address::*;
