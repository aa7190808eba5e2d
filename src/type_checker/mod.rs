//! Type checking and the built-in registry.
//!
//! Checking is not a separate pass: the parser calls into this module at the
//! point each node is built. It provides:
//!
//! - The flat environment, seeded from the registry and extended by declarations
//! - The element-type side table for arrays
//! - The typing rules for operators, assignments, arrays and calls
//!
//! There is exactly one scope for a whole program.

pub mod registry;
pub mod type_checker;

#[cfg(test)]
mod tests;
