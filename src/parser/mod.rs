//! Parser and inline type checker.
//!
//! This module turns a token stream into a typed AST in a single pass. Each
//! node is type checked at the point it is built. It handles:
//!
//! - Statement dispatch (declarations, `if`/`else`, `for`, `break`, blocks)
//! - Expressions by precedence climbing over a fixed table of operator groups
//! - Identifier chains, calls and assignments
//! - Brace balancing and matching `else` to a pending `if`
//!
//! Keyword statements are dispatched through a lookup table of handlers, and
//! every parsing function receives the `Parser` holding the shared state.

pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;
