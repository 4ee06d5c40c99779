//! # Parameter Configuration Space - Record Model
//!
//! This module defines the records a `.pcs` document is made of once it has
//! been loaded into a [`Store`](crate::store::Store).
//!
//! ## Architecture Overview
//!
//! The model is organized into focused submodules:
//!
//! - **[tokens]** - Line classes produced by the line lexer
//! - **[parameters]** - Parameter declarations and their domains
//! - **[expressions]** - Clause nodes and their operands
//! - **[operators]** - Clause operators (logical, comparison, membership)
//! - **[statements]** - Conditional and forbidden statements
//! - **[records]** - The record union stored in the arena
//!
//! ## Quick Start
//!
//! ```text
//! KICK_WALK categorical {YES, NO} [NO]
//! KICKS integer [0, 10] [3]
//! KICKS | KICK_WALK == NO
//! {KICK_WALK=YES, KICKS=0}
//! ```
//!
//! `KICKS` is only active when `KICK_WALK` is `NO`, and the combination
//! `KICK_WALK=YES, KICKS=0` is forbidden.
//!
//! ## Core Concepts
//!
//! ### Records and Ids
//!
//! Records never own each other. A clause points at its operands through
//! [`Id`](crate::store::Id)s, a categorical parameter points at its values the
//! same way. Clause trees are trees: a clause node is referenced by exactly
//! one parent, while parameters and values may be shared leaves.
//!
//! ### Dialects
//!
//! - **Conditional** - `child | A == x && B in {y, z}`, no parentheses
//! - **Classic forbidden** - `{A=x, B=y}`, commas mean `&&`
//! - **Advanced forbidden** - `{(A == x || B != y) && C > 3}`
//!
//! ## Examples
//!
//! ### Numeric Ranges
//!
//! ```text
//! ALPHA real [0.01, 1.0] [0.1] log
//! DEPTH integer [1, 64] [8]
//! ```
//!
//! ### Legacy Declarations
//!
//! ```text
//! ALPHA [0.01, 1.0] [0.1]l
//! DEPTH [1, 64] [8]i
//! MODE {fast, slow} [fast]
//! ```
pub mod tokens;
pub mod parameters;
pub mod expressions;
pub mod operators;
pub mod statements;
pub mod records;

pub use tokens::{Line, LineKind};
pub use parameters::{DeclSyntax, Domain, ParamKind, Parameter, RealBound};
pub use expressions::{Clause, Operand};
pub use operators::ClauseOp;
pub use statements::{Conditional, Forbidden, ForbiddenSyntax};
pub use records::{Comment, Record, ValueArray, ValueRecord};
