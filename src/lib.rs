pub mod ast;
pub mod cli;
pub mod declarations;
pub mod document;
pub mod evaluator;
pub mod lexer;
pub mod output;
pub mod parser;
pub mod store;
pub mod value;

pub use ast::{
    Clause, ClauseOp, Conditional, Domain, Forbidden, ForbiddenSyntax, LineKind, Operand, ParamKind, Parameter,
    RealBound, Record,
};
pub use document::{Document, LoadError, Warning};
pub use evaluator::{Configuration, EvalError, Evaluator};
pub use lexer::Lexer;
pub use output::{Dialect, Printer, to_text};
pub use parser::{ParseError, Parser, Resolution};
pub use store::{Id, Store, StoreError};
pub use value::Value;
