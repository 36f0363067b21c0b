//! NC Program Concatenation
//!
//! Builds ready-to-run NC programs for a hole-drilling workflow.
//!
//! This library provides:
//! - An NC text reader/writer that round-trips programs exactly
//! - Classification of sub-programs by the operation their comments direct
//! - Parameter-table lookup and rewriting of main-program templates
//! - Concatenation of the rewritten programs into one combined program

pub mod combiner;
pub mod config;
pub mod error;
pub mod operation;
pub mod parameter;
pub mod parser;
pub mod rewriter;
pub mod stream;
pub mod usecase;
pub mod value;

// Re-exports for the common pipeline
pub use combiner::combine;
pub use config::Config;
pub use error::{NcError, ValueError};
pub use operation::{DirectedOperationType, DrillSizeTable, OperationDirecter, SubProgramCode};
pub use parameter::{MaterialType, ParameterTables, ReamerType};
pub use parser::{ProgramCode, ProgramRole, parse_program, read_all, write_all};
pub use rewriter::{DrillingMethod, RewriteByToolArg, RewriterKind};
