//! Operation Classifier
//!
//! Works out which drilling operation a sub-program directs, and with which
//! tool diameter, from the free-text comments the programmer left in it.

pub mod directer;
pub mod drill_size;

pub use directer::{DirectedOperationType, OperationDirecter, SubProgramCode};
pub use drill_size::{DrillSizeData, DrillSizeTable};
