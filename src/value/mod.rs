//! Value Objects
//!
//! Typed primitives the NC program model is built from.

pub mod address;
pub mod data;
pub mod drill_tip_length;

pub use address::{Address, VariableAddress};
pub use data::{CoordinateValue, NumericalValue, ValueData};
pub use drill_tip_length::DrillTipLength;
