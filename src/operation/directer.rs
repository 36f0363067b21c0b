//! Directed operation extraction
//!
//! A sub-program names its operation in a comment, e.g. `(3-M10)` for an M10
//! tap, `(3-D4.76H7)` or `(2-3/16 P.H)` for a reamer and `(4-D10DR)` for a
//! drill. Exactly one such directive may appear in the whole program.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::{NcError, ValueError};
use crate::operation::drill_size::DrillSizeTable;
use crate::parser::ast::ProgramCode;

static TAPPING_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"-M(?P<diameter>\d+(?:\.\d+)?)").expect("invalid tapping regex")
});

static REAMING_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"-D(?P<diameter>\d+(?:\.\d+)?)[HG]\d+").expect("invalid reaming regex")
});

static INCH_REAMING_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"-(?P<size>\d+/\d+|#[A-Z]|#\d+)\s*P\.H").expect("invalid inch reaming regex")
});

static DRILLING_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"-D(?P<diameter>\d+(?:\.\d+)?)DR").expect("invalid drilling regex")
});

/// The machining a sub-program asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DirectedOperationType {
    Tapping,
    Reaming,
    Drilling,
}

impl DirectedOperationType {
    /// Operator-facing name, also used inside error messages
    pub fn label(&self) -> &'static str {
        match self {
            DirectedOperationType::Tapping => "タップ",
            DirectedOperationType::Reaming => "リーマ",
            DirectedOperationType::Drilling => "ドリル",
        }
    }
}

impl fmt::Display for DirectedOperationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Result of classifying a sub-program
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OperationDirecter {
    pub directed_operation: DirectedOperationType,
    pub tool_diameter: Decimal,
}

/// Where a tool diameter was written in a directive
enum DiameterSource<'a> {
    Millimeter(&'a str),
    Inch(&'a str),
}

/// A program read in the sub-program role
#[derive(Debug, Clone, PartialEq)]
pub struct SubProgramCode {
    program: ProgramCode,
}

impl SubProgramCode {
    pub fn new(program: ProgramCode) -> Self {
        Self { program }
    }

    pub fn program(&self) -> &ProgramCode {
        &self.program
    }

    pub fn into_program(self) -> ProgramCode {
        self.program
    }

    /// The single operation directed by the program's comments
    pub fn directed_operation(&self) -> Result<DirectedOperationType, NcError> {
        let operations: Vec<DirectedOperationType> = self
            .program
            .comments()
            .flat_map(operations_in)
            .collect();

        match operations.as_slice() {
            [] => Err(NcError::DirectedOperationNotFound),
            [operation] => Ok(*operation),
            _ => Err(NcError::MultipleDirectedOperations(operations.len())),
        }
    }

    /// The single tool diameter in millimeters, resolving inch sizes
    pub fn directed_tool_diameter(&self, drill_sizes: &DrillSizeTable) -> Result<Decimal, NcError> {
        let sources: Vec<DiameterSource<'_>> =
            self.program.comments().flat_map(diameters_in).collect();

        match sources.as_slice() {
            [] => Err(NcError::DirectedOperationToolDiameterNotFound),
            [DiameterSource::Millimeter(text)] => Decimal::from_str(text)
                .map_err(|_| NcError::Value(ValueError::NotNumeric(text.to_string()))),
            [DiameterSource::Inch(size)] => drill_sizes.millimeter_of(size),
            _ => Err(NcError::MultipleToolDiameters(sources.len())),
        }
    }

    pub fn classify(&self, drill_sizes: &DrillSizeTable) -> Result<OperationDirecter, NcError> {
        let directed_operation = self.directed_operation()?;
        let tool_diameter = self.directed_tool_diameter(drill_sizes)?;
        log::debug!(
            "{}: directed {} with tool diameter {}",
            self.program.name,
            directed_operation,
            tool_diameter
        );
        Ok(OperationDirecter {
            directed_operation,
            tool_diameter,
        })
    }
}

fn operations_in(comment: &str) -> Vec<DirectedOperationType> {
    let mut operations = Vec::new();
    if TAPPING_PATTERN.is_match(comment) {
        operations.push(DirectedOperationType::Tapping);
    }
    if REAMING_PATTERN.is_match(comment) || INCH_REAMING_PATTERN.is_match(comment) {
        operations.push(DirectedOperationType::Reaming);
    }
    if DRILLING_PATTERN.is_match(comment) {
        operations.push(DirectedOperationType::Drilling);
    }
    operations
}

fn diameters_in(comment: &str) -> Vec<DiameterSource<'_>> {
    let metric = [&*TAPPING_PATTERN, &*REAMING_PATTERN, &*DRILLING_PATTERN]
        .into_iter()
        .filter_map(|pattern| pattern.captures(comment))
        .filter_map(|captures| captures.name("diameter"))
        .map(|m| DiameterSource::Millimeter(m.as_str()));

    let inch = INCH_REAMING_PATTERN
        .captures(comment)
        .and_then(|captures| captures.name("size"))
        .map(|m| DiameterSource::Inch(m.as_str()));

    metric.chain(inch).collect()
}
