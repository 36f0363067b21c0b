//! Diameter coverage policies
//!
//! Reamers and taps are discrete sizes and need an exact row. Drill rows
//! cover a half-millimeter band, so the drilling policy checks both ends.

use std::fmt;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::NcError;
use crate::parameter::rows::MainProgramParameter;

/// Width of the band a drilling row covers
pub const DRILLING_DIAMETER_MARGIN: Decimal = dec!(0.5);

/// One atomic coverage rule
pub trait ParameterRule: fmt::Debug + Send + Sync {
    fn ok(&self, diameters: &[Decimal], requested: Decimal) -> bool;
}

/// Some row has exactly the requested diameter
#[derive(Debug)]
pub struct ExactDiameterRule;

impl ParameterRule for ExactDiameterRule {
    fn ok(&self, diameters: &[Decimal], requested: Decimal) -> bool {
        diameters.iter().any(|d| *d == requested)
    }
}

/// Some row is at or below the requested diameter
#[derive(Debug)]
pub struct LowerBoundRule;

impl ParameterRule for LowerBoundRule {
    fn ok(&self, diameters: &[Decimal], requested: Decimal) -> bool {
        diameters.iter().any(|d| *d <= requested)
    }
}

/// Some row plus the margin reaches the requested diameter
#[derive(Debug)]
pub struct UpperBoundRule {
    pub margin: Decimal,
}

impl ParameterRule for UpperBoundRule {
    fn ok(&self, diameters: &[Decimal], requested: Decimal) -> bool {
        diameters.iter().any(|d| *d + self.margin >= requested)
    }
}

/// A set of rules that must all hold
#[derive(Debug)]
pub struct ParameterPolicy {
    rules: Vec<Box<dyn ParameterRule>>,
}

impl ParameterPolicy {
    pub fn new(rules: Vec<Box<dyn ParameterRule>>) -> Self {
        Self { rules }
    }

    /// Tapping and reaming
    pub fn exact_match() -> Self {
        Self::new(vec![Box::new(ExactDiameterRule)])
    }

    pub fn drilling() -> Self {
        Self::new(vec![
            Box::new(LowerBoundRule),
            Box::new(UpperBoundRule {
                margin: DRILLING_DIAMETER_MARGIN,
            }),
        ])
    }

    pub fn comply_with_all<P: MainProgramParameter>(
        &self,
        rows: &[P],
        diameter: Decimal,
    ) -> bool {
        let diameters: Vec<Decimal> = rows.iter().map(P::tool_diameter).collect();
        self.rules.iter().all(|rule| rule.ok(&diameters, diameter))
    }
}

/// Pick the row serving `diameter`, checking coverage first
pub fn select_parameter<P: MainProgramParameter>(
    rows: &[P],
    diameter: Decimal,
) -> Result<&P, NcError> {
    let not_found = || NcError::ParameterNotFound {
        operation: P::OPERATION,
        diameter,
    };

    if !P::policy().comply_with_all(rows, diameter) {
        return Err(not_found());
    }

    let row = rows
        .iter()
        .find(|row| row.can_use(diameter))
        .ok_or_else(not_found)?;
    log::debug!(
        "{} parameter '{}' selected for diameter {}",
        P::OPERATION,
        row.diameter_key(),
        diameter
    );
    Ok(row)
}
