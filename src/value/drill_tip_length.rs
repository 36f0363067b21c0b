//! Drill tip length used for through-hole depths

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

/// |tan(65)| with the angle taken in radians, matching the shop's depth table
const TIP_TANGENT: Decimal = dec!(1.4700382576631723);

/// Depth added below the sheet so a drill of a given diameter breaks through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrillTipLength {
    value: Decimal,
}

impl DrillTipLength {
    /// Margin added on top of the cone height
    pub const THROUGH_HOLE_MARGIN: Decimal = dec!(1.5);

    const SNAP: Decimal = dec!(0.5);

    pub fn new(diameter: Decimal) -> Self {
        let radius = diameter / Decimal::TWO;
        let mut degree = (radius / TIP_TANGENT)
            .abs()
            .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
        degree -= degree % Self::SNAP;

        Self {
            value: degree + Self::THROUGH_HOLE_MARGIN,
        }
    }

    pub fn value(&self) -> Decimal {
        self.value
    }
}
