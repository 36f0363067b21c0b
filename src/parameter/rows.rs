//! Parameter rows
//!
//! Domain rows built from the raw table rows in [`super::schema`]. Each row
//! is immutable once ingested.

use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;

use crate::error::NcError;
use crate::parameter::MaterialType;
use crate::parameter::policy::{DRILLING_DIAMETER_MARGIN, ParameterPolicy};
use crate::value::DrillTipLength;

static TAP_KEY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^M(?P<diameter>\d+(?:\.\d+)?)$").expect("invalid tap key regex")
});

static PLAIN_KEY_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+(?:\.\d+)?$").expect("invalid diameter key regex"));

/// Spindle speed and feed rate for one material
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CuttingCondition {
    pub spin: Decimal,
    pub feed: Decimal,
}

impl CuttingCondition {
    pub fn new(spin: Decimal, feed: Decimal) -> Self {
        Self { spin, feed }
    }
}

/// Cutting conditions per material
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialConditions {
    pub aluminum: CuttingCondition,
    pub iron: CuttingCondition,
}

impl MaterialConditions {
    pub fn for_material(&self, material: MaterialType) -> CuttingCondition {
        match material {
            MaterialType::Aluminum => self.aluminum,
            MaterialType::Iron => self.iron,
        }
    }
}

/// Pilot holes drilled before a reamer or tap goes in
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PilotHole {
    Single(Decimal),
    /// Two drills, smaller first
    Stepped { first: Decimal, second: Decimal },
}

impl PilotHole {
    pub fn diameters(&self) -> Vec<Decimal> {
        match self {
            PilotHole::Single(diameter) => vec![*diameter],
            PilotHole::Stepped { first, second } => vec![*first, *second],
        }
    }
}

/// Capabilities shared by every parameter row
pub trait MainProgramParameter {
    /// Operation name used in lookup-miss messages
    const OPERATION: &'static str;

    fn diameter_key(&self) -> &str;

    fn tool_diameter(&self) -> Decimal;

    fn center_drill_depth(&self) -> Decimal;

    fn chamfering_depth(&self) -> Option<Decimal>;

    fn conditions(&self) -> &MaterialConditions;

    /// The policy confirming a table covers a diameter at all
    fn policy() -> ParameterPolicy;

    fn cutting_condition(&self, material: MaterialType) -> CuttingCondition {
        self.conditions().for_material(material)
    }

    fn drill_tip_length(&self) -> DrillTipLength {
        DrillTipLength::new(self.tool_diameter())
    }

    /// Whether this row serves the requested diameter
    fn can_use(&self, diameter: Decimal) -> bool {
        self.tool_diameter() == diameter
    }
}

/// A reamer row; reamers come in discrete sizes
#[derive(Debug, Clone, PartialEq)]
pub struct ReamingParameter {
    pub diameter_key: String,
    pub tool_diameter: Decimal,
    pub pilot_hole: PilotHole,
    pub center_drill_depth: Decimal,
    pub chamfering_depth: Option<Decimal>,
    pub conditions: MaterialConditions,
}

/// A tap row keyed `M<diameter>`
#[derive(Debug, Clone, PartialEq)]
pub struct TappingParameter {
    pub diameter_key: String,
    pub tool_diameter: Decimal,
    pub pilot_hole: PilotHole,
    pub center_drill_depth: Decimal,
    pub chamfering_depth: Option<Decimal>,
    pub conditions: MaterialConditions,
}

/// A drill row covering `[diameter, diameter + 0.5)`
#[derive(Debug, Clone, PartialEq)]
pub struct DrillingParameter {
    pub diameter_key: String,
    pub tool_diameter: Decimal,
    pub center_drill_depth: Decimal,
    /// Peck step (`Q`)
    pub cut_depth: Decimal,
    pub chamfering_depth: Option<Decimal>,
    pub conditions: MaterialConditions,
}

impl MainProgramParameter for ReamingParameter {
    const OPERATION: &'static str = "リーマ";

    fn diameter_key(&self) -> &str {
        &self.diameter_key
    }

    fn tool_diameter(&self) -> Decimal {
        self.tool_diameter
    }

    fn center_drill_depth(&self) -> Decimal {
        self.center_drill_depth
    }

    fn chamfering_depth(&self) -> Option<Decimal> {
        self.chamfering_depth
    }

    fn conditions(&self) -> &MaterialConditions {
        &self.conditions
    }

    fn policy() -> ParameterPolicy {
        ParameterPolicy::exact_match()
    }
}

impl MainProgramParameter for TappingParameter {
    const OPERATION: &'static str = "タップ";

    fn diameter_key(&self) -> &str {
        &self.diameter_key
    }

    fn tool_diameter(&self) -> Decimal {
        self.tool_diameter
    }

    fn center_drill_depth(&self) -> Decimal {
        self.center_drill_depth
    }

    fn chamfering_depth(&self) -> Option<Decimal> {
        self.chamfering_depth
    }

    fn conditions(&self) -> &MaterialConditions {
        &self.conditions
    }

    fn policy() -> ParameterPolicy {
        ParameterPolicy::exact_match()
    }
}

impl MainProgramParameter for DrillingParameter {
    const OPERATION: &'static str = "ドリル";

    fn diameter_key(&self) -> &str {
        &self.diameter_key
    }

    fn tool_diameter(&self) -> Decimal {
        self.tool_diameter
    }

    fn center_drill_depth(&self) -> Decimal {
        self.center_drill_depth
    }

    fn chamfering_depth(&self) -> Option<Decimal> {
        self.chamfering_depth
    }

    fn conditions(&self) -> &MaterialConditions {
        &self.conditions
    }

    fn policy() -> ParameterPolicy {
        ParameterPolicy::drilling()
    }

    fn can_use(&self, diameter: Decimal) -> bool {
        self.tool_diameter <= diameter && diameter < self.tool_diameter + DRILLING_DIAMETER_MARGIN
    }
}

/// Diameter from a tap key like `M10` or `M13.3`
pub fn parse_tap_diameter_key(key: &str) -> Result<Decimal, NcError> {
    TAP_KEY_PATTERN
        .captures(key.trim())
        .and_then(|captures| Decimal::from_str(&captures["diameter"]).ok())
        .ok_or_else(|| NcError::InvalidDiameterKey(key.to_string()))
}

/// Diameter from a plain decimal key like `4.76`
pub fn parse_plain_diameter_key(key: &str) -> Result<Decimal, NcError> {
    let key_trimmed = key.trim();
    if !PLAIN_KEY_PATTERN.is_match(key_trimmed) {
        return Err(NcError::InvalidDiameterKey(key.to_string()));
    }
    Decimal::from_str(key_trimmed).map_err(|_| NcError::InvalidDiameterKey(key.to_string()))
}
