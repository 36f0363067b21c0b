//! Parameter Table Schema
//!
//! Raw rows as they appear in a parameter table file (TOML, one `[[rows]]`
//! table per tool size). Conversion into domain rows validates the keys.

use rust_decimal::Decimal;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::error::NcError;
use crate::parameter::rows::{
    CuttingCondition, DrillingParameter, MaterialConditions, PilotHole, ReamingParameter,
    TappingParameter, parse_plain_diameter_key, parse_tap_diameter_key,
};

/// Root table structure (matches TOML)
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ParameterFile<R> {
    pub rows: Vec<R>,
}

/// Spin/feed columns shared by every table
#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
pub struct ConditionColumns {
    pub spin_aluminum: Decimal,
    pub feed_aluminum: Decimal,
    pub spin_iron: Decimal,
    pub feed_iron: Decimal,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ReamingRow {
    pub diameter: String,
    pub prepared_hole_diameter: Decimal,
    pub second_prepared_hole_diameter: Option<Decimal>,
    pub center_drill_depth: Decimal,
    pub chamfering_depth: Option<Decimal>,
    #[serde(flatten)]
    pub conditions: ConditionColumns,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TappingRow {
    pub diameter: String,
    pub prepared_hole_diameter: Decimal,
    pub center_drill_depth: Decimal,
    pub chamfering_depth: Option<Decimal>,
    #[serde(flatten)]
    pub conditions: ConditionColumns,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct DrillingRow {
    pub diameter: String,
    pub center_drill_depth: Decimal,
    pub cut_depth: Decimal,
    pub chamfering_depth: Option<Decimal>,
    #[serde(flatten)]
    pub conditions: ConditionColumns,
}

impl From<ConditionColumns> for MaterialConditions {
    fn from(columns: ConditionColumns) -> Self {
        Self {
            aluminum: CuttingCondition::new(columns.spin_aluminum, columns.feed_aluminum),
            iron: CuttingCondition::new(columns.spin_iron, columns.feed_iron),
        }
    }
}

impl TryFrom<ReamingRow> for ReamingParameter {
    type Error = NcError;

    fn try_from(row: ReamingRow) -> Result<Self, Self::Error> {
        let pilot_hole = match row.second_prepared_hole_diameter {
            Some(second) => PilotHole::Stepped {
                first: row.prepared_hole_diameter,
                second,
            },
            None => PilotHole::Single(row.prepared_hole_diameter),
        };

        Ok(Self {
            tool_diameter: parse_plain_diameter_key(&row.diameter)?,
            diameter_key: row.diameter,
            pilot_hole,
            center_drill_depth: row.center_drill_depth,
            chamfering_depth: row.chamfering_depth,
            conditions: row.conditions.into(),
        })
    }
}

impl TryFrom<TappingRow> for TappingParameter {
    type Error = NcError;

    fn try_from(row: TappingRow) -> Result<Self, Self::Error> {
        Ok(Self {
            tool_diameter: parse_tap_diameter_key(&row.diameter)?,
            diameter_key: row.diameter,
            pilot_hole: PilotHole::Single(row.prepared_hole_diameter),
            center_drill_depth: row.center_drill_depth,
            chamfering_depth: row.chamfering_depth,
            conditions: row.conditions.into(),
        })
    }
}

impl TryFrom<DrillingRow> for DrillingParameter {
    type Error = NcError;

    fn try_from(row: DrillingRow) -> Result<Self, Self::Error> {
        Ok(Self {
            tool_diameter: parse_plain_diameter_key(&row.diameter)?,
            diameter_key: row.diameter,
            center_drill_depth: row.center_drill_depth,
            cut_depth: row.cut_depth,
            chamfering_depth: row.chamfering_depth,
            conditions: row.conditions.into(),
        })
    }
}

/// Parse a TOML table into domain rows
pub fn parse_table<R, P>(content: &str) -> Result<Vec<P>, NcError>
where
    R: DeserializeOwned,
    P: TryFrom<R, Error = NcError>,
{
    let file: ParameterFile<R> =
        toml::from_str(content).map_err(|e| NcError::InvalidParameterTable(e.to_string()))?;
    file.rows.into_iter().map(P::try_from).collect()
}
