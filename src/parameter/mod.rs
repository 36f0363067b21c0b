//! Parameter Lookup & Policy
//!
//! Tool parameter tables (one row per tool size) and the rules deciding
//! which row serves a requested tool diameter.

pub mod policy;
pub mod rows;
pub mod schema;

use std::fmt;
use std::str::FromStr;

pub use policy::{ParameterPolicy, ParameterRule, select_parameter};
pub use rows::{
    CuttingCondition, DrillingParameter, MainProgramParameter, MaterialConditions, PilotHole,
    ReamingParameter, TappingParameter,
};

/// Workpiece material; selects the spin/feed column of a row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaterialType {
    Aluminum,
    Iron,
}

impl MaterialType {
    /// Label written into the combined program header
    pub fn label(&self) -> &'static str {
        match self {
            MaterialType::Aluminum => "AL",
            MaterialType::Iron => "SS400",
        }
    }
}

impl fmt::Display for MaterialType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for MaterialType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "aluminum" | "al" => Ok(MaterialType::Aluminum),
            "iron" | "ss400" => Ok(MaterialType::Iron),
            other => Err(format!(
                "unknown material '{}' (expected aluminum/al or iron/ss400)",
                other
            )),
        }
    }
}

/// Reamer maker; each has its own parameter table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReamerType {
    Crystal,
    Skill,
}

impl FromStr for ReamerType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "crystal" => Ok(ReamerType::Crystal),
            "skill" => Ok(ReamerType::Skill),
            other => Err(format!(
                "unknown reamer '{}' (expected crystal or skill)",
                other
            )),
        }
    }
}

/// The parameter tables a rewrite can draw from
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ParameterTableKind {
    CrystalReaming,
    SkillReaming,
    Tapping,
    Drilling,
}

impl ParameterTableKind {
    pub const ALL: [ParameterTableKind; 4] = [
        ParameterTableKind::CrystalReaming,
        ParameterTableKind::SkillReaming,
        ParameterTableKind::Tapping,
        ParameterTableKind::Drilling,
    ];
}

/// All parameter rows, owned by the use-case layer and lent to rewriters
#[derive(Debug, Clone, Default)]
pub struct ParameterTables {
    pub crystal_reaming: Vec<ReamingParameter>,
    pub skill_reaming: Vec<ReamingParameter>,
    pub tapping: Vec<TappingParameter>,
    pub drilling: Vec<DrillingParameter>,
}

impl ParameterTables {
    pub fn reaming(&self, reamer: ReamerType) -> &[ReamingParameter] {
        match reamer {
            ReamerType::Crystal => &self.crystal_reaming,
            ReamerType::Skill => &self.skill_reaming,
        }
    }
}
