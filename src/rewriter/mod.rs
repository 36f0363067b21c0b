//! Parameter Rewriter / Sequence Builder
//!
//! Fills the `*` placeholders of main-program templates with the values of
//! the parameter row matching the directed tool, and returns the finished
//! programs in machining order.

mod drilling;
mod program;
mod reaming;
mod tapping;

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::error::NcError;
use crate::operation::DirectedOperationType;
use crate::parameter::{MaterialType, ParameterTables, ReamerType};
use crate::parser::ast::{MainProgramType, ProgramCode};

pub use drilling::DrillingProgramRewriter;
pub use program::{BOTTOM_DWELL, Substitution, rewrite_program};
pub use reaming::{CrystalReamingProgramRewriter, SkillReamingProgramRewriter};
pub use tapping::TappingProgramRewriter;

/// How deep the hole goes
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrillingMethod {
    /// Through the sheet; depths are derived from the thickness
    ThroughHole,
    /// Operator-supplied depths for pilot drills and the finished hole
    BlindHole {
        pilot_depth: Decimal,
        hole_depth: Decimal,
    },
}

/// Everything a rewriter needs for one sub-program
#[derive(Debug, Clone, Copy)]
pub struct RewriteByToolArg<'a> {
    pub main_programs: &'a BTreeMap<MainProgramType, ProgramCode>,
    pub material: MaterialType,
    pub thickness: Decimal,
    pub drilling_method: DrillingMethod,
    pub sub_program_number: u32,
    pub directed_diameter: Decimal,
    pub parameters: &'a ParameterTables,
}

impl RewriteByToolArg<'_> {
    pub fn template(&self, kind: MainProgramType) -> Result<&ProgramCode, NcError> {
        self.main_programs
            .get(&kind)
            .ok_or(NcError::MainProgramNotFound(kind))
    }
}

/// Rewrites templates for one kind of directed operation
pub trait MainProgramRewriter {
    fn rewrite_by_tool(&self, arg: &RewriteByToolArg<'_>)
    -> Result<Vec<ProgramCode>, NcError>;
}

/// The available rewriters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RewriterKind {
    CrystalReaming,
    SkillReaming,
    Tapping,
    Drilling,
}

impl RewriterKind {
    /// Pick the rewriter for a directed operation; only reaming takes a reamer
    pub fn select(
        operation: DirectedOperationType,
        reamer: Option<ReamerType>,
    ) -> Result<Self, NcError> {
        match (operation, reamer) {
            (DirectedOperationType::Reaming, Some(ReamerType::Crystal)) => {
                Ok(RewriterKind::CrystalReaming)
            }
            (DirectedOperationType::Reaming, Some(ReamerType::Skill)) => {
                Ok(RewriterKind::SkillReaming)
            }
            (DirectedOperationType::Tapping, None) => Ok(RewriterKind::Tapping),
            (DirectedOperationType::Drilling, None) => Ok(RewriterKind::Drilling),
            (operation, _) => Err(NcError::InconsistentReamer {
                operation: operation.label(),
            }),
        }
    }

    pub fn rewrite_by_tool(
        &self,
        arg: &RewriteByToolArg<'_>,
    ) -> Result<Vec<ProgramCode>, NcError> {
        if arg.drilling_method == DrillingMethod::ThroughHole && arg.thickness <= Decimal::ZERO {
            return Err(NcError::InvalidThickness(arg.thickness));
        }

        log::info!(
            "rewriting main programs with {:?} for diameter {} ({})",
            self,
            arg.directed_diameter,
            arg.material
        );

        match self {
            RewriterKind::CrystalReaming => CrystalReamingProgramRewriter.rewrite_by_tool(arg),
            RewriterKind::SkillReaming => SkillReamingProgramRewriter.rewrite_by_tool(arg),
            RewriterKind::Tapping => TappingProgramRewriter.rewrite_by_tool(arg),
            RewriterKind::Drilling => DrillingProgramRewriter.rewrite_by_tool(arg),
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::collections::BTreeMap;

    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use crate::parameter::{
        CuttingCondition, DrillingParameter, MaterialConditions, ParameterTables, PilotHole,
        ReamingParameter, TappingParameter,
    };
    use crate::parser::ast::{MainProgramType, ProgramCode};
    use crate::parser::parse_program;

    pub const CENTER_DRILLING: &str = "O1000(CD)\nG90G54G0X0Y0\nM3S****\nG98G81R3.Z***F***\nM98P****\nG80M5\nM30";
    pub const DRILLING: &str = "O2000(DR)\nM3S****\nG98G83R3.Z***Q***F***\nM98P****\nG80M5\nM30";
    pub const CHAMFERING: &str = "O3000(MENTORI)\nM3S****\nG98G82R3.Z***P***F***\nM98P****\nG80M5\nM30";
    pub const REAMING: &str = "O4000(REAMER)\nM3S****\nG98G85R3.Z***F***\nM98P****\nG80M5\nM30";
    pub const TAPPING: &str = "O5000(TAP)\nM29S****\nG98G84R5.Z***F***\nM98P****\nG80M5\nM30";

    pub fn main_programs() -> BTreeMap<MainProgramType, ProgramCode> {
        [
            (MainProgramType::CenterDrilling, CENTER_DRILLING, "CD"),
            (MainProgramType::Drilling, DRILLING, "DR"),
            (MainProgramType::Chamfering, CHAMFERING, "MENTORI"),
            (MainProgramType::Reaming, REAMING, "REAMER"),
            (MainProgramType::Tapping, TAPPING, "TAP"),
        ]
        .into_iter()
        .map(|(kind, text, name)| (kind, parse_program(text, kind.into(), name).unwrap()))
        .collect()
    }

    pub fn conditions(spin: Decimal, feed: Decimal) -> MaterialConditions {
        MaterialConditions {
            aluminum: CuttingCondition::new(spin, feed),
            iron: CuttingCondition::new(spin / dec!(2), feed / dec!(2)),
        }
    }

    pub fn parameters() -> ParameterTables {
        let drilling = [dec!(3), dec!(4.5), dec!(8.5), dec!(10), dec!(11.5)]
            .into_iter()
            .map(|d| DrillingParameter {
                diameter_key: d.to_string(),
                tool_diameter: d,
                center_drill_depth: dec!(2.5),
                cut_depth: dec!(2),
                chamfering_depth: None,
                conditions: conditions(dec!(1500), dec!(250)),
            })
            .collect();

        let reamer = ReamingParameter {
            diameter_key: "4.76".to_string(),
            tool_diameter: dec!(4.76),
            pilot_hole: PilotHole::Stepped {
                first: dec!(3),
                second: dec!(4.5),
            },
            center_drill_depth: dec!(2),
            chamfering_depth: Some(dec!(0.3)),
            conditions: conditions(dec!(800), dec!(120)),
        };

        ParameterTables {
            crystal_reaming: vec![reamer.clone()],
            skill_reaming: vec![ReamingParameter {
                pilot_hole: PilotHole::Single(dec!(4.5)),
                chamfering_depth: None,
                conditions: conditions(dec!(600), dec!(90)),
                ..reamer
            }],
            tapping: vec![
                TappingParameter {
                    diameter_key: "M10".to_string(),
                    tool_diameter: dec!(10),
                    pilot_hole: PilotHole::Single(dec!(8.5)),
                    center_drill_depth: dec!(3.5),
                    chamfering_depth: Some(dec!(1.2)),
                    conditions: conditions(dec!(500), dec!(750)),
                },
                TappingParameter {
                    diameter_key: "M13.3".to_string(),
                    tool_diameter: dec!(13.3),
                    pilot_hole: PilotHole::Single(dec!(11.5)),
                    center_drill_depth: dec!(4),
                    chamfering_depth: None,
                    conditions: conditions(dec!(700), dec!(300)),
                },
            ],
            drilling,
        }
    }
}
