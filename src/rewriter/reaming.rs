use crate::error::NcError;
use crate::parameter::{ReamerType, select_parameter};
use crate::parser::ast::{MainProgramType, ProgramCode};
use crate::rewriter::program::pilot_hole_sequence;
use crate::rewriter::{MainProgramRewriter, RewriteByToolArg};

fn rewrite_reaming(
    arg: &RewriteByToolArg<'_>,
    reamer: ReamerType,
) -> Result<Vec<ProgramCode>, NcError> {
    let row = select_parameter(arg.parameters.reaming(reamer), arg.directed_diameter)?;
    pilot_hole_sequence(arg, row, row.pilot_hole, MainProgramType::Reaming)
}

/// Reaming with the crystal reamer table
#[derive(Debug, Clone, Copy, Default)]
pub struct CrystalReamingProgramRewriter;

impl MainProgramRewriter for CrystalReamingProgramRewriter {
    fn rewrite_by_tool(
        &self,
        arg: &RewriteByToolArg<'_>,
    ) -> Result<Vec<ProgramCode>, NcError> {
        rewrite_reaming(arg, ReamerType::Crystal)
    }
}

/// Reaming with the skill reamer table
#[derive(Debug, Clone, Copy, Default)]
pub struct SkillReamingProgramRewriter;

impl MainProgramRewriter for SkillReamingProgramRewriter {
    fn rewrite_by_tool(
        &self,
        arg: &RewriteByToolArg<'_>,
    ) -> Result<Vec<ProgramCode>, NcError> {
        rewrite_reaming(arg, ReamerType::Skill)
    }
}
