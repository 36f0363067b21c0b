use crate::error::NcError;
use crate::parameter::select_parameter;
use crate::parser::ast::ProgramCode;
use crate::rewriter::program::{center_drilling, chamfering, drilling};
use crate::rewriter::{DrillingMethod, MainProgramRewriter, RewriteByToolArg};
use crate::value::DrillTipLength;

/// Plain drilling: center drill, drill, optional chamfer
#[derive(Debug, Clone, Copy, Default)]
pub struct DrillingProgramRewriter;

impl MainProgramRewriter for DrillingProgramRewriter {
    fn rewrite_by_tool(
        &self,
        arg: &RewriteByToolArg<'_>,
    ) -> Result<Vec<ProgramCode>, NcError> {
        let row = select_parameter(&arg.parameters.drilling, arg.directed_diameter)?;
        let depth = match arg.drilling_method {
            DrillingMethod::ThroughHole => {
                arg.thickness + DrillTipLength::new(arg.directed_diameter).value()
            }
            DrillingMethod::BlindHole { hole_depth, .. } => hole_depth,
        };

        let mut programs = vec![center_drilling(arg, row)?, drilling(arg, row, depth)?];
        if let Some(program) = chamfering(arg, row)? {
            programs.push(program);
        }
        Ok(programs)
    }
}
