use thiserror::Error;

use crate::error::NcError;
use crate::operation::DirectedOperationType;
use crate::parameter::ReamerType;
use crate::parser::ast::ProgramCode;
use crate::rewriter::{RewriteByToolArg, RewriterKind};

#[derive(Debug, Error)]
pub enum EditMainProgramError {
    #[error(transparent)]
    Nc(#[from] NcError),
}

/// Rewrite the templates for the directed operation, in machining order
pub fn edit_main_programs(
    operation: DirectedOperationType,
    reamer: Option<ReamerType>,
    arg: &RewriteByToolArg<'_>,
) -> Result<Vec<ProgramCode>, EditMainProgramError> {
    let kind = RewriterKind::select(operation, reamer)?;
    let programs = kind.rewrite_by_tool(arg)?;
    log::info!(
        "rewrote {} main programs for {} {}",
        programs.len(),
        operation,
        arg.directed_diameter
    );
    Ok(programs)
}
