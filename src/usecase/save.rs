use std::path::Path;

use thiserror::Error;

use crate::combiner::combine;
use crate::parameter::MaterialType;
use crate::parser::ast::ProgramCode;
use crate::stream::{OpenError, write_text};

#[derive(Debug, Error)]
pub enum SaveProgramError {
    #[error(transparent)]
    Open(#[from] OpenError),
}

/// Combine rewritten programs under a `(<machine>-<material>)` header
pub fn combine_programs(
    programs: &[ProgramCode],
    machine: &str,
    material: MaterialType,
) -> ProgramCode {
    combine(programs, machine, material.label())
}

pub fn save_program(path: &Path, program: &ProgramCode) -> Result<(), SaveProgramError> {
    write_text(path, &program.to_string())?;
    log::info!("saved '{}' to {}", program.name, path.display());
    Ok(())
}
