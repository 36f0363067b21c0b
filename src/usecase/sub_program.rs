use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::error::NcError;
use crate::operation::SubProgramCode;
use crate::parser::{ProgramRole, parse_program};
use crate::stream::{OpenError, read_text};

static PROGRAM_NUMBER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+").expect("invalid program number regex"));

#[derive(Debug, Error)]
pub enum ReadSubProgramError {
    #[error(transparent)]
    Open(#[from] OpenError),

    #[error(transparent)]
    Nc(#[from] NcError),
}

/// A parsed sub-program and the number its file name carries
#[derive(Debug, Clone)]
pub struct LoadedSubProgram {
    pub code: SubProgramCode,
    pub number: Option<u32>,
}

/// First run of digits in the file stem (`O8000.nc` is 8000)
pub fn sub_program_number_from(path: &Path) -> Option<u32> {
    let stem = path.file_stem()?.to_str()?;
    PROGRAM_NUMBER_PATTERN
        .find(stem)
        .and_then(|digits| digits.as_str().parse().ok())
}

pub async fn read_sub_program(path: &Path) -> Result<LoadedSubProgram, ReadSubProgramError> {
    let text = read_text(path).await?;
    let name = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    let program = parse_program(&text, ProgramRole::SubProgram, &name)?;
    log::info!(
        "read sub-program '{}' ({} lines)",
        name,
        program.blocks.len()
    );

    Ok(LoadedSubProgram {
        code: SubProgramCode::new(program),
        number: sub_program_number_from(path),
    })
}
