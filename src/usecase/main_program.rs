use std::collections::BTreeMap;
use std::path::PathBuf;

use thiserror::Error;
use tokio::task::{JoinError, JoinSet};

use crate::error::NcError;
use crate::parser::ast::{MainProgramType, ProgramCode};
use crate::parser::parse_program;
use crate::stream::{OpenError, read_text};

#[derive(Debug, Error)]
pub enum LoadMainProgramError {
    #[error(transparent)]
    Open(#[from] OpenError),

    #[error(transparent)]
    Nc(#[from] NcError),

    #[error("メインプログラムの読み込みが中断されました: {0}")]
    Task(#[from] JoinError),
}

async fn load_one(
    kind: MainProgramType,
    path: PathBuf,
) -> Result<(MainProgramType, ProgramCode), LoadMainProgramError> {
    let text = read_text(&path).await?;
    let name = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    let program = parse_program(&text, kind.into(), &name)?;
    log::debug!("loaded {} template from {}", kind, path.display());
    Ok((kind, program))
}

/// Read every template concurrently, keyed by role
pub async fn load_main_programs(
    files: Vec<(MainProgramType, PathBuf)>,
) -> Result<BTreeMap<MainProgramType, ProgramCode>, LoadMainProgramError> {
    let mut tasks = JoinSet::new();
    for (kind, path) in files {
        tasks.spawn(load_one(kind, path));
    }

    let mut programs = BTreeMap::new();
    while let Some(joined) = tasks.join_next().await {
        let (kind, program) = joined??;
        programs.insert(kind, program);
    }

    log::info!("loaded {} main programs", programs.len());
    Ok(programs)
}
