use std::path::PathBuf;

use thiserror::Error;
use tokio::task::{JoinError, JoinSet};

use crate::error::NcError;
use crate::operation::DrillSizeTable;
use crate::parameter::schema::{DrillingRow, ReamingRow, TappingRow, parse_table};
use crate::parameter::{
    DrillingParameter, ParameterTableKind, ParameterTables, ReamingParameter, TappingParameter,
};
use crate::stream::{OpenError, read_text};

#[derive(Debug, Error)]
pub enum LoadParameterError {
    #[error(transparent)]
    Open(#[from] OpenError),

    #[error("{}: {source}", .path.display())]
    Nc {
        path: PathBuf,
        #[source]
        source: NcError,
    },

    #[error("パラメータ表の読み込みが中断されました: {0}")]
    Task(#[from] JoinError),
}

/// Everything a rewrite looks up
#[derive(Debug, Clone)]
pub struct LoadedParameters {
    pub tables: ParameterTables,
    pub drill_sizes: DrillSizeTable,
}

enum LoadedTable {
    Reaming(ParameterTableKind, Vec<ReamingParameter>),
    Tapping(Vec<TappingParameter>),
    Drilling(Vec<DrillingParameter>),
}

fn parse_kind(kind: ParameterTableKind, content: &str) -> Result<LoadedTable, NcError> {
    Ok(match kind {
        ParameterTableKind::CrystalReaming | ParameterTableKind::SkillReaming => {
            LoadedTable::Reaming(kind, parse_table::<ReamingRow, _>(content)?)
        }
        ParameterTableKind::Tapping => {
            LoadedTable::Tapping(parse_table::<TappingRow, _>(content)?)
        }
        ParameterTableKind::Drilling => {
            LoadedTable::Drilling(parse_table::<DrillingRow, _>(content)?)
        }
    })
}

async fn load_one(
    kind: ParameterTableKind,
    path: PathBuf,
) -> Result<LoadedTable, LoadParameterError> {
    let content = read_text(&path).await?;
    let table = parse_kind(kind, &content).map_err(|source| LoadParameterError::Nc {
        path: path.clone(),
        source,
    })?;
    log::debug!("loaded {:?} table from {}", kind, path.display());
    Ok(table)
}

async fn load_drill_sizes(path: Option<PathBuf>) -> Result<DrillSizeTable, LoadParameterError> {
    let Some(path) = path else {
        return DrillSizeTable::builtin().map_err(|source| LoadParameterError::Nc {
            path: PathBuf::from("<builtin>"),
            source,
        });
    };
    let content = read_text(&path).await?;
    DrillSizeTable::from_toml_str(&content)
        .map_err(|source| LoadParameterError::Nc { path, source })
}

/// Read every parameter table concurrently; tables not listed stay empty
pub async fn load_parameter_tables(
    files: Vec<(ParameterTableKind, PathBuf)>,
    drill_size_file: Option<PathBuf>,
) -> Result<LoadedParameters, LoadParameterError> {
    let mut tasks = JoinSet::new();
    for (kind, path) in files {
        tasks.spawn(load_one(kind, path));
    }
    let drill_sizes = tokio::spawn(load_drill_sizes(drill_size_file));

    let mut tables = ParameterTables::default();
    while let Some(joined) = tasks.join_next().await {
        match joined?? {
            LoadedTable::Reaming(ParameterTableKind::SkillReaming, rows) => {
                tables.skill_reaming = rows
            }
            LoadedTable::Reaming(_, rows) => tables.crystal_reaming = rows,
            LoadedTable::Tapping(rows) => tables.tapping = rows,
            LoadedTable::Drilling(rows) => tables.drilling = rows,
        }
    }
    let drill_sizes = drill_sizes.await??;

    log::info!(
        "loaded parameters: {} crystal, {} skill, {} tap, {} drill rows; {} drill sizes",
        tables.crystal_reaming.len(),
        tables.skill_reaming.len(),
        tables.tapping.len(),
        tables.drilling.len(),
        drill_sizes.len()
    );
    Ok(LoadedParameters {
        tables,
        drill_sizes,
    })
}
