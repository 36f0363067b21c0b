//! Configuration management for ncconcat.
//!
//! Handles:
//! - Command-line argument parsing
//! - The TOML settings file (machines, program and table locations)

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::parameter::{MaterialType, ParameterTableKind, ReamerType};
use crate::parser::ast::MainProgramType;
use crate::rewriter::DrillingMethod;

/// Settings file looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "ncconcat.toml";

/// Placeholder in main-program file names replaced by the machine name
pub const MACHINE_PLACEHOLDER: &str = "{machine}";

/// Command-line arguments for ncconcat
#[derive(Debug, Parser)]
#[command(name = "ncconcat")]
#[command(about = "Concatenate and parameterize NC drilling programs")]
#[command(version)]
pub struct Args {
    /// Settings file to use instead of the default locations
    #[arg(long, help = "Path to a settings TOML file")]
    pub config: Option<PathBuf>,

    #[arg(
        long,
        default_value = "info",
        help = "Log level (trace, debug, info, warn, error)"
    )]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Show the operation and tool diameter a sub-program directs
    Classify {
        sub_program: PathBuf,

        #[arg(long, help = "Print the result as JSON")]
        json: bool,
    },

    /// Rewrite the main programs for a sub-program and save the combined program
    Build(BuildArgs),

    /// List the configured machine tools
    Machines,
}

#[derive(Debug, Clone, clap::Args)]
pub struct BuildArgs {
    pub sub_program: PathBuf,

    #[arg(long, help = "Machine tool name (see `ncconcat machines`)")]
    pub machine: String,

    #[arg(long, help = "Workpiece material (aluminum/al, iron/ss400)")]
    pub material: MaterialType,

    #[arg(long, help = "Sheet thickness in millimeters")]
    pub thickness: Decimal,

    #[arg(long, help = "Reamer type for reaming (crystal, skill)")]
    pub reamer: Option<ReamerType>,

    #[arg(long, requires = "blind_depth", help = "Pilot drill depth of a blind hole")]
    pub blind_pilot_depth: Option<Decimal>,

    #[arg(long, requires = "blind_pilot_depth", help = "Depth of a blind hole")]
    pub blind_depth: Option<Decimal>,

    #[arg(long, help = "Defaults to the digits of the sub-program file name")]
    pub sub_program_number: Option<u32>,

    #[arg(long, short, help = "Where to write the combined program")]
    pub output: PathBuf,
}

impl BuildArgs {
    pub fn drilling_method(&self) -> DrillingMethod {
        match (self.blind_pilot_depth, self.blind_depth) {
            (Some(pilot_depth), Some(hole_depth)) => DrillingMethod::BlindHole {
                pilot_depth,
                hole_depth,
            },
            _ => DrillingMethod::ThroughHole,
        }
    }
}

/// Main-program file names per role; `{machine}` is replaced by the machine
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct MainProgramFiles {
    pub center_drilling: String,
    pub drilling: String,
    pub chamfering: String,
    pub reaming: String,
    pub tapping: String,
}

impl Default for MainProgramFiles {
    fn default() -> Self {
        Self {
            center_drilling: "{machine}/CD.nc".to_string(),
            drilling: "{machine}/DR.nc".to_string(),
            chamfering: "{machine}/MENTORI.nc".to_string(),
            reaming: "{machine}/REAMER.nc".to_string(),
            tapping: "{machine}/TAP.nc".to_string(),
        }
    }
}

impl MainProgramFiles {
    pub fn file_name(&self, kind: MainProgramType) -> &str {
        match kind {
            MainProgramType::CenterDrilling => &self.center_drilling,
            MainProgramType::Drilling => &self.drilling,
            MainProgramType::Chamfering => &self.chamfering,
            MainProgramType::Reaming => &self.reaming,
            MainProgramType::Tapping => &self.tapping,
        }
    }
}

/// Parameter table file names
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ParameterFiles {
    pub crystal_reaming: String,
    pub skill_reaming: String,
    pub tapping: String,
    pub drilling: String,
}

impl Default for ParameterFiles {
    fn default() -> Self {
        Self {
            crystal_reaming: "crystal_reamer.toml".to_string(),
            skill_reaming: "skill_reamer.toml".to_string(),
            tapping: "tap.toml".to_string(),
            drilling: "drill.toml".to_string(),
        }
    }
}

impl ParameterFiles {
    pub fn file_name(&self, kind: ParameterTableKind) -> &str {
        match kind {
            ParameterTableKind::CrystalReaming => &self.crystal_reaming,
            ParameterTableKind::SkillReaming => &self.skill_reaming,
            ParameterTableKind::Tapping => &self.tapping,
            ParameterTableKind::Drilling => &self.drilling,
        }
    }
}

/// Contents of the settings file; every key has a default
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub machine_tools: Vec<String>,
    pub main_program_directory: PathBuf,
    pub main_program_files: MainProgramFiles,
    pub parameter_directory: PathBuf,
    pub parameter_files: ParameterFiles,
    /// Replaces the built-in drill size table
    pub drill_size_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            machine_tools: vec![
                "RB250F".to_string(),
                "RB260".to_string(),
                "611V".to_string(),
            ],
            main_program_directory: PathBuf::from("main_programs"),
            main_program_files: MainProgramFiles::default(),
            parameter_directory: PathBuf::from("parameters"),
            parameter_files: ParameterFiles::default(),
            drill_size_file: None,
        }
    }
}

impl Settings {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse settings TOML")
    }

    /// Load a settings file; relative paths inside it resolve against its directory
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file: {}", path.display()))?;
        let settings = Self::from_toml_str(&content)
            .with_context(|| format!("Invalid settings file: {}", path.display()))?;

        Ok(match path.parent() {
            Some(base) => settings.rebase(base),
            None => settings,
        })
    }

    fn rebase(mut self, base: &Path) -> Self {
        self.main_program_directory = base.join(&self.main_program_directory);
        self.parameter_directory = base.join(&self.parameter_directory);
        self.drill_size_file = self.drill_size_file.map(|file| base.join(file));
        self
    }

    pub fn validate_machine(&self, machine: &str) -> Result<()> {
        if !self.machine_tools.iter().any(|m| m == machine) {
            bail!(
                "Unknown machine tool '{}' (configured: {})",
                machine,
                self.machine_tools.join(", ")
            );
        }
        Ok(())
    }

    /// Template file for every main-program role on `machine`
    pub fn main_program_paths(&self, machine: &str) -> Vec<(MainProgramType, PathBuf)> {
        MainProgramType::ALL
            .into_iter()
            .map(|kind| {
                let file_name = self
                    .main_program_files
                    .file_name(kind)
                    .replace(MACHINE_PLACEHOLDER, machine);
                (kind, self.main_program_directory.join(file_name))
            })
            .collect()
    }

    pub fn parameter_paths(&self) -> Vec<(ParameterTableKind, PathBuf)> {
        ParameterTableKind::ALL
            .into_iter()
            .map(|kind| {
                let file_name = self.parameter_files.file_name(kind);
                (kind, self.parameter_directory.join(file_name))
            })
            .collect()
    }
}

/// Combined configuration from all sources
#[derive(Debug, Clone)]
pub struct Config {
    /// Settings file in effect, if any was found
    pub settings_path: Option<PathBuf>,
    pub settings: Settings,
    pub log_level: String,
    pub command: Command,
}

impl Config {
    /// Create configuration from command-line arguments
    pub fn from_args_and_env() -> Result<Self> {
        Self::from_args(Args::parse())
    }

    /// Create configuration from explicit arguments (useful for testing)
    pub fn from_args(args: Args) -> Result<Self> {
        let settings_path = match args.config {
            Some(path) => Some(path),
            None => Self::find_settings_file(),
        };

        let settings = match &settings_path {
            Some(path) => Settings::load(path)?,
            None => Settings::default(),
        };

        Ok(Config {
            settings_path,
            settings,
            log_level: args.log_level,
            command: args.command,
        })
    }

    /// `./ncconcat.toml`, then `<config_dir>/ncconcat/config.toml`
    fn find_settings_file() -> Option<PathBuf> {
        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.is_file() {
            return Some(local);
        }

        dirs::config_dir()
            .map(|dir| dir.join("ncconcat").join("config.toml"))
            .filter(|path| path.is_file())
    }
}
