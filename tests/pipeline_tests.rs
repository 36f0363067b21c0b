//! End-to-end runs over the fixture shop: settings, templates, tables and
//! sub-programs under `tests/fixtures`.

use std::path::{Path, PathBuf};

use nc_program_concatenation::config::Settings;
use nc_program_concatenation::operation::DirectedOperationType;
use nc_program_concatenation::parameter::{MaterialType, ReamerType};
use nc_program_concatenation::parser::{MainProgramType, ProgramRole};
use nc_program_concatenation::rewriter::{DrillingMethod, RewriteByToolArg};
use nc_program_concatenation::stream::OpenError;
use nc_program_concatenation::usecase::{
    EditMainProgramError, LoadMainProgramError, combine_programs, edit_main_programs,
    load_main_programs, load_parameter_tables, read_sub_program, save_program,
};
use nc_program_concatenation::{NcError, ProgramCode};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tempfile::TempDir;

fn fixtures() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn settings() -> Settings {
    Settings::load(&fixtures().join("ncconcat.toml")).expect("load fixture settings")
}

struct Built {
    operation: DirectedOperationType,
    programs: Vec<ProgramCode>,
}

async fn rewrite(
    sub_program: &str,
    material: MaterialType,
    thickness: Decimal,
    drilling_method: DrillingMethod,
    reamer: Option<ReamerType>,
) -> Result<Built, EditMainProgramError> {
    let settings = settings();
    let sub_program = read_sub_program(&fixtures().join("sub_programs").join(sub_program))
        .await
        .expect("read sub-program");
    let main_programs = load_main_programs(settings.main_program_paths("RB250F"))
        .await
        .expect("load main programs");
    let parameters =
        load_parameter_tables(settings.parameter_paths(), settings.drill_size_file.clone())
            .await
            .expect("load parameters");

    let directer = sub_program
        .code
        .classify(&parameters.drill_sizes)
        .expect("classify");
    let arg = RewriteByToolArg {
        main_programs: &main_programs,
        material,
        thickness,
        drilling_method,
        sub_program_number: sub_program.number.expect("number in file name"),
        directed_diameter: directer.tool_diameter,
        parameters: &parameters.tables,
    };

    let programs = edit_main_programs(directer.directed_operation, reamer, &arg)?;
    Ok(Built {
        operation: directer.directed_operation,
        programs,
    })
}

fn names(programs: &[ProgramCode]) -> Vec<&str> {
    programs.iter().map(|p| p.name.as_str()).collect()
}

#[tokio::test]
async fn test_main_programs_are_keyed_by_role() {
    let programs = load_main_programs(settings().main_program_paths("RB250F"))
        .await
        .unwrap();

    let kinds: Vec<_> = programs.keys().copied().collect();
    assert_eq!(kinds, MainProgramType::ALL);
    assert_eq!(programs[&MainProgramType::Tapping].role, ProgramRole::Tapping);
    assert_eq!(programs[&MainProgramType::Tapping].name, "TAP");
    assert_eq!(programs[&MainProgramType::Chamfering].name, "MENTORI");
    // `%` delimiters are dropped
    assert!(!programs[&MainProgramType::Drilling].to_string().contains('%'));
}

#[tokio::test]
async fn test_unconfigured_machine_directory() {
    let result = load_main_programs(settings().main_program_paths("RB260")).await;
    assert!(matches!(
        result,
        Err(LoadMainProgramError::Open(OpenError::DirectoryNotFound(_)))
    ));
}

#[tokio::test]
async fn test_parameter_tables_load() {
    let settings = settings();
    let parameters = load_parameter_tables(settings.parameter_paths(), None)
        .await
        .unwrap();

    assert_eq!(parameters.tables.crystal_reaming.len(), 2);
    assert_eq!(parameters.tables.skill_reaming.len(), 1);
    assert_eq!(parameters.tables.tapping.len(), 2);
    assert_eq!(parameters.tables.drilling.len(), 6);
    assert_eq!(
        parameters.drill_sizes.millimeter_of("3/16").unwrap(),
        dec!(4.76)
    );
}

#[tokio::test]
async fn test_tapping_m13_3_aluminum() {
    let built = rewrite(
        "O8000.nc",
        MaterialType::Aluminum,
        dec!(10),
        DrillingMethod::ThroughHole,
        None,
    )
    .await
    .unwrap();

    assert_eq!(built.operation, DirectedOperationType::Tapping);
    assert_eq!(names(&built.programs), ["CD", "DR", "TAP"]);

    let tap = built.programs[2].to_string();
    assert!(tap.contains("M29S700"));
    assert!(tap.contains("G98G84R5.Z-11.5F300"));
    assert!(tap.contains("M98P8000"));
    assert_eq!(built.programs[2].placeholder_count(), 0);

    let pilot = built.programs[1].to_string();
    assert!(pilot.contains("M3S1200"));
    assert!(pilot.contains("G98G83R3.Z-15.Q3.F200"));

    let center = built.programs[0].to_string();
    assert!(center.contains("M3S2000"));
    assert!(center.contains("G98G81R3.Z-4.F150"));
}

#[tokio::test]
async fn test_crystal_reamer_from_inch_directive() {
    let built = rewrite(
        "O8001.nc",
        MaterialType::Aluminum,
        dec!(12),
        DrillingMethod::ThroughHole,
        Some(ReamerType::Crystal),
    )
    .await
    .unwrap();

    assert_eq!(built.operation, DirectedOperationType::Reaming);
    assert_eq!(
        names(&built.programs),
        ["CD", "DR", "DR", "MENTORI", "REAMER"]
    );
    assert!(built.programs[1].to_string().contains("Z-14.5Q1.5F300"));
    assert!(built.programs[2].to_string().contains("Z-15.Q2.F280"));
    assert!(built.programs[3].to_string().contains("G98G82R3.Z-0.3P500F200"));
    assert!(built.programs[4].to_string().contains("G98G85R3.Z-13.5F120"));
    assert!(built.programs[4].to_string().contains("M98P8001"));
}

#[tokio::test]
async fn test_reaming_without_reamer_type() {
    let result = rewrite(
        "O8001.nc",
        MaterialType::Aluminum,
        dec!(12),
        DrillingMethod::ThroughHole,
        None,
    )
    .await;

    assert!(matches!(
        result,
        Err(EditMainProgramError::Nc(NcError::InconsistentReamer { .. }))
    ));
}

#[tokio::test]
async fn test_blind_drilling_in_iron() {
    let built = rewrite(
        "O8002.nc",
        MaterialType::Iron,
        dec!(20),
        DrillingMethod::BlindHole {
            pilot_depth: dec!(12),
            hole_depth: dec!(12),
        },
        None,
    )
    .await
    .unwrap();

    assert_eq!(built.operation, DirectedOperationType::Drilling);
    assert_eq!(names(&built.programs), ["CD", "DR", "MENTORI"]);
    assert!(built.programs[0].to_string().contains("M3S1500"));

    let drill = built.programs[1].to_string();
    assert!(drill.contains("M3S1000"));
    assert!(drill.contains("G98G83R3.Z-12.Q3.F110"));

    let chamfer = built.programs[2].to_string();
    assert!(chamfer.contains("M3S1200"));
    assert!(chamfer.contains("Z-0.5P500F120"));
}

#[tokio::test]
async fn test_combine_and_save() {
    let built = rewrite(
        "O8000.nc",
        MaterialType::Aluminum,
        dec!(10),
        DrillingMethod::ThroughHole,
        None,
    )
    .await
    .unwrap();

    let combined = combine_programs(&built.programs, "RB250F", MaterialType::Aluminum);
    assert_eq!(combined.name, "CD>DR>TAP");
    assert_eq!(combined.role, ProgramRole::CombinedProgram);
    let block_total: usize = built.programs.iter().map(|p| p.blocks.len()).sum();
    assert_eq!(combined.blocks.len(), 1 + 2 + block_total);

    let dir = TempDir::new().unwrap();
    let output = dir.path().join("O8000_RB250F.nc");
    save_program(&output, &combined).unwrap();

    let saved = std::fs::read_to_string(&output).unwrap();
    assert!(saved.starts_with("(RB250F-AL)\nO1000(CENTER DRILL)\n"));
    assert!(saved.ends_with("G91G28Z0\nM30"));
    assert!(!saved.contains('*'));
    assert_eq!(saved, combined.to_string());
}

#[tokio::test]
async fn test_ambiguous_sub_program() {
    let sub_program = read_sub_program(&fixtures().join("sub_programs/O8003.nc"))
        .await
        .unwrap();
    let err = sub_program.code.directed_operation().unwrap_err();

    assert!(matches!(err, NcError::MultipleDirectedOperations(3)));
    assert!(err.to_string().contains("3件"));
}
