use anyhow::{Context, Result};

use nc_program_concatenation::config::{BuildArgs, Command, Config, Settings};
use nc_program_concatenation::rewriter::RewriteByToolArg;
use nc_program_concatenation::usecase::{
    combine_programs, edit_main_programs, load_main_programs, load_parameter_tables,
    read_sub_program, save_program,
};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_args_and_env()?;

    env_logger::Builder::new()
        .parse_filters(&config.log_level)
        .init();

    match &config.settings_path {
        Some(path) => log::debug!("using settings from {}", path.display()),
        None => log::debug!("no settings file found, using defaults"),
    }

    match &config.command {
        Command::Classify { sub_program, json } => {
            classify(&config.settings, sub_program, *json).await
        }
        Command::Build(args) => build(&config.settings, args).await,
        Command::Machines => {
            for machine in &config.settings.machine_tools {
                println!("{}", machine);
            }
            Ok(())
        }
    }
}

async fn classify(settings: &Settings, path: &std::path::Path, json: bool) -> Result<()> {
    let parameters = load_parameter_tables(Vec::new(), settings.drill_size_file.clone())
        .await
        .context("Failed to load the drill size table")?;
    let sub_program = read_sub_program(path)
        .await
        .with_context(|| format!("Failed to read sub-program {}", path.display()))?;

    let directer = sub_program
        .code
        .classify(&parameters.drill_sizes)
        .with_context(|| format!("Failed to classify {}", path.display()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&directer)?);
    } else {
        println!("{} {}", directer.directed_operation, directer.tool_diameter);
    }
    Ok(())
}

async fn build(settings: &Settings, args: &BuildArgs) -> Result<()> {
    settings.validate_machine(&args.machine)?;

    let (sub_program, main_programs, parameters) = tokio::try_join!(
        async {
            read_sub_program(&args.sub_program)
                .await
                .with_context(|| {
                    format!("Failed to read sub-program {}", args.sub_program.display())
                })
        },
        async {
            load_main_programs(settings.main_program_paths(&args.machine))
                .await
                .with_context(|| format!("Failed to load main programs for {}", args.machine))
        },
        async {
            load_parameter_tables(settings.parameter_paths(), settings.drill_size_file.clone())
                .await
                .context("Failed to load parameter tables")
        },
    )?;

    let directer = sub_program
        .code
        .classify(&parameters.drill_sizes)
        .with_context(|| format!("Failed to classify {}", args.sub_program.display()))?;
    log::info!(
        "{} directs {} {}",
        sub_program.code.program().name,
        directer.directed_operation,
        directer.tool_diameter
    );

    let sub_program_number = args
        .sub_program_number
        .or(sub_program.number)
        .context("No sub-program number in the file name; pass --sub-program-number")?;

    let arg = RewriteByToolArg {
        main_programs: &main_programs,
        material: args.material,
        thickness: args.thickness,
        drilling_method: args.drilling_method(),
        sub_program_number,
        directed_diameter: directer.tool_diameter,
        parameters: &parameters.tables,
    };
    let programs = edit_main_programs(directer.directed_operation, args.reamer, &arg)
        .context("Failed to rewrite main programs")?;

    let combined = combine_programs(&programs, &args.machine, args.material);
    save_program(&args.output, &combined)
        .with_context(|| format!("Failed to save {}", args.output.display()))?;

    println!("{} -> {}", combined.name, args.output.display());
    Ok(())
}
