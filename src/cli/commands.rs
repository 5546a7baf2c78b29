//! Command dispatch: each subcommand loads the model and drives one visitor over it.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, Settings};
use crate::domain::{ModelArena, ModelBuilder};
use crate::report::{CarbonPrinter, DebugXmlWriter, InputXmlWriter, ReportError};
use crate::tree_traits::TreeNodeConvert;
use crate::util::path::expand_path;

/// Which periods a `print` run covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeriodSelection {
    Period(usize),
    Year(i32),
    All,
}

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let settings = Settings::load(cli.config.as_deref())?;
    debug!("settings: {:?}", settings);

    match &cli.command {
        Some(Commands::Print {
            model,
            region,
            period,
            year,
            all_periods,
            output,
        }) => {
            let selection = match (period, year, all_periods) {
                (_, _, true) => PeriodSelection::All,
                (_, Some(year), _) => PeriodSelection::Year(*year),
                (Some(period), _, _) => PeriodSelection::Period(*period),
                _ => PeriodSelection::Period(0),
            };
            cmd_print(&settings, model, region.as_deref(), selection, output.as_deref())
        }
        Some(Commands::Export { model, output }) => cmd_export(model, output.as_deref()),
        Some(Commands::Debug {
            model,
            period,
            output,
        }) => cmd_debug(&settings, model, *period, output.as_deref()),
        Some(Commands::Regions { model }) => cmd_regions(model),
        Some(Commands::Tree { model }) => cmd_tree(model),
        Some(Commands::Config { command }) => cmd_config(&settings, command),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        None => Err(CliError::Usage(
            "no command given, see `ccreport --help`".to_string(),
        )),
    }
}

fn load_model(model: &Path) -> CliResult<ModelArena> {
    let path = expand_path(model);
    let mut builder = ModelBuilder::new();
    let arena = builder.build_from_file(&path)?;
    if builder.discarded_meta_info() > 0 {
        output::warning(&format!(
            "{} object-meta-info record(s) discarded from {}",
            builder.discarded_meta_info(),
            path.display()
        ));
    }
    Ok(arena)
}

/// Run `write` against the output file, or stdout when none is given.
fn with_output<F>(output: Option<&Path>, write: F) -> CliResult<()>
where
    F: FnOnce(&mut dyn Write) -> Result<(), ReportError>,
{
    match output {
        Some(path) => {
            let path: PathBuf = expand_path(path);
            let file = File::create(&path).map_err(|source| ReportError::Output {
                path: path.clone(),
                source,
            })?;
            let mut writer = BufWriter::new(file);
            let out: &mut dyn Write = &mut writer;
            write(out)?;
            writer.flush().map_err(ReportError::Io)?;
            output::success(&format!("wrote {}", path.display()));
            Ok(())
        }
        None => {
            let stdout = io::stdout();
            let mut lock = stdout.lock();
            let out: &mut dyn Write = &mut lock;
            write(out)?;
            lock.flush().map_err(ReportError::Io)?;
            Ok(())
        }
    }
}

#[instrument(skip(settings))]
fn cmd_print(
    settings: &Settings,
    model: &Path,
    region: Option<&str>,
    selection: PeriodSelection,
    output: Option<&Path>,
) -> CliResult<()> {
    let region = region
        .map(str::to_string)
        .or_else(|| settings.default_region.clone())
        .ok_or_else(|| {
            CliError::Usage("no region given and no default_region configured".to_string())
        })?;
    let arena = load_model(model)?;
    if arena.find_region(&region).is_none() {
        return Err(CliError::InvalidArgs(format!("region not in model: {}", region)));
    }

    let time = settings.model_time;
    with_output(output, |out| {
        let mut printer = CarbonPrinter::new(region.as_str(), out);
        match selection {
            PeriodSelection::All => arena.accept_all_periods(&mut printer, &time),
            PeriodSelection::Year(year) => {
                let period = time.period_for(year)?;
                arena.accept_with_time(&mut printer, period, &time)
            }
            PeriodSelection::Period(period) => arena.accept_with_time(&mut printer, period, &time),
        }
    })
}

#[instrument]
fn cmd_export(model: &Path, output: Option<&Path>) -> CliResult<()> {
    let arena = load_model(model)?;
    with_output(output, |out| InputXmlWriter::new(out).write_model(&arena))
}

#[instrument(skip(settings))]
fn cmd_debug(
    settings: &Settings,
    model: &Path,
    period: usize,
    output: Option<&Path>,
) -> CliResult<()> {
    settings.model_time.check_period(period)?;
    let arena = load_model(model)?;
    with_output(output, |out| DebugXmlWriter::new(out).write_model(&arena, period))
}

#[instrument]
fn cmd_regions(model: &Path) -> CliResult<()> {
    let arena = load_model(model)?;
    for region in arena.regions() {
        output::info(region.name());
    }
    Ok(())
}

#[instrument]
fn cmd_tree(model: &Path) -> CliResult<()> {
    let arena = load_model(model)?;
    output::info(&arena.to_tree_string());
    Ok(())
}

fn cmd_config(settings: &Settings, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            output::header("Effective settings");
            output::info(&settings.to_toml()?);
        }
        ConfigCommands::Path => match global_config_path() {
            Some(path) => {
                let state = if path.exists() { "found" } else { "not found" };
                output::detail(&format!("global: {} ({})", path.display(), state));
            }
            None => output::warning("cannot determine global config directory"),
        },
    }
    Ok(())
}
