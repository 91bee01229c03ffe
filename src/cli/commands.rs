//! Command dispatch: each subcommand resolves to a handler returning an exit code.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use clap::CommandFactory;
use tracing::{debug, instrument};

use crate::application::services::{ForestStats, LookupService};
use crate::cli::args::{BitsCommands, Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, local_config_path, Settings};
use crate::domain::{
    count_set_bits, fibonacci_nth, get_bit, month_range, multiply, set_bit, to_money, to_percent,
    DomainError, NodeId, TreeDisplay,
};
use crate::exitcode;
use crate::infrastructure::{InfraError, ServiceContainer};

/// Run the parsed command line; returns the process exit code on success.
pub fn execute_command(cli: &Cli) -> CliResult<i32> {
    let Some(command) = &cli.command else {
        return Err(CliError::Usage(
            "no command given, see `citytree --help`".to_string(),
        ));
    };

    let local_dir = resolve_local_dir(cli.config_dir.as_deref())?;
    let settings = Settings::load(Some(&local_dir))?;
    debug!("settings: {:?}", settings);
    let container = ServiceContainer::new(settings);
    let data = cli.data.as_deref();

    match command {
        Commands::Find {
            ids,
            string_id,
            path,
        } => cmd_find(&container, data, ids, *string_id, *path),
        Commands::Tree => cmd_tree(&container, data),
        Commands::Check => cmd_check(&container, data),
        Commands::Bits { command } => cmd_bits(command),
        Commands::Fib { n } => cmd_fib(*n),
        Commands::Money { value, decimals } => {
            let decimals = decimals.unwrap_or(container.settings.money.decimals);
            output::info(&to_money(*value, decimals)?);
            Ok(exitcode::OK)
        }
        Commands::Percent { point, accuracy } => {
            let accuracy = accuracy.unwrap_or(container.settings.percent.accuracy);
            output::info(&to_percent(*point, accuracy)?);
            Ok(exitcode::OK)
        }
        Commands::MonthRange { date } => cmd_month_range(date.as_deref()),
        Commands::Config { command } => cmd_config(&container.settings, command, &local_dir),
        Commands::Completion { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(*shell, &mut cmd, name, &mut std::io::stdout());
            Ok(exitcode::OK)
        }
    }
}

fn resolve_local_dir(config_dir: Option<&Path>) -> CliResult<PathBuf> {
    match config_dir {
        Some(dir) => Ok(dir.to_path_buf()),
        None => std::env::current_dir()
            .map_err(|e| CliError::Infra(InfraError::io("current directory", e))),
    }
}

/// Convert raw CLI ids into lookup targets.
pub fn parse_targets(ids: &[String], string_id: bool) -> Vec<NodeId> {
    ids.iter()
        .map(|raw| {
            if string_id {
                NodeId::from(raw.as_str())
            } else {
                NodeId::parse_lenient(raw)
            }
        })
        .collect()
}

/// Output lines for `find`, plus the targets that were not found.
///
/// One line per found target: the label, or the root-to-node path joined
/// by ` > ` when `show_path`. With several targets each line is `id<TAB>result`.
pub fn render_find_lines<'a>(
    service: &LookupService,
    targets: &'a [NodeId],
    show_path: bool,
) -> (Vec<String>, Vec<&'a NodeId>) {
    let labeled = targets.len() > 1;
    let mut lines = Vec::new();
    let mut missing = Vec::new();

    for (target, found) in targets.iter().zip(service.find_many(targets)) {
        let Some(name) = found else {
            missing.push(target);
            continue;
        };
        let result = if show_path {
            service
                .find_path(target)
                .map(|path| path.join(" > "))
                .unwrap_or_else(|| name.to_string())
        } else {
            name.to_string()
        };
        if labeled {
            lines.push(format!("{}\t{}", target, result));
        } else {
            lines.push(result);
        }
    }
    (lines, missing)
}

#[instrument(skip(container))]
fn cmd_find(
    container: &ServiceContainer,
    data: Option<&Path>,
    ids: &[String],
    string_id: bool,
    show_path: bool,
) -> CliResult<i32> {
    let service = container.lookup_service(data)?;
    let targets = parse_targets(ids, string_id);

    let (lines, missing) = render_find_lines(&service, &targets, show_path);
    for target in &missing {
        output::warning(&format!("no node with id {}", target));
    }
    for line in &lines {
        output::info(line);
    }

    Ok(if missing.is_empty() {
        exitcode::OK
    } else {
        exitcode::NOT_FOUND
    })
}

#[instrument(skip(container))]
fn cmd_tree(container: &ServiceContainer, data: Option<&Path>) -> CliResult<i32> {
    let service = container.lookup_service(data)?;
    output::info(&service.forest().to_tree_string());
    Ok(exitcode::OK)
}

/// `key: value` lines summarizing the forest shape.
pub fn render_stats(stats: &ForestStats) -> Vec<String> {
    vec![
        format!("roots:  {}", stats.roots),
        format!("nodes:  {}", stats.nodes),
        format!("depth:  {}", stats.depth),
        format!("leaves: {}", stats.leaves),
    ]
}

/// One warning per id carried by more than one node.
pub fn duplicate_warnings(service: &LookupService) -> Vec<String> {
    service
        .duplicate_ids()
        .into_iter()
        .map(|id| {
            format!(
                "id {} occurs more than once; lookups return the first in pre-order",
                id
            )
        })
        .collect()
}

#[instrument(skip(container))]
fn cmd_check(container: &ServiceContainer, data: Option<&Path>) -> CliResult<i32> {
    let service = container.lookup_service(data)?;

    output::header("Forest");
    for line in render_stats(&service.stats()) {
        output::detail(&line);
    }

    let warnings = duplicate_warnings(&service);
    if warnings.is_empty() {
        output::success("all ids are unique");
    }
    for warning in &warnings {
        output::warning(warning);
    }
    Ok(exitcode::OK)
}

fn cmd_bits(command: &BitsCommands) -> CliResult<i32> {
    let value = match command {
        BitsCommands::Count { number } => count_set_bits(*number).to_string(),
        BitsCommands::Get { number, position } => get_bit(*number, *position).to_string(),
        BitsCommands::Set {
            number,
            position,
            clear,
        } => set_bit(*number, *position, !*clear).to_string(),
        BitsCommands::Multiply { a, b } => multiply(*a, *b).to_string(),
    };
    output::info(&value);
    Ok(exitcode::OK)
}

fn cmd_fib(n: u32) -> CliResult<i32> {
    let value = fibonacci_nth(n).ok_or_else(|| {
        DomainError::InvalidArgument(format!("F({}) does not fit in 128 bits", n))
    })?;
    output::info(&value);
    Ok(exitcode::OK)
}

fn cmd_month_range(date: Option<&str>) -> CliResult<i32> {
    let date = match date {
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map_err(|e| CliError::InvalidArgs(format!("date '{}': {}", raw, e)))?,
        None => chrono::Local::now().date_naive(),
    };
    output::info(&month_range(date)?);
    Ok(exitcode::OK)
}

fn cmd_config(settings: &Settings, command: &ConfigCommands, local_dir: &Path) -> CliResult<i32> {
    match command {
        ConfigCommands::Show => output::info(&settings.to_toml()?),
        ConfigCommands::Template => output::info(&Settings::template()),
        ConfigCommands::Path => {
            match global_config_path() {
                Some(path) => output::action("global", &path.display()),
                None => output::warning("no global config directory on this platform"),
            }
            output::action("local", &local_config_path(local_dir).display());
        }
    }
    Ok(exitcode::OK)
}
