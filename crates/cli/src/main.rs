//! Command-line interface for rst2gfm.
//! Converts doctrees (serialized as JSON) into GitHub Flavored Markdown.
//!
//! Usage:
//!   rst2gfm [INPUT] [-o OUTPUT]               - Convert one document (default: stdin to stdout)
//!   rst2gfm INPUT... --out-dir DIR [--jobs N] - Convert many documents in parallel

use clap::error::ErrorKind;
use clap::{Arg, ArgAction, ArgMatches, Command, value_parser};
use rst2gfm_core::{JsonDoctreeParser, Rst2GfmError};
use rst2gfm_writer::{BatchInput, BatchOptions, Options, convert_batch, convert_with};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn build_cli() -> Command {
    Command::new("rst2gfm")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert reStructuredText doctrees to GitHub Flavored Markdown")
        .arg(
            Arg::new("input")
                .help("Input doctree file(s) (default: stdin)")
                .num_args(0..)
                .value_parser(value_parser!(PathBuf))
                .index(1),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .help("Output Markdown file (default: stdout)")
                .value_parser(value_parser!(PathBuf))
                .conflicts_with("out-dir"),
        )
        .arg(
            Arg::new("out-dir")
                .long("out-dir")
                .help("Directory receiving one .md file per input")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("YAML file with translator options")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("strict")
                .long("strict")
                .help("Fail on named references without a matching target")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("no-anchors")
                .long("no-anchors")
                .help("Do not emit <a id> markers for id targets")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("jobs")
                .long("jobs")
                .short('j')
                .help("Worker threads for multi-file conversion")
                .value_parser(value_parser!(usize)),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Increase log verbosity (repeatable)")
                .action(ArgAction::Count),
        )
}

fn main() -> ExitCode {
    let matches = build_cli().get_matches();
    init_logging(matches.get_count("verbose"));

    let inputs: Vec<PathBuf> = matches
        .get_many::<PathBuf>("input")
        .map(|paths| paths.cloned().collect())
        .unwrap_or_default();

    let result = match matches.get_one::<PathBuf>("out-dir") {
        Some(out_dir) => handle_batch_command(&matches, &inputs, out_dir),
        None if inputs.len() > 1 => build_cli()
            .error(
                ErrorKind::MissingRequiredArgument,
                "multiple inputs require --out-dir",
            )
            .exit(),
        None => handle_convert_command(&matches, inputs.first()),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Routes `log` records through a stderr subscriber.
/// `RUST_LOG` wins over the verbosity flag.
fn init_logging(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

/// Builds translator options from the config file and flag overrides.
fn load_options(matches: &ArgMatches) -> Result<Options, Rst2GfmError> {
    let mut options = match matches.get_one::<PathBuf>("config") {
        Some(path) => {
            let text = std::fs::read_to_string(path)?;
            Options::from_yaml_str(&text).map_err(|e| match e {
                Rst2GfmError::Config(msg) => {
                    Rst2GfmError::Config(format!("{}: {}", path.display(), msg))
                }
                other => other,
            })?
        }
        None => Options::default(),
    };

    if matches.get_flag("strict") {
        options.strict_references = true;
    }
    if matches.get_flag("no-anchors") {
        options.anchor_targets = false;
    }
    Ok(options)
}

/// Handle the single-document conversion
fn handle_convert_command(
    matches: &ArgMatches,
    input: Option<&PathBuf>,
) -> Result<ExitCode, Rst2GfmError> {
    let options = load_options(matches)?;

    let (source, label) = match input {
        Some(path) => (std::fs::read_to_string(path)?, path.display().to_string()),
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            (buffer, "<stdin>".to_string())
        }
    };

    let markdown =
        convert_with(&JsonDoctreeParser, &source, &options).map_err(|e| e.in_file(label))?;

    match matches.get_one::<PathBuf>("output") {
        Some(path) => std::fs::write(path, markdown)?,
        None => println!("{}", markdown),
    }

    Ok(ExitCode::SUCCESS)
}

/// Handle multi-document conversion into an output directory
fn handle_batch_command(
    matches: &ArgMatches,
    inputs: &[PathBuf],
    out_dir: &Path,
) -> Result<ExitCode, Rst2GfmError> {
    let options = load_options(matches)?;
    std::fs::create_dir_all(out_dir)?;

    let mut batch_inputs = Vec::with_capacity(inputs.len());
    for path in inputs {
        batch_inputs.push(BatchInput {
            id: path.display().to_string(),
            source: std::fs::read_to_string(path)?,
        });
    }

    let batch_options = BatchOptions {
        max_threads: matches.get_one::<usize>("jobs").copied(),
        options,
        ..Default::default()
    };
    let batch = convert_batch(&JsonDoctreeParser, batch_inputs, &batch_options);

    let mut failed = false;
    for (path, entry) in inputs.iter().zip(batch.results) {
        match entry.result {
            Ok(markdown) => {
                let target = output_path(out_dir, path);
                std::fs::write(&target, markdown)?;
                log::info!("wrote {}", target.display());
            }
            Err(e) => {
                eprintln!("Error: {}", e.in_file(entry.id));
                failed = true;
            }
        }
    }

    log::info!(
        "converted {}/{} documents in {:.1} ms",
        batch.stats.succeeded,
        batch.stats.total,
        batch.stats.processing_time_ms
    );

    Ok(if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

/// `<out_dir>/<input stem>.md`
fn output_path(out_dir: &Path, input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string());
    out_dir.join(format!("{}.md", stem))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        build_cli().debug_assert();
    }

    #[test]
    fn output_path_replaces_extension() {
        assert_eq!(
            output_path(Path::new("out"), Path::new("docs/guide.json")),
            PathBuf::from("out/guide.md")
        );
    }

    #[test]
    fn flags_override_config_defaults() {
        let matches = build_cli().get_matches_from(["rst2gfm", "--strict", "--no-anchors"]);
        let options = load_options(&matches).unwrap();
        assert!(options.strict_references);
        assert!(!options.anchor_targets);
    }
}
