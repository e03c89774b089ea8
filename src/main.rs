//! webidl2ts - generate TypeScript declarations from WebIDL.
//!
//! Reads the JSON AST emitted by a WebIDL parser and writes `.d.ts` text,
//! either as ambient browser-style declarations or, with `--emscripten`, as
//! class skeletons inside the emscripten module namespace.
//!
//! Set the `WEBIDL2TS_LOG` environment variable to enable tracing:
//!
//! ```bash
//! WEBIDL2TS_LOG=debug webidl2ts dom.json -o dom.d.ts
//! ```

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use webidl_ast::RootType;
use webidl_ts::emscripten::{self, DEFAULT_MODULE_NAME};
use webidl_ts::printer::{self, PrintOptions};
use webidl_ts::{ConvertOptions, OutputMode};

mod config;
mod diagnostic;
mod report;

use config::Config;

/// Report base name used when writing to stdout.
const DEFAULT_REPORT_BASE: &str = "webidl2ts";

#[derive(Parser, Debug)]
#[command(
    name = "webidl2ts",
    version,
    about = "Generate TypeScript declarations from WebIDL"
)]
struct Cli {
    /// JSON definition files produced by a WebIDL parser (`-` reads stdin)
    #[arg(required = true, value_name = "INPUT")]
    inputs: Vec<PathBuf>,

    /// Output file (stdout if omitted)
    #[arg(short, long, value_name = "FILE")]
    out: Option<PathBuf>,

    /// Emit class skeletons for emscripten's WebIDL binder
    #[arg(short, long)]
    emscripten: bool,

    /// Namespace wrapping emscripten bindings
    #[arg(short, long, value_name = "NAME")]
    module: Option<String>,

    /// Configuration file (default: ./webidl2ts.toml when present)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Also write a markdown report next to the output
    #[arg(long)]
    report: bool,

    /// Omit the generated-file comment
    #[arg(long)]
    no_header: bool,

    /// Enable verbose debug logging and full diagnostic dumps
    #[arg(short, long)]
    debug: bool,
}

/// Command-line flags merged over the configuration file.
#[derive(Debug, Clone)]
struct Settings {
    convert: ConvertOptions,
    module: String,
    print: PrintOptions,
    report: bool,
}

impl Settings {
    fn resolve(cli: &Cli, config: &Config) -> Self {
        let output = &config.output;

        let mut print = PrintOptions::default();
        if let Some(size) = output.indent_size {
            print = print.with_indent_size(size);
        }
        if output.use_tabs.unwrap_or(false) {
            print = print.with_tabs();
        }
        if cli.no_header || !output.header.unwrap_or(true) {
            print = print.without_header();
        }

        Self {
            convert: ConvertOptions {
                emscripten: cli.emscripten || config.convert.emscripten,
            },
            module: cli
                .module
                .clone()
                .or_else(|| output.module.clone())
                .unwrap_or_else(|| DEFAULT_MODULE_NAME.to_string()),
            print,
            report: cli.report || output.report.unwrap_or(false),
        }
    }
}

fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        // Diagnostics already reach the user through the colored printer.
        EnvFilter::try_from_env("WEBIDL2TS_LOG").unwrap_or_else(|_| EnvFilter::new("error"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(false)
                .with_target(true)
                .with_level(true),
        )
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            diagnostic::emit_error(&err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load_default()?.unwrap_or_default(),
    };
    let settings = Settings::resolve(cli, &config);
    tracing::debug!(?settings, "resolved settings");

    let roots = read_inputs(&cli.inputs)?;
    let conversion = webidl_ts::convert(&roots, &settings.convert);
    diagnostic::emit_diagnostics(&conversion.diagnostics, cli.debug);

    let declarations: Vec<_> = conversion.declarations().cloned().collect();
    let declarations = match settings.convert.mode() {
        OutputMode::Ambient => declarations,
        OutputMode::Runtime => emscripten::wrap_module(&settings.module, declarations),
    };
    let text = printer::print(&declarations, &settings.print);

    match &cli.out {
        Some(path) => fs::write(path, &text)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => io::stdout()
            .write_all(text.as_bytes())
            .context("failed to write to stdout")?,
    }

    if settings.report {
        let base = cli
            .out
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_REPORT_BASE));
        let path = report::write_report(&base, &conversion)
            .with_context(|| format!("failed to write report for {}", base.display()))?;
        tracing::info!(path = %path.display(), "wrote report");
    }

    tracing::info!(
        definitions = conversion.items.len(),
        diagnostics = conversion.diagnostics.len(),
        "conversion finished"
    );
    Ok(())
}

/// Load every input in order and concatenate their definitions.
fn read_inputs(inputs: &[PathBuf]) -> Result<Vec<RootType>> {
    let mut roots = Vec::new();
    for input in inputs {
        tracing::debug!(input = %input.display(), "reading definitions");
        roots.extend(read_input(input)?);
    }
    Ok(roots)
}

fn read_input(input: &Path) -> Result<Vec<RootType>> {
    if input == Path::new("-") {
        let mut src = String::new();
        io::stdin()
            .read_to_string(&mut src)
            .context("failed to read stdin")?;
        return webidl_ast::parse_definitions(&src).context("invalid definitions on stdin");
    }

    webidl_ast::read_definitions(input)
        .with_context(|| format!("failed to load {}", input.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("webidl2ts").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_inputs_are_required() {
        assert!(Cli::try_parse_from(["webidl2ts"]).is_err());
    }

    #[test]
    fn test_defaults_without_config() {
        let settings = Settings::resolve(&cli(&["dom.json"]), &Config::default());
        assert!(!settings.convert.emscripten);
        assert_eq!(settings.module, "Module");
        assert!(settings.print.header);
        assert_eq!(settings.print.indent_str(), "    ");
        assert!(!settings.report);
    }

    #[test]
    fn test_config_is_applied() {
        let config = Config::parse(
            "[convert]\nemscripten = true\n[output]\nmodule = \"Ammo\"\nuse_tabs = true\nheader = false\nreport = true\n",
        )
        .unwrap();
        let settings = Settings::resolve(&cli(&["a.json"]), &config);
        assert!(settings.convert.emscripten);
        assert_eq!(settings.module, "Ammo");
        assert_eq!(settings.print.indent_str(), "\t");
        assert!(!settings.print.header);
        assert!(settings.report);
    }

    #[test]
    fn test_flags_override_config() {
        let config = Config::parse("[output]\nmodule = \"Ammo\"\nindent_size = 2\n").unwrap();
        let settings = Settings::resolve(
            &cli(&["-e", "-m", "Box2D", "--no-header", "--report", "a.json", "b.json"]),
            &config,
        );
        assert!(settings.convert.emscripten);
        assert_eq!(settings.module, "Box2D");
        assert_eq!(settings.print.indent_str(), "  ");
        assert!(!settings.print.header);
        assert!(settings.report);
    }

    #[test]
    fn test_read_inputs_concatenates_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.json");
        let b = dir.path().join("b.json");
        fs::write(&a, r#"[{ "type": "includes", "target": "A", "includes": "M" }]"#).unwrap();
        fs::write(&b, r#"[{ "type": "enum", "name": "B", "values": ["x"] }]"#).unwrap();

        let roots = read_inputs(&[b, a]).unwrap();
        let names: Vec<_> = roots.iter().filter_map(|r| r.name()).collect();
        assert_eq!(names, ["B", "A"]);
    }

    #[test]
    fn test_missing_input_names_the_file() {
        let err = read_inputs(&[PathBuf::from("does-not-exist.json")]).unwrap_err();
        assert!(err.to_string().contains("does-not-exist.json"));
    }
}
