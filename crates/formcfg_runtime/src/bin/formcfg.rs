//! formcfg CLI entry point.

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use formcfg_runtime::{LoaderConfig, Session, SessionSummary, load_from_file, save_to_file};
use formcfg_storage::FormStore;

/// CLI configuration parsed from arguments.
#[derive(Default)]
struct CliConfig {
    data_dir: Option<PathBuf>,
    project_name: Option<String>,
    extension: Option<String>,
    max_diagnostics: Option<usize>,
    world: Option<PathBuf>,
    save: Option<PathBuf>,
    check_only: bool,
    print: bool,
    quiet: bool,
    show_help: bool,
    show_version: bool,
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();

    match run(args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("\x1b[31mError: {e}\x1b[0m");
            ExitCode::FAILURE
        }
    }
}

fn option_value(args: &[String], i: &mut usize, flag: &str) -> Result<String, String> {
    *i += 1;
    args.get(*i)
        .cloned()
        .ok_or_else(|| format!("{flag} requires a value"))
}

fn parse_args(args: Vec<String>) -> Result<CliConfig, Box<dyn std::error::Error>> {
    let mut config = CliConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => config.show_help = true,
            "-V" | "--version" => config.show_version = true,
            "-c" | "--check" => config.check_only = true,
            "-p" | "--print" => config.print = true,
            "-q" | "--quiet" => config.quiet = true,
            "--data" => config.data_dir = Some(option_value(&args, &mut i, "--data")?.into()),
            "--project" => config.project_name = Some(option_value(&args, &mut i, "--project")?),
            "--extension" => config.extension = Some(option_value(&args, &mut i, "--extension")?),
            "--max-diagnostics" => {
                let value = option_value(&args, &mut i, "--max-diagnostics")?;
                let max = value
                    .parse()
                    .map_err(|_| format!("--max-diagnostics expects a number, got '{value}'"))?;
                config.max_diagnostics = Some(max);
            }
            "--world" => config.world = Some(option_value(&args, &mut i, "--world")?.into()),
            "--save" => config.save = Some(option_value(&args, &mut i, "--save")?.into()),
            arg => return Err(format!("unknown option: {arg}").into()),
        }
        i += 1;
    }

    if config.check_only && config.save.is_some() {
        return Err("--save cannot be combined with --check".into());
    }

    Ok(config)
}

fn run(args: Vec<String>) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let config = parse_args(args)?;

    if config.show_help {
        print_help();
        return Ok(ExitCode::SUCCESS);
    }

    if config.show_version {
        println!("formcfg {}", env!("CARGO_PKG_VERSION"));
        return Ok(ExitCode::SUCCESS);
    }

    let mut loader = LoaderConfig::default().with_diagnostics_to_stderr(!config.quiet);
    if let Some(data_dir) = config.data_dir {
        loader.data_dir = data_dir;
    }
    if let Some(project_name) = config.project_name {
        loader = loader.with_project_name(project_name);
    }
    if let Some(extension) = config.extension {
        loader = loader.with_extension(extension);
    }
    if let Some(max) = config.max_diagnostics {
        loader = loader.with_max_diagnostics(max);
    }

    let mut store = match &config.world {
        Some(path) => load_from_file(path)?,
        None => FormStore::new(),
    };

    let mut session = Session::new(loader);
    session.read_all();

    if config.print {
        for file in session.files() {
            println!("# {}", file.path.display());
            print!("{}", file.patches.pretty());
            println!();
        }
    }

    if !config.check_only {
        session.apply_all(&mut store);
        if let Some(path) = &config.save {
            save_to_file(&store, path)?;
        }
    }

    let summary = session.summary();
    if !config.quiet {
        print_summary(&summary);
    }

    if summary.warnings + summary.errors + summary.critical > 0 && config.check_only {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

fn print_summary(summary: &SessionSummary) {
    eprintln!(
        "{} file(s), {} statement(s): {} warning(s), {} error(s), {} critical",
        summary.files, summary.statements, summary.warnings, summary.errors, summary.critical
    );
}

fn print_help() {
    println!(
        "\x1b[1mformcfg\x1b[0m - Conditional record patcher

\x1b[1mUSAGE:\x1b[0m
    formcfg [OPTIONS]

\x1b[1mOPTIONS:\x1b[0m
    -h, --help         Print help information
    -V, --version      Print version information
    --data DIR         Data directory (default: Data)
    --project NAME     Project directory under the data directory (default: formcfg)
    --extension EXT    Configuration file extension (default: cfg)
    --max-diagnostics N
                       Diagnostics kept in memory (default: 10000)
    --world FILE       Form store snapshot to patch (default: empty store)
    --save FILE        Save the patched store to a snapshot
    -c, --check        Parse only; exit with failure if anything was logged
    -p, --print        Print every parsed file back as configuration syntax
    -q, --quiet        Do not echo diagnostics or the summary

\x1b[1mLAYOUT:\x1b[0m
    <data>/<project>/Keyword/**/*.cfg   Keyword patches (read and applied first)
    <data>/<project>/Armor/**/*.cfg     Armor patches

\x1b[1mEXAMPLES:\x1b[0m
    formcfg --check --data Data                      Validate every file
    formcfg --world skyrim.msgpack --save out.msgpack Patch a snapshot"
    );
}
