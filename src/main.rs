use anyhow::{Context, Result, bail};
use clap::Parser;
use csvtk::cli::{Cli, Command};
use csvtk::commands::{dim, pretty};
use csvtk::io::glob::resolve_inputs;
use csvtk::io::output::open_output;
use csvtk::logging;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.global.verbose);
    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<ExitCode> {
    let config = cli.global.to_config().context("invalid flags")?;
    let list = cli.global.infile_list.as_deref();

    match &cli.command {
        Command::Dim(args) => {
            let files = resolve_inputs(&args.files, list)?;
            let mut out = open_output(&cli.global.out_file)?;
            let summary = dim::run(&files, &config, &args.options(), &mut out)?;
            if summary.failed > 0 {
                tracing::error!("{} of {} files failed", summary.failed, summary.files);
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Pretty(args) => {
            let files = resolve_inputs(&args.files, list)?;
            let [file] = files.as_slice() else {
                bail!("no more than one file should be given");
            };
            let mut out = open_output(&cli.global.out_file)?;
            pretty::run(file, &config, &args.options(), &mut out)?;
        }
    }
    Ok(ExitCode::SUCCESS)
}
