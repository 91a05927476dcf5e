use std::process::ExitCode;

use clap::Parser;
use releaser::cli::{Cli, run};

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let _guard = releaser::logging::init(cli.verbosity, cli.log_json, cli.log_path().as_deref())?;

    let all_ok = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(run(cli))?;

    Ok(if all_ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
