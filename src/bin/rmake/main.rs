//! rmake CLI - configure and build the rocBLAS examples

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;

use cli::Cli;
use rmake::core::environment::detect_environment;
use rmake::core::host::host_profile;
use rmake::core::BuildConfiguration;
use rmake::ops::build;
use rmake::util::config::{load_config, project_config_path};
use rmake::util::process::{CommandFailed, SystemRunner};
use rmake::BuildContext;

fn main() {
    match run() {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("error: {:#}", e);
            // A failing tool's exit code becomes ours.
            let code = e
                .downcast_ref::<CommandFailed>()
                .and_then(|failed| failed.code)
                .unwrap_or(1);
            std::process::exit(code);
        }
    }
}

fn run() -> Result<i32> {
    // Parse CLI
    let cli = Cli::parse();

    // Set up logging
    let default_filter = if cli.verbose {
        "rmake=debug"
    } else {
        "rmake=info"
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    // Probe the host before anything else touches the filesystem
    let host = host_profile();
    let env = detect_environment(host.as_ref());

    let cwd = std::env::current_dir().context("failed to read current directory")?;

    // CLI flags override the project config file
    let file_config = load_config(&project_config_path(&cwd))?;
    let config = BuildConfiguration::new(cli.into_build_args(), &file_config.build, &cwd);

    let ctx = BuildContext::from_parts(host, env, config, &cwd);
    tracing::debug!("{:?}", ctx);

    build(&ctx, &mut SystemRunner)
}
