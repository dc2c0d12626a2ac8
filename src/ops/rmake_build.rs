//! Implementation of `rmake`: two configure-and-build passes.
//!
//! The native pass runs first, then the alternate pass. Each pass wipes its
//! build subdirectory, configures into it and builds it. The first failing
//! command ends the run; nothing after it is attempted.

use anyhow::{Context, Result};

use crate::builder::context::BuildContext;
use crate::builder::pass::{BuildPass, ToolchainMode};
use crate::util::fs::recreate_dir;
use crate::util::process::CommandRunner;

/// Run both passes and return the exit code of the last build command.
pub fn build(ctx: &BuildContext, runner: &mut dyn CommandRunner) -> Result<i32> {
    tracing::info!("Build source path: {}", ctx.source_path());

    let mut exit_code = 0;
    for mode in ToolchainMode::ALL {
        exit_code = run_pass(ctx, mode, runner)?;
    }

    Ok(exit_code)
}

/// Plan, prepare, configure and build a single pass.
fn run_pass(
    ctx: &BuildContext,
    mode: ToolchainMode,
    runner: &mut dyn CommandRunner,
) -> Result<i32> {
    let pass = BuildPass::plan(
        mode,
        &ctx.source_dir,
        &ctx.config,
        &ctx.env,
        ctx.host.as_ref(),
    );
    tracing::debug!("{} pass options: {:?}", mode, pass.options);

    recreate_dir(&pass.configure_path, ctx.host.as_ref(), runner)
        .with_context(|| format!("failed to prepare {} build directory", mode))?;

    runner.run(&pass.configure_command())?;
    runner.run(&pass.build_command())
}
