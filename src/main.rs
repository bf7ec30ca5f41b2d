use anyhow::{Context, Result};
use clap::Parser;

use gitlab_changelog::cli::{Args, ReleaseOrchestrator};
use gitlab_changelog::config::{self, Config};
use gitlab_changelog::domain::ReleaseContext;
use gitlab_changelog::git::SystemGit;
use gitlab_changelog::remote::HttpGateway;
use gitlab_changelog::{logging, ui};

fn main() -> Result<()> {
    let args = Args::parse();

    let config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_failure(&e);
            std::process::exit(1);
        }
    };

    logging::init_logging(&config.logging.level, args.verbose)
        .context("Failed to set up logging")?;

    let dry_run = args.dry_run;
    let ctx = args.into_context();
    tracing::debug!(?ctx, dry_run, "Starting release");

    if let Err(e) = release(&config, &ctx, dry_run) {
        ui::display_failure(&e);
        std::process::exit(1);
    }

    Ok(())
}

fn release(config: &Config, ctx: &ReleaseContext, dry_run: bool) -> gitlab_changelog::Result<()> {
    let gateway = HttpGateway::new(&ctx.remote_endpoint, &ctx.credential, &config.remote)?;
    let repository = SystemGit::open(".")?;
    let orchestrator = ReleaseOrchestrator::new(config, &gateway, &repository);

    if dry_run {
        let plan = orchestrator.dry_run(ctx)?;
        ui::display_plan(&plan);
        return Ok(());
    }

    ui::display_status(&format!(
        "Releasing commit {} on branch '{}'",
        ctx.commit_sha, ctx.target_branch
    ));
    let outcome = orchestrator.run(ctx)?;
    ui::display_outcome(&outcome);
    Ok(())
}
