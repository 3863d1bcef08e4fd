use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use sweep_build::BuildOptions;
use sweep_manifest::SweepToml;

use super::UnwrapOrExit;
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct BuildCommand {
    /// Path to sweep.toml (defaults to ./sweep.toml)
    #[arg(short, long, default_value = "sweep.toml")]
    pub config: PathBuf,

    /// Preview what would be written without writing
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Rewrite outputs even when they look up to date
    #[arg(short, long)]
    pub force: bool,
}

impl BuildCommand {
    pub fn run(&self) -> Result<()> {
        let sweep_toml = SweepToml::open(&self.config).unwrap_or_exit();
        tracing::debug!("building with {}", sweep_toml.path().display());

        let report = ops::build(
            sweep_toml.paths(),
            BuildOptions {
                dry_run: self.dry_run,
                force: self.force,
            },
        )?;

        report.render(&mut TerminalOutput::new());
        Ok(())
    }
}
