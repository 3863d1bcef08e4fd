use std::path::PathBuf;

use clap::Args;
use eyre::{Result, eyre};
use sweep_gc::SweepOptions;
use sweep_manifest::SweepToml;

use super::UnwrapOrExit;
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct CleanCommand {
    /// Path to sweep.toml (defaults to ./sweep.toml)
    #[arg(short, long, default_value = "sweep.toml")]
    pub config: PathBuf,

    /// Also remove files the build still produces
    #[arg(short, long)]
    pub force: bool,

    /// Preview what would be removed without removing anything
    #[arg(short = 'n', long)]
    pub dry_run: bool,
}

impl CleanCommand {
    pub fn run(&self) -> Result<()> {
        let sweep_toml = SweepToml::open(&self.config).unwrap_or_exit();

        let report = ops::clean(
            &sweep_toml,
            SweepOptions {
                force: self.force,
                dry_run: self.dry_run,
            },
        )?;

        report.render(&mut TerminalOutput::new());

        if report.has_failures() {
            return Err(eyre!(
                "{} path(s) in '{}' could not be cleaned",
                report.failures.len(),
                report.output_dir
            ));
        }
        Ok(())
    }
}
