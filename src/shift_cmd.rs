//! Shift command: time-of-day offset between two days' purge schedules.

use anyhow::{Context, Result};
use tracing::{debug, info_span};

use metqc_continuity::compute_shift;
use metqc_interval::delta_seconds;

use crate::cli::ShiftArgs;
use crate::config::MetqcConfig;
use crate::convert;
use crate::pipeline;

/// Prints the shift in seconds from `file_a`'s leading purge to `file_b`'s.
pub fn run(args: ShiftArgs) -> Result<()> {
    let _cmd = info_span!("shift").entered();

    let config = MetqcConfig::load(args.config.as_deref())?;
    let settings = convert::build_settings(&config)?;

    let a = pipeline::read_purge_intervals(&args.file_a, &settings)?;
    let b = pipeline::read_purge_intervals(&args.file_b, &settings)?;
    debug!(n_a = a.len(), n_b = b.len(), "purge intervals loaded");

    let shift = compute_shift(&a, &b).with_context(|| {
        format!(
            "cannot compute shift between {} and {}",
            args.file_a.display(),
            args.file_b.display()
        )
    })?;
    println!("{}", delta_seconds(shift));
    Ok(())
}
