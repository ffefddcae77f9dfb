//! Batch command: flag consecutive day files in calendar order.

use anyhow::Result;
use chrono::NaiveDate;
use tracing::{info, info_span, warn};

use metqc_interval::Interval;

use crate::cli::BatchArgs;
use crate::config::MetqcConfig;
use crate::convert;
use crate::pipeline::{self, DayInputs};

/// Flags each file in turn, feeding its confirmed purges to the next one.
pub fn run(args: BatchArgs) -> Result<()> {
    let _cmd = info_span!("batch", n_files = args.files.len()).entered();

    // 1. Load config and corrections once
    let config = MetqcConfig::load(args.common.config.as_deref())?;
    let settings = convert::build_settings(&config)?;
    let corrections = pipeline::read_corrections(
        args.common.corr_file_temperature.as_deref(),
        args.common.corr_file_rh.as_deref(),
    )?;

    // 2. Walk the days, chaining each day's purges into the next
    let mut previous: Option<Vec<Interval>> = None;
    let mut last_day: Option<NaiveDate> = None;
    for path in &args.files {
        let inputs = DayInputs {
            previous: previous.as_deref(),
            corrections: &corrections,
            clear: args.common.clear,
            ..DayInputs::default()
        };
        let outcome = pipeline::flag_file(path, &inputs, &settings, false)?;

        if let (Some(prev), Some(day)) = (last_day, outcome.day)
            && day.pred_opt() != Some(prev)
        {
            warn!(%prev, %day, "day files are not consecutive");
        }
        last_day = outcome.day.or(last_day);
        previous = Some(outcome.resolution.intervals);
    }

    info!(n_files = args.files.len(), "batch complete");
    Ok(())
}
