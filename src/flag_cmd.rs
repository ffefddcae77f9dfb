//! Flag command: detect, confirm and write the QC flags of one day file.

use anyhow::Result;
use tracing::{info, info_span};

use crate::cli::FlagArgs;
use crate::config::MetqcConfig;
use crate::convert;
use crate::pipeline::{self, DayInputs};

/// Run the flagging pipeline on a single file.
pub fn run(args: FlagArgs) -> Result<()> {
    let _cmd = info_span!("flag", file = %args.file.display()).entered();

    // 1. Load config and build crate configs
    let config = MetqcConfig::load(args.common.config.as_deref())?;
    let settings = convert::build_settings(&config)?;

    // 2. Parse manual intervals and shift override
    let manual = args
        .intervals
        .iter()
        .map(|s| convert::parse_interval(s))
        .collect::<Result<Vec<_>>>()?;
    let shift = args.shift.map(convert::parse_shift_seconds).transpose()?;

    // 3. Previous day's purges
    let previous = match &args.previous_file {
        Some(path) => {
            let intervals = pipeline::read_purge_intervals(path, &settings)?;
            info!(path = %path.display(), n = intervals.len(), "previous day purges");
            Some(intervals)
        }
        None => None,
    };

    // 4. Correction files
    let corrections = pipeline::read_corrections(
        args.common.corr_file_temperature.as_deref(),
        args.common.corr_file_rh.as_deref(),
    )?;

    // 5. Flag and write
    let inputs = DayInputs {
        previous: previous.as_deref(),
        shift,
        manual: &manual,
        corrections: &corrections,
        clear: args.common.clear,
    };
    pipeline::flag_file(&args.file, &inputs, &settings, args.dry_run)?;
    Ok(())
}
