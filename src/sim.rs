//! Running a sequence of branch records through a predictor.

use tracing::trace;

use crate::branch::*;
use crate::dispatch::Dispatcher;
use crate::error::TraceError;
use crate::stats::BranchStats;

/// Evaluate the active predictor against a sequence of records.
///
/// Every conditional branch is predicted before its outcome is revealed to
/// the predictor. Every record is then handed to [Dispatcher::train], which
/// ignores unconditional control flow.
pub fn evaluate<'a>(
    bp: &mut Dispatcher,
    records: impl IntoIterator<Item = &'a BranchRecord>
) -> BranchStats
{
    let mut stat = BranchStats::new();
    for record in records {
        step(bp, &mut stat, record);
    }
    stat
}

/// Like [evaluate], but reading records from a fallible source such as a
/// [TraceReader](crate::trace::TraceReader). Stops at the first error.
pub fn evaluate_trace(
    bp: &mut Dispatcher,
    records: impl IntoIterator<Item = Result<BranchRecord, TraceError>>
) -> Result<BranchStats, TraceError>
{
    let mut stat = BranchStats::new();
    for record in records {
        step(bp, &mut stat, &record?);
    }
    Ok(stat)
}

fn step(bp: &mut Dispatcher, stat: &mut BranchStats, record: &BranchRecord) {
    if record.is_conditional() {
        let prediction = bp.predict(record.pc);
        if prediction != record.outcome {
            trace!(pc = record.pc, ?prediction, "misprediction");
        }
        stat.update(record, prediction);
    }
    bp.train(record);
}
