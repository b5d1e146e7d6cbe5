use std::time::{Duration, Instant};

use crate::HarnessError;

/// When setup has to re-run relative to timed repetitions. Mutating
/// operations need a fresh baseline before every repetition; read-only
/// operations set up once.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SetupPolicy {
    Once,
    EveryRepetition,
}

/// Timing knobs. The defaults favor stable numbers; `quick()` keeps test
/// runs fast.
#[derive(Clone, Copy, Debug)]
pub struct MeasureConfig {
    pub warmup_reps: u32,
    pub min_reps: u32,
    pub min_duration: Duration,
}

impl Default for MeasureConfig {
    fn default() -> Self {
        MeasureConfig {
            warmup_reps: 3,
            min_reps: 10,
            min_duration: Duration::from_millis(200),
        }
    }
}

impl MeasureConfig {
    pub fn quick() -> Self {
        MeasureConfig {
            warmup_reps: 1,
            min_reps: 2,
            min_duration: Duration::from_millis(1),
        }
    }
}

pub type StepFn = Box<dyn FnMut() -> Result<(), HarnessError>>;

/// Runs `measured` under timed repetition and returns its throughput in
/// executions per second. Setup time is never part of the timed window, and
/// the final repetition is not followed by a setup, so post-run validation
/// observes the state one measured run leaves behind.
pub fn measure_throughput(
    cfg: &MeasureConfig,
    policy: SetupPolicy,
    prepare: &mut StepFn,
    measured: &mut StepFn,
) -> Result<f64, HarnessError> {
    prepare()?;
    for _ in 0..cfg.warmup_reps {
        measured()?;
        if policy == SetupPolicy::EveryRepetition {
            prepare()?;
        }
    }
    let mut reps: u32 = 0;
    let mut elapsed = Duration::ZERO;
    loop {
        let start = Instant::now();
        measured()?;
        elapsed += start.elapsed();
        reps += 1;
        if reps >= cfg.min_reps && elapsed >= cfg.min_duration {
            break;
        }
        if policy == SetupPolicy::EveryRepetition {
            prepare()?;
        }
    }

    let secs = elapsed.as_secs_f64();
    if secs <= 0.0 {
        return Err(HarnessError::measurement(
            "timed window collapsed to zero, clock resolution too coarse",
        ));
    }
    Ok(f64::from(reps) / secs)
}
