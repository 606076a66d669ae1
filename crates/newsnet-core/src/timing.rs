//! Opt-in stage timing for batch runs.
//!
//! Each pipeline step is wrapped in [`timed`]. When timing is enabled the
//! elapsed time is recorded per step name; [`collect_report`] drains the
//! samples into a [`TimingReport`] that the binary prints to stderr.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use serde_json::json;

/// Aggregated timings across recorded steps, ordered by step name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimingReport {
    pub steps: Vec<StepTiming>,
}

/// Totals for one named step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepTiming {
    pub name: String,
    pub count: usize,
    pub total: Duration,
    pub max: Duration,
}

thread_local! {
    static SAMPLES: RefCell<Vec<(String, Duration)>> = const { RefCell::new(Vec::new()) };
}

static TIMING_ENABLED: AtomicBool = AtomicBool::new(false);

/// Returns true when `NEWSNET_TIMING` is set to `1`, `true`, `yes` or `on`.
#[must_use]
pub fn timing_enabled_from_env() -> bool {
    std::env::var("NEWSNET_TIMING")
        .ok()
        .is_some_and(|value| is_truthy(&value))
}

pub fn set_timing_enabled(enabled: bool) {
    TIMING_ENABLED.store(enabled, Ordering::Relaxed);
    if !enabled {
        clear_timings();
    }
}

#[must_use]
pub fn is_timing_enabled() -> bool {
    TIMING_ENABLED.load(Ordering::Relaxed)
}

pub fn clear_timings() {
    SAMPLES.with(|samples| samples.borrow_mut().clear());
}

/// Run `f`, recording its duration under `name` when timing is enabled.
pub fn timed<R>(name: &str, f: impl FnOnce() -> R) -> R {
    if !is_timing_enabled() {
        return f();
    }

    let started = Instant::now();
    let result = f();
    let elapsed = started.elapsed();
    SAMPLES.with(|samples| samples.borrow_mut().push((name.to_string(), elapsed)));
    result
}

/// Drain this thread's samples into a report.
#[must_use]
pub fn collect_report() -> TimingReport {
    let samples = SAMPLES.with(|samples| std::mem::take(&mut *samples.borrow_mut()));

    let mut grouped: BTreeMap<String, StepTiming> = BTreeMap::new();
    for (name, elapsed) in samples {
        let step = grouped.entry(name.clone()).or_insert_with(|| StepTiming {
            name,
            count: 0,
            total: Duration::ZERO,
            max: Duration::ZERO,
        });
        step.count += 1;
        step.total += elapsed;
        step.max = step.max.max(elapsed);
    }

    TimingReport {
        steps: grouped.into_values().collect(),
    }
}

impl TimingReport {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        let steps = self
            .steps
            .iter()
            .map(|s| {
                json!({
                    "name": s.name,
                    "count": s.count,
                    "total_us": s.total.as_micros(),
                    "max_us": s.max.as_micros(),
                })
            })
            .collect::<Vec<_>>();

        json!({ "steps": steps })
    }

    /// Fixed-width table for terminal output.
    #[must_use]
    pub fn display_table(&self) -> String {
        if self.steps.is_empty() {
            return "No timing samples recorded.".to_string();
        }

        let mut out = String::new();
        out.push_str("step                         count      total        max\n");
        out.push_str("--------------------------------------------------------\n");
        for step in &self.steps {
            let _ = writeln!(
                out,
                "{:<28} {:>6} {:>10} {:>10}",
                step.name,
                step.count,
                format_duration(step.total),
                format_duration(step.max)
            );
        }
        out
    }
}

fn format_duration(duration: Duration) -> String {
    let micros = duration.as_micros();
    if micros >= 1_000_000 {
        format!("{}.{:03}s", micros / 1_000_000, (micros % 1_000_000) / 1_000)
    } else if micros >= 1_000 {
        format!("{}.{:03}ms", micros / 1_000, micros % 1_000)
    } else {
        format!("{micros}µs")
    }
}

fn is_truthy(value: &str) -> bool {
    ["1", "true", "yes", "on"]
        .iter()
        .any(|t| value.eq_ignore_ascii_case(t))
}
