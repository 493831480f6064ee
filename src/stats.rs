use crate::session::TestState;

/// Characters per word in all WPM figures.
pub const CHARS_PER_WORD: f64 = 5.0;

/// Statistics derived from a test state. Never stored on the state itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stats {
    pub net_wpm: f64,
    pub raw_wpm: f64,
    pub accuracy: f64,
    pub consistency: f64,
    pub elapsed_secs: f64,
    pub correct_chars: usize,
    pub incorrect_chars: usize,
}

impl Stats {
    pub fn from_state(state: &TestState) -> Self {
        Self {
            net_wpm: net_wpm(state.correct_chars, state.elapsed_secs),
            raw_wpm: raw_wpm(
                state.correct_chars,
                state.incorrect_chars,
                state.elapsed_secs,
            ),
            accuracy: accuracy(state.correct_chars, state.incorrect_chars),
            consistency: consistency(&state.wpm_samples),
            elapsed_secs: state.elapsed_secs,
            correct_chars: state.correct_chars,
            incorrect_chars: state.incorrect_chars,
        }
    }
}

fn per_minute(chars: usize, elapsed_secs: f64) -> f64 {
    if elapsed_secs <= 0.0 {
        return 0.0;
    }
    (chars as f64 / CHARS_PER_WORD) / (elapsed_secs / 60.0)
}

pub fn net_wpm(correct: usize, elapsed_secs: f64) -> f64 {
    per_minute(correct, elapsed_secs)
}

pub fn raw_wpm(correct: usize, incorrect: usize, elapsed_secs: f64) -> f64 {
    per_minute(correct + incorrect, elapsed_secs)
}

/// Percentage of correct characters; 100 before anything was typed.
pub fn accuracy(correct: usize, incorrect: usize) -> f64 {
    let total = correct + incorrect;
    if total == 0 {
        return 100.0;
    }
    correct as f64 / total as f64 * 100.0
}

/// 100 minus the coefficient of variation of the samples, in percent,
/// floored at zero. Zero without samples or with a zero mean.
pub fn consistency(samples: &[f64]) -> f64 {
    let Some(avg) = mean(samples) else {
        return 0.0;
    };
    if avg == 0.0 {
        return 0.0;
    }
    if samples.len() == 1 {
        return 100.0;
    }

    let deviation = std_dev(samples).unwrap_or(0.0);
    (100.0 - deviation / avg * 100.0).max(0.0)
}

pub fn mean(data: &[f64]) -> Option<f64> {
    if data.is_empty() {
        return None;
    }
    Some(data.iter().sum::<f64>() / data.len() as f64)
}

/// Population standard deviation.
pub fn std_dev(data: &[f64]) -> Option<f64> {
    let avg = mean(data)?;
    let variance = data
        .iter()
        .map(|value| {
            let diff = avg - *value;
            diff * diff
        })
        .sum::<f64>()
        / data.len() as f64;

    Some(variance.sqrt())
}

/// A WPM sample placed on the time axis, in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeSeriesPoint {
    pub t: f64,
    pub wpm: f64,
}

impl TimeSeriesPoint {
    pub fn new(t: f64, wpm: f64) -> Self {
        Self { t, wpm }
    }
}

impl From<TimeSeriesPoint> for (f64, f64) {
    fn from(p: TimeSeriesPoint) -> Self {
        (p.t, p.wpm)
    }
}

/// One point per sample, at whole seconds starting from 1.
pub fn wpm_series(samples: &[f64]) -> Vec<TimeSeriesPoint> {
    samples
        .iter()
        .enumerate()
        .map(|(i, wpm)| TimeSeriesPoint::new((i + 1) as f64, *wpm))
        .collect()
}
