use std::time::Instant;

use crate::error::{EngineError, EngineResult};
use crate::typing_policy::CommitPolicy;

pub const DEFAULT_LOW_WATER_MARK: usize = 10;
pub const DEFAULT_BATCH_SIZE: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestMode {
    /// finish after this many words are committed
    FixedWordCount { words: usize },
    /// finish once this many seconds have elapsed
    FixedDuration { seconds: u64 },
}

/// Word-list top-up policy for timed tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Replenish {
    pub low_water_mark: usize,
    pub batch_size: usize,
}

impl Default for Replenish {
    fn default() -> Self {
        Self {
            low_water_mark: DEFAULT_LOW_WATER_MARK,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

/// Settings for one run. Only constructible through validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TestConfig {
    mode: TestMode,
    include_symbols: bool,
    policy: CommitPolicy,
    replenish: Replenish,
}

impl TestConfig {
    pub fn new(
        mode: TestMode,
        include_symbols: bool,
        policy: CommitPolicy,
        replenish: Replenish,
    ) -> EngineResult<Self> {
        match mode {
            TestMode::FixedWordCount { words: 0 } => {
                return Err(EngineError::InvalidConfig(
                    "word target must be greater than zero".into(),
                ))
            }
            TestMode::FixedDuration { seconds: 0 } => {
                return Err(EngineError::InvalidConfig(
                    "duration must be greater than zero".into(),
                ))
            }
            _ => {}
        }
        if replenish.low_water_mark == 0 {
            return Err(EngineError::InvalidConfig(
                "low water mark must be greater than zero".into(),
            ));
        }
        if replenish.batch_size < replenish.low_water_mark {
            return Err(EngineError::InvalidConfig(format!(
                "batch size {} is below the low water mark {}",
                replenish.batch_size, replenish.low_water_mark
            )));
        }

        Ok(Self {
            mode,
            include_symbols,
            policy,
            replenish,
        })
    }

    pub fn words(word_target: usize) -> EngineResult<Self> {
        Self::new(
            TestMode::FixedWordCount { words: word_target },
            false,
            CommitPolicy::default(),
            Replenish::default(),
        )
    }

    pub fn timed(seconds: u64) -> EngineResult<Self> {
        Self::new(
            TestMode::FixedDuration { seconds },
            false,
            CommitPolicy::default(),
            Replenish::default(),
        )
    }

    pub fn with_symbols(self, include_symbols: bool) -> Self {
        Self {
            include_symbols,
            ..self
        }
    }

    pub fn with_policy(self, policy: CommitPolicy) -> Self {
        Self { policy, ..self }
    }

    pub fn mode(&self) -> TestMode {
        self.mode
    }

    pub fn include_symbols(&self) -> bool {
        self.include_symbols
    }

    pub fn policy(&self) -> CommitPolicy {
        self.policy
    }

    pub fn replenish(&self) -> Replenish {
        self.replenish
    }

    pub fn word_target(&self) -> Option<usize> {
        match self.mode {
            TestMode::FixedWordCount { words } => Some(words),
            TestMode::FixedDuration { .. } => None,
        }
    }

    pub fn duration_secs(&self) -> Option<u64> {
        match self.mode {
            TestMode::FixedDuration { seconds } => Some(seconds),
            TestMode::FixedWordCount { .. } => None,
        }
    }

    /// Number of words drawn when a run is (re)initialised.
    pub fn initial_word_count(&self) -> usize {
        match self.mode {
            TestMode::FixedWordCount { words } => words,
            TestMode::FixedDuration { .. } => self.replenish.batch_size,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum Status {
    Idle,
    Running,
    Finished,
}

/// Mutable state of one run, owned by the typing test.
#[derive(Debug, Clone)]
pub struct TestState {
    pub status: Status,
    pub words: Vec<String>,
    pub active_index: usize,
    pub current_input: String,
    pub started_at: Option<Instant>,
    pub elapsed_secs: f64,
    pub correct_chars: usize,
    pub incorrect_chars: usize,
    pub wpm_samples: Vec<f64>,
}

impl TestState {
    pub fn new(words: Vec<String>) -> Self {
        Self {
            status: Status::Idle,
            words,
            active_index: 0,
            current_input: String::new(),
            started_at: None,
            elapsed_secs: 0.0,
            correct_chars: 0,
            incorrect_chars: 0,
            wpm_samples: Vec::new(),
        }
    }

    pub fn active_word(&self) -> Option<&str> {
        self.words.get(self.active_index).map(String::as_str)
    }

    pub fn remaining_words(&self) -> usize {
        self.words.len().saturating_sub(self.active_index)
    }

    /// Seconds since the start as seen at `now`; zero before the start.
    pub fn elapsed_at(&self, now: Instant) -> f64 {
        self.started_at
            .map(|start| now.saturating_duration_since(start).as_secs_f64())
            .unwrap_or(0.0)
    }
}
