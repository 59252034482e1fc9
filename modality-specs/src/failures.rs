//! Expected failures tracking via TOML file.
//!
//! ```toml
//! [[known]]
//! fixture = "paragraphs/mixed.toml"
//! case = "sarcasm"
//! reason = "Keyword matching cannot see irony"
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::errors::{SpecError, SpecResult};

/// Loaded expected failures configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExpectedFailures {
    /// Known limitations of the rule tables.
    #[serde(default)]
    pub known: Vec<FailureEntry>,
    /// Failures awaiting a rule or threshold change.
    #[serde(default)]
    pub pending: Vec<FailureEntry>,
}

/// A single expected failure entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailureEntry {
    /// Fixture path relative to the fixtures directory.
    pub fixture: String,
    /// Case name within the fixture.
    pub case: String,
    #[serde(default)]
    pub reason: Option<String>,
    /// Date added (YYYY-MM-DD).
    #[serde(default)]
    pub added: Option<String>,
}

/// How a failing case is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureState {
    Known,
    Pending,
    /// Expected to pass; the failure is a regression.
    Regression,
}

impl ExpectedFailures {
    /// Load from a TOML file. A missing file means no expected failures.
    pub fn load(path: &Path) -> SpecResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| SpecError::Load {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        toml::from_str(&content).map_err(|e| SpecError::Load {
            path: path.display().to_string(),
            message: e.message().to_string(),
        })
    }

    pub fn state(&self, fixture: &str, case: &str) -> FailureState {
        let matches = |e: &&FailureEntry| e.fixture == fixture && e.case == case;
        if self.known.iter().any(|e| matches(&e)) {
            FailureState::Known
        } else if self.pending.iter().any(|e| matches(&e)) {
            FailureState::Pending
        } else {
            FailureState::Regression
        }
    }

    pub fn count(&self) -> usize {
        self.known.len() + self.pending.len()
    }

    pub fn get_entry(&self, fixture: &str, case: &str) -> Option<&FailureEntry> {
        self.known
            .iter()
            .chain(self.pending.iter())
            .find(|e| e.fixture == fixture && e.case == case)
    }
}

/// Tally of a harness run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HarnessResult {
    pub total: usize,
    pub passed: usize,
    /// Failures listed as known or pending.
    pub expected_failures: usize,
    pub regressions: usize,
    /// Expected failures that now pass; the entry can be removed.
    pub unexpected_passes: usize,
}

impl HarnessResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// 0 when there are no regressions, 1 otherwise.
    pub fn exit_code(&self) -> i32 {
        if self.success() {
            0
        } else {
            1
        }
    }

    pub fn success(&self) -> bool {
        self.regressions == 0
    }

    pub fn record_pass(&mut self, state: FailureState) {
        self.total += 1;
        self.passed += 1;
        if state != FailureState::Regression {
            self.unexpected_passes += 1;
        }
    }

    pub fn record_failure(&mut self, state: FailureState) {
        self.total += 1;
        match state {
            FailureState::Known | FailureState::Pending => self.expected_failures += 1,
            FailureState::Regression => self.regressions += 1,
        }
    }

    pub fn merge(&mut self, other: &HarnessResult) {
        self.total += other.total;
        self.passed += other.passed;
        self.expected_failures += other.expected_failures;
        self.regressions += other.regressions;
        self.unexpected_passes += other.unexpected_passes;
    }
}
