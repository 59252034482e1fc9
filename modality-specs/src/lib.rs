//! Fixture-driven regression testing for alethic-modality.
//!
//! Cases are written declaratively in TOML fixture files: an input text and
//! the classification, sentence count and aggregate scores analyzing it
//! should produce. The runner analyzes each case and reports every
//! expectation that does not hold.
//!
//! ## Modules
//!
//! - [`fixture`] - Fixture file format and parsing
//! - [`loader`] - Loading fixture files and directories
//! - [`runner`] - Running fixtures through an engine
//! - [`failures`] - Expected failures tracking via TOML
//! - [`formatter`] - Failure and summary reports
//! - [`errors`] - Error types

pub mod errors;
pub mod failures;
pub mod fixture;
pub mod formatter;
pub mod loader;
pub mod runner;

pub use errors::{SpecError, SpecResult};
pub use failures::{ExpectedFailures, FailureEntry, FailureState, HarnessResult};
pub use fixture::{parse_fixture, FixtureCase, ModalityFixture, DEFAULT_TOLERANCE};
pub use formatter::{format_failure, format_summary};
pub use loader::{load_all_fixtures, load_fixture};
pub use runner::{check_case, run_all, run_fixture, CaseOutcome, CaseReport, FixtureReport, Mismatch};
