//! Rule tables and logical pattern matching.
//!
//! [`RuleTables`] holds the compiled rule tables. They are built once and
//! then only read, so one instance can back any number of concurrent
//! analyses. [`PatternMatcher`] answers two questions about a lower-cased
//! sentence: is it a logical/definitional truth, and is it a
//! self-contradiction.

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use std::sync::Arc;

use crate::config::{RuleConfig, Thresholds};
use crate::errors::{ModalityError, ModalityResult};

static DEFAULT_RULES: Lazy<Arc<RuleTables>> = Lazy::new(|| {
    Arc::new(
        RuleTables::from_config(&RuleConfig::default()).expect("Invalid built-in rule table"),
    )
});

/// Which table produced a [`RuleMatch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    /// `<number> <operator> <number> = <number>`
    Arithmetic,
    /// An entry of the necessity table.
    Necessity,
    /// An entry of the impossibility table.
    Impossibility,
}

/// A rule that fired, with the score it assigns.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleMatch {
    pub kind: RuleKind,
    pub pattern: String,
    pub score: f64,
}

#[derive(Debug, Clone)]
struct CompiledRule {
    pattern: String,
    regex: Regex,
}

impl CompiledRule {
    fn compile(table: &'static str, pattern: &str) -> ModalityResult<Self> {
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map_err(|e| ModalityError::Pattern {
                table,
                pattern: pattern.to_string(),
                message: e.to_string(),
            })?;
        Ok(Self {
            pattern: pattern.to_string(),
            regex,
        })
    }
}

/// Substring keyword lists for the contingent cascade.
#[derive(Debug, Clone, PartialEq)]
pub struct KeywordTables {
    pub epistemic: Vec<String>,
    pub deontic: Vec<String>,
    pub possibility: Vec<String>,
    pub empirical: Vec<String>,
}

/// Find the first keyword contained in `sentence`.
pub(crate) fn find_keyword<'k>(keywords: &'k [String], sentence: &str) -> Option<&'k str> {
    keywords
        .iter()
        .find(|k| sentence.contains(k.as_str()))
        .map(String::as_str)
}

fn lowercased(items: &[String]) -> Vec<String> {
    items.iter().map(|s| s.to_lowercase()).collect()
}

/// Compiled, read-only rule tables.
#[derive(Debug, Clone)]
pub struct RuleTables {
    arithmetic: CompiledRule,
    necessity: Vec<CompiledRule>,
    impossibility: Vec<CompiledRule>,
    exclusions: Vec<String>,
    keywords: KeywordTables,
}

impl RuleTables {
    /// Compile rule tables from configuration.
    pub fn from_config(config: &RuleConfig) -> ModalityResult<Self> {
        let arithmetic = CompiledRule::compile("arithmetic", &config.arithmetic_pattern)?;
        let necessity = config
            .necessity_patterns
            .iter()
            .map(|p| CompiledRule::compile("necessity", p))
            .collect::<ModalityResult<Vec<_>>>()?;
        let impossibility = config
            .impossibility_patterns
            .iter()
            .map(|p| CompiledRule::compile("impossibility", p))
            .collect::<ModalityResult<Vec<_>>>()?;

        Ok(Self {
            arithmetic,
            necessity,
            impossibility,
            exclusions: lowercased(&config.impossibility_exclusions),
            keywords: KeywordTables {
                epistemic: lowercased(&config.epistemic_keywords),
                deontic: lowercased(&config.deontic_keywords),
                possibility: lowercased(&config.possibility_keywords),
                empirical: lowercased(&config.empirical_markers),
            },
        })
    }

    /// The built-in tables, compiled once per process and shared.
    pub fn builtin() -> Arc<RuleTables> {
        Arc::clone(&DEFAULT_RULES)
    }

    pub fn keywords(&self) -> &KeywordTables {
        &self.keywords
    }

    pub(crate) fn necessity_len(&self) -> usize {
        self.necessity.len()
    }

    pub(crate) fn impossibility_len(&self) -> usize {
        self.impossibility.len()
    }
}

/// Detects logically necessary and logically impossible sentences.
///
/// Every method expects an already lower-cased sentence.
#[derive(Debug, Clone, Copy)]
pub struct PatternMatcher<'a> {
    rules: &'a RuleTables,
    thresholds: &'a Thresholds,
}

impl<'a> PatternMatcher<'a> {
    pub fn new(rules: &'a RuleTables, thresholds: &'a Thresholds) -> Self {
        Self { rules, thresholds }
    }

    /// The necessity rule that fires for this sentence, if any.
    ///
    /// The arithmetic shape is checked first and on its own; the necessity
    /// table is then scanned in order and the first match wins.
    pub fn match_necessity(&self, sentence_lower: &str) -> Option<RuleMatch> {
        if self.rules.arithmetic.regex.is_match(sentence_lower) {
            return Some(RuleMatch {
                kind: RuleKind::Arithmetic,
                pattern: self.rules.arithmetic.pattern.clone(),
                score: self.thresholds.arithmetic_score,
            });
        }

        self.rules
            .necessity
            .iter()
            .find(|rule| rule.regex.is_match(sentence_lower))
            .map(|rule| RuleMatch {
                kind: RuleKind::Necessity,
                pattern: rule.pattern.clone(),
                score: self.thresholds.necessity_rule_score,
            })
    }

    /// The impossibility rule that fires for this sentence, if any.
    ///
    /// Sentences containing an exclusion phrase talk *about* contradiction
    /// and never match.
    pub fn match_impossibility(&self, sentence_lower: &str) -> Option<RuleMatch> {
        if let Some(phrase) = find_keyword(&self.rules.exclusions, sentence_lower) {
            log::debug!("impossibility suppressed by exclusion phrase {phrase:?}");
            return None;
        }

        self.rules
            .impossibility
            .iter()
            .find(|rule| rule.regex.is_match(sentence_lower))
            .map(|rule| RuleMatch {
                kind: RuleKind::Impossibility,
                pattern: rule.pattern.clone(),
                score: self.thresholds.impossibility_rule_score,
            })
    }

    /// 95 for an arithmetic equation, 90 for a necessity-table match, else 0.
    pub fn detect_necessity(&self, sentence_lower: &str) -> f64 {
        self.match_necessity(sentence_lower)
            .map_or(0.0, |m| m.score)
    }

    /// 95 for an impossibility-table match outside the exclusions, else 0.
    pub fn detect_impossibility(&self, sentence_lower: &str) -> f64 {
        self.match_impossibility(sentence_lower)
            .map_or(0.0, |m| m.score)
    }
}
