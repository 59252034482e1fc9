use std::fmt::{self, Write};
use unicode_width::UnicodeWidthStr;

use crate::explanation::round_percent;
use crate::types::{AnalysisResult, ModalityScore};

/// Plain-text rendering of an [`AnalysisResult`].
///
/// ```text
/// You must pay rent  I think so.
/// ╰───────────────╯N 0 P 50 I 0 → Weakly Possible
///                    ╰─────────╯N 0 P 60 I 0 → Possible
/// ═ N 0 P 70 I 0 → Very Possible
/// ```
///
/// Sentences are laid out on one line; each gets an underline carrying its
/// rounded scores and label. Paragraphs and empty input end with an
/// aggregate line.
pub struct AnalysisDisplay<'a> {
    result: &'a AnalysisResult,
}

impl<'a> AnalysisDisplay<'a> {
    pub fn new(result: &'a AnalysisResult) -> Self {
        Self { result }
    }
}

fn write_scores(f: &mut fmt::Formatter<'_>, scores: &ModalityScore) -> fmt::Result {
    write!(
        f,
        "N {} P {} I {}",
        round_percent(scores.necessity),
        round_percent(scores.possibility),
        round_percent(scores.impossibility)
    )
}

impl<'a> fmt::Display for AnalysisDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const SPACE_PADDING: usize = 2;

        let results = &self.result.sentence_results;
        if !results.is_empty() {
            let mut opening_line = String::new();
            let mut columns = Vec::with_capacity(results.len());
            for (idx, result) in results.iter().enumerate() {
                if idx > 0 {
                    opening_line.extend(std::iter::repeat(' ').take(SPACE_PADDING));
                }
                let start = UnicodeWidthStr::width(&*opening_line);
                opening_line.push_str(&result.sentence);
                columns.push((start, UnicodeWidthStr::width(&*opening_line)));
            }
            f.write_str(&opening_line)?;

            for (result, (start, end)) in results.iter().zip(columns) {
                f.write_char('\n')?;
                for _ in 0..start {
                    f.write_char(' ')?;
                }
                f.write_char('╰')?;
                for _ in (start + 1)..end.saturating_sub(1) {
                    f.write_char('─')?;
                }
                if end - start > 1 {
                    f.write_char('╯')?;
                }
                write_scores(f, &result.scores)?;
                write!(f, " → {}", result.classification)?;
            }
        }

        if self.result.is_paragraph || results.is_empty() {
            if !results.is_empty() {
                f.write_char('\n')?;
            }
            f.write_str("═ ")?;
            write_scores(f, &self.result.aggregate_scores)?;
            write!(f, " → {}", self.result.classification)?;
        }

        Ok(())
    }
}
