//! Modal indicators and sentence structure.
//!
//! A read-only view of one sentence: the modal terms and constructions it
//! contains, grouped by axis, a coarse part-of-speech tagging, and a few
//! structural flags. Nothing here feeds back into scoring.
//!
//! Key distinction: indicators are found by substring search over the
//! tokenized sentence (so "cannot" also reports "can"), while the structural
//! flags look at whole tokens.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::contingent::CascadeHit;
use crate::types::Axis;

const NECESSITY_TERMS: &[&str] = &[
    "must",
    "have to",
    "need to",
    "ought to",
    "should",
    "shall",
    "required",
    "necessary",
    "essential",
    "inevitable",
    "certain",
];

const POSSIBILITY_TERMS: &[&str] = &[
    "can",
    "could",
    "may",
    "might",
    "possible",
    "perhaps",
    "maybe",
    "likely",
    "probable",
    "potentially",
];

const IMPOSSIBILITY_TERMS: &[&str] = &[
    "cannot",
    "can't",
    "impossible",
    "never",
    "no way",
    "unable",
    "incapable",
    "forbidden",
    "prohibited",
];

const CONDITIONAL_WORDS: &[&str] = &["if", "when", "unless", "provided"];

static PUNCTUATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.,!?;:]").expect("Invalid punctuation regex"));

/// Fixed constructions reported under an axis with a descriptive name.
static CONSTRUCTIONS: Lazy<Vec<(Axis, Regex, &'static str)>> = Lazy::new(|| {
    [
        (
            Axis::Necessity,
            r"it is (necessary|essential|required|certain)",
            "necessity construction",
        ),
        (
            Axis::Possibility,
            r"it is (possible|likely|probable)",
            "possibility construction",
        ),
        (
            Axis::Impossibility,
            r"it is (impossible|unlikely|improbable)",
            "impossibility construction",
        ),
        (
            Axis::Impossibility,
            r"not (possible|able|capable)",
            "negated possibility",
        ),
    ]
    .into_iter()
    .map(|(axis, pattern, name)| {
        (
            axis,
            Regex::new(pattern).expect("Invalid construction regex"),
            name,
        )
    })
    .collect()
});

/// Coarse part-of-speech tag, serialized with its Penn Treebank name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tag {
    #[serde(rename = "PRP")]
    Pronoun,
    #[serde(rename = "PRP$")]
    PossessivePronoun,
    #[serde(rename = "DT")]
    Determiner,
    #[serde(rename = "IN")]
    Preposition,
    #[serde(rename = "CC")]
    Conjunction,
    #[serde(rename = "VB")]
    Verb,
    #[serde(rename = "VBZ")]
    VerbThirdPerson,
    #[serde(rename = "VBP")]
    VerbPresent,
    #[serde(rename = "VBD")]
    VerbPast,
    #[serde(rename = "VBN")]
    VerbParticiple,
    #[serde(rename = "VBG")]
    VerbGerund,
    #[serde(rename = "MD")]
    Modal,
    #[serde(rename = "JJ")]
    Adjective,
    #[serde(rename = "RB")]
    Adverb,
    #[serde(rename = "NN")]
    Noun,
    #[serde(rename = "NNS")]
    PluralNoun,
    #[serde(rename = "PUNCT")]
    Punctuation,
}

impl Tag {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tag::Pronoun => "PRP",
            Tag::PossessivePronoun => "PRP$",
            Tag::Determiner => "DT",
            Tag::Preposition => "IN",
            Tag::Conjunction => "CC",
            Tag::Verb => "VB",
            Tag::VerbThirdPerson => "VBZ",
            Tag::VerbPresent => "VBP",
            Tag::VerbPast => "VBD",
            Tag::VerbParticiple => "VBN",
            Tag::VerbGerund => "VBG",
            Tag::Modal => "MD",
            Tag::Adjective => "JJ",
            Tag::Adverb => "RB",
            Tag::Noun => "NN",
            Tag::PluralNoun => "NNS",
            Tag::Punctuation => "PUNCT",
        }
    }

    pub fn is_verb(&self) -> bool {
        matches!(
            self,
            Tag::Verb
                | Tag::VerbThirdPerson
                | Tag::VerbPresent
                | Tag::VerbPast
                | Tag::VerbParticiple
                | Tag::VerbGerund
        )
    }

    /// Pronouns and nouns: anything that can stand as a subject.
    pub fn is_nominal(&self) -> bool {
        matches!(
            self,
            Tag::Pronoun | Tag::PossessivePronoun | Tag::Noun | Tag::PluralNoun
        )
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Closed-class words and a handful of common open-class ones.
///
/// Later entries win, so "her" ends up possessive.
static LEXICON: Lazy<HashMap<&'static str, Tag>> = Lazy::new(|| {
    let groups: &[(Tag, &[&str])] = &[
        (
            Tag::Pronoun,
            &["i", "you", "he", "she", "it", "we", "they", "me", "him", "her", "us", "them"],
        ),
        (
            Tag::PossessivePronoun,
            &["my", "your", "his", "her", "its", "our", "their"],
        ),
        (Tag::Determiner, &["a", "an", "the"]),
        (
            Tag::Preposition,
            &[
                "in", "on", "at", "by", "for", "with", "to", "of", "from", "about", "into",
                "through", "during", "before", "after",
            ],
        ),
        (Tag::Conjunction, &["and", "or", "but", "so", "yet", "nor"]),
        (
            Tag::Preposition,
            &["that", "if", "when", "where", "while", "because"],
        ),
        (Tag::VerbThirdPerson, &["is", "has", "does"]),
        (Tag::VerbPresent, &["are", "have", "do"]),
        (Tag::VerbPast, &["was", "were", "had", "did"]),
        (Tag::Verb, &["be"]),
        (Tag::VerbParticiple, &["been", "done"]),
        (Tag::VerbGerund, &["being", "having", "doing"]),
        (
            Tag::Modal,
            &[
                "will", "would", "can", "could", "may", "might", "must", "should", "shall",
                "ought",
            ],
        ),
        (
            Tag::Adjective,
            &[
                "good", "bad", "big", "small", "new", "old", "first", "last", "long", "short",
                "high", "low", "necessary", "possible", "impossible", "certain", "likely",
            ],
        ),
        (
            Tag::Adverb,
            &[
                "very", "really", "quite", "rather", "too", "always", "never", "sometimes",
                "often", "usually", "certainly", "probably", "possibly", "definitely", "maybe",
            ],
        ),
    ];

    let mut lexicon = HashMap::new();
    for (tag, words) in groups {
        for word in *words {
            lexicon.insert(*word, *tag);
        }
    }
    lexicon
});

/// One lower-cased token and its tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggedToken {
    pub token: String,
    pub pos: Tag,
}

/// Modal terms and constructions found in a sentence, grouped by axis.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModalIndicators {
    pub necessity: Vec<String>,
    pub possibility: Vec<String>,
    pub impossibility: Vec<String>,
}

impl ModalIndicators {
    pub fn get(&self, axis: Axis) -> &[String] {
        match axis {
            Axis::Necessity => &self.necessity,
            Axis::Possibility => &self.possibility,
            Axis::Impossibility => &self.impossibility,
        }
    }

    fn get_mut(&mut self, axis: Axis) -> &mut Vec<String> {
        match axis {
            Axis::Necessity => &mut self.necessity,
            Axis::Possibility => &mut self.possibility,
            Axis::Impossibility => &mut self.impossibility,
        }
    }

    pub fn is_empty(&self) -> bool {
        Axis::ALL.iter().all(|axis| self.get(*axis).is_empty())
    }

    /// Every indicator with its axis, in `Axis::ALL` order.
    pub fn iter(&self) -> impl Iterator<Item = (Axis, &str)> + '_ {
        Axis::ALL
            .into_iter()
            .flat_map(move |axis| self.get(axis).iter().map(move |i| (axis, i.as_str())))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tense {
    Past,
    #[default]
    Present,
    Future,
}

/// Structural flags for one sentence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentenceStructure {
    pub has_subject: bool,
    pub has_predicate: bool,
    pub has_modal: bool,
    /// Contains "if", "when", "unless" or "provided".
    pub is_conditional: bool,
    pub is_negated: bool,
    pub tense: Tense,
}

/// Read-only linguistic detail attached to a [`SentenceResult`](crate::SentenceResult)
/// by [`AnalysisEngine::analyze_detailed`](crate::AnalysisEngine::analyze_detailed).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentenceAnalysis {
    pub tokens: Vec<TaggedToken>,
    pub indicators: ModalIndicators,
    pub structure: SentenceStructure,
    /// Contingent keyword steps that fired. Empty when a logical rule
    /// decided the scores.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cascade: Vec<CascadeHit>,
}

impl SentenceAnalysis {
    pub fn with_cascade(mut self, cascade: Vec<CascadeHit>) -> Self {
        self.cascade = cascade;
        self
    }
}

fn has_token(tagged: &[TaggedToken], words: &[&str]) -> bool {
    tagged.iter().any(|t| words.contains(&t.token.as_str()))
}

/// Tokenizes, tags and inspects single sentences.
pub struct SentenceAnalyzer;

impl SentenceAnalyzer {
    /// Lower-case, split punctuation into its own tokens, split on whitespace.
    pub fn tokenize(sentence: &str) -> Vec<String> {
        let lower = sentence.to_lowercase();
        PUNCTUATION
            .replace_all(&lower, " $0 ")
            .split_whitespace()
            .map(str::to_string)
            .collect()
    }

    pub fn tag(tokens: &[String]) -> Vec<TaggedToken> {
        tokens
            .iter()
            .enumerate()
            .map(|(idx, token)| {
                let previous = idx.checked_sub(1).map(|i| tokens[i].as_str());
                TaggedToken {
                    token: token.clone(),
                    pos: Self::tag_token(token, previous),
                }
            })
            .collect()
    }

    fn tag_token(token: &str, previous: Option<&str>) -> Tag {
        if let Some(tag) = LEXICON.get(token) {
            return *tag;
        }

        if PUNCTUATION.is_match(token) && token.chars().count() == 1 {
            Tag::Punctuation
        } else if token.ends_with("ing") {
            Tag::VerbGerund
        } else if token.ends_with("ed") {
            Tag::VerbPast
        } else if token.ends_with("ly") {
            Tag::Adverb
        } else if token.ends_with('s') && !token.ends_with("ss") {
            // After a determiner or adjective it is a plural noun, otherwise
            // a third-person verb.
            let after_modifier = previous
                .and_then(|word| LEXICON.get(word))
                .is_some_and(|tag| matches!(tag, Tag::Determiner | Tag::Adjective));
            if after_modifier {
                Tag::PluralNoun
            } else {
                Tag::VerbThirdPerson
            }
        } else if Self::contains_modal_term(token) {
            Tag::Modal
        } else {
            Tag::Noun
        }
    }

    fn contains_modal_term(token: &str) -> bool {
        NECESSITY_TERMS
            .iter()
            .chain(POSSIBILITY_TERMS)
            .chain(IMPOSSIBILITY_TERMS)
            .any(|term| token.contains(term))
    }

    /// Modal terms and constructions in a tokenized sentence.
    pub fn indicators(tokens: &[String]) -> ModalIndicators {
        let joined = tokens.join(" ");
        let mut indicators = ModalIndicators::default();

        let tables = [
            (Axis::Necessity, NECESSITY_TERMS),
            (Axis::Possibility, POSSIBILITY_TERMS),
            (Axis::Impossibility, IMPOSSIBILITY_TERMS),
        ];
        for (axis, terms) in tables {
            for term in terms {
                if joined.contains(term) {
                    indicators.get_mut(axis).push(term.to_string());
                }
            }
        }

        for (axis, pattern, name) in CONSTRUCTIONS.iter() {
            if pattern.is_match(&joined) {
                indicators.get_mut(*axis).push(name.to_string());
            }
        }

        indicators
    }

    pub fn structure(tagged: &[TaggedToken]) -> SentenceStructure {
        let tense = if tagged.iter().any(|t| t.pos == Tag::VerbPast) {
            Tense::Past
        } else if has_token(tagged, &["will", "shall"]) {
            Tense::Future
        } else {
            Tense::Present
        };

        SentenceStructure {
            has_subject: tagged.iter().any(|t| t.pos.is_nominal()),
            has_predicate: tagged.iter().any(|t| t.pos.is_verb()),
            has_modal: tagged.iter().any(|t| t.pos == Tag::Modal),
            is_conditional: has_token(tagged, CONDITIONAL_WORDS),
            is_negated: tagged.iter().any(|t| Self::is_negation_word(&t.token)),
            tense,
        }
    }

    /// Check if a token is a negation word
    pub fn is_negation_word(token: &str) -> bool {
        matches!(
            token,
            "not" | "no" | "never" | "neither" | "nor" | "without" | "cannot"
        ) || token.ends_with("n't")
    }

    pub fn analyze(sentence: &str) -> SentenceAnalysis {
        let tokens = Self::tokenize(sentence);
        let indicators = Self::indicators(&tokens);
        let tagged = Self::tag(&tokens);
        let structure = Self::structure(&tagged);

        SentenceAnalysis {
            tokens: tagged,
            indicators,
            structure,
            cascade: Vec::new(),
        }
    }
}
