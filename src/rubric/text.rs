//! Free-text heuristics over answer notes
//!
//! These are presence checks, not a parser. Every family is a named
//! `TextPattern` so the near-duplicate checks stay in one place and can be
//! tested on their own.

use regex::{Regex, RegexBuilder};
use std::sync::OnceLock;

/// Case-insensitive substring test against any needle
pub fn contains_any(text: &str, needles: &[&str]) -> bool {
    let haystack = text.to_lowercase();
    needles
        .iter()
        .any(|needle| haystack.contains(&needle.to_lowercase()))
}

/// A named family of case-insensitive regular expressions, compiled on first use
pub struct TextPattern {
    pub name: &'static str,
    sources: &'static [&'static str],
    compiled: OnceLock<Vec<Regex>>,
}

impl TextPattern {
    pub const fn new(name: &'static str, sources: &'static [&'static str]) -> Self {
        Self {
            name,
            sources,
            compiled: OnceLock::new(),
        }
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.regexes().iter().any(|re| re.is_match(text))
    }

    fn regexes(&self) -> &[Regex] {
        self.compiled.get_or_init(|| {
            self.sources
                .iter()
                .filter_map(|source| {
                    match RegexBuilder::new(source).case_insensitive(true).build() {
                        Ok(re) => Some(re),
                        Err(e) => {
                            tracing::error!(
                                pattern = self.name,
                                %source,
                                error = %e,
                                "invalid text pattern"
                            );
                            None
                        }
                    }
                })
                .collect()
        })
    }
}

impl std::fmt::Debug for TextPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextPattern")
            .field("name", &self.name)
            .field("sources", &self.sources)
            .finish()
    }
}

/// Two-decimal burette readings, e.g. "23.45 cm³"
pub static TITRE: TextPattern = TextPattern::new(
    "titre",
    &[
        r"\d{1,2}\.\d{2}\s*(cm3|cm³|cm\^3|ml)",
        r"titres?\b[^\n]*?\d{1,2}\.\d{2}",
    ],
);

pub static MEAN_TITRE: TextPattern = TextPattern::new(
    "mean_titre",
    &[
        r"(mean|average)\s+titre[^\n]*?\d+\.\d+",
        r"(mean|average)[^\n]{0,40}?=\s*\d+\.\d+",
    ],
);

pub static MOLES: TextPattern = TextPattern::new(
    "moles",
    &[
        r"\bmoles?\b",
        r"\bmol\b",
        r"mol\s*dm",
        r"\bconcentration\b",
        r"\bn\s*=\s*c\s*[×x*]?\s*v\b",
    ],
);

/// "rate = 1/t" style expressions
pub static RATE_EXPRESSION: TextPattern = TextPattern::new(
    "rate_expression",
    &[
        r"\b1\s*/\s*t(ime)?\b",
        r"\brate\s*(=|∝|is\s+(directly\s+)?proportional)",
        r"\brate\s+of\s+reaction\s*=",
    ],
);

pub static RESULTS_TABLE: TextPattern = TextPattern::new(
    "results_table",
    &[
        r"\btable\b",
        r"(\d+(\.\d+)?\s*[|\t]\s*){2,}\d",
    ],
);

pub static GRAPH: TextPattern = TextPattern::new(
    "graph",
    &[r"\bgraph\b", r"\bplot(ted|ting)?\b", r"\bax[ie]s\b", r"\bgradient\b"],
);

/// q = mcΔT, tolerant of spacing, multiplication signs and "delta"
pub static HEAT_EQUATION: TextPattern = TextPattern::new(
    "q_mc_delta_t",
    &[r"\bq\s*=\s*m\s*[×x*·.]?\s*c\s*[×x*·.]?\s*(δ|∆|Δ|delta\s*|d)\s*t"],
);

pub static ENTHALPY_CHANGE: TextPattern = TextPattern::new(
    "delta_h",
    &[
        r"(δ|∆|Δ)\s*h",
        r"\bdelta\s*h\b",
        r"\benthalpy\s+change\b",
        r"\bkj\s*(/|per\s+)?\s*mol",
    ],
);

pub static WATER_OF_CRYSTALLISATION: TextPattern = TextPattern::new(
    "water_of_crystallisation",
    &[
        r"water\s+of\s+crystalli[sz]ation",
        r"\bmass\s+of\s+water\b",
        r"\bmoles?\s+of\s+water\b",
        r"\bx\s*=\s*\d",
        r"\bn\s*\(\s*h2o\s*\)",
    ],
);

pub static FORMULA_MASS: TextPattern = TextPattern::new(
    "mr_formula",
    &[
        r"\bmr\b",
        r"\bmolar\s+mass\b",
        r"\brelative\s+formula\s+mass\b",
        r"\bformula\b",
        r"[·.]\s*\d*\s*h2o",
    ],
);

pub static ION_IDENTIFICATION: TextPattern = TextPattern::new(
    "ion_identification",
    &[
        r"\b(cu|fe|zn|al|ca|ba|mg|pb|ag|nh4|nh₄)\s*[²³23]?\s*[+⁺]",
        r"\b(cl|br|i|so4|so₄|co3|co₃|no3|no₃)\s*[²2]?\s*[-−⁻]",
        r"\b(copper|iron|zinc|aluminium|calcium|barium|magnesium)\s*(\((ii|iii)\))?\s*ions?\b",
        r"\b(sulfate|sulphate|chloride|bromide|iodide|carbonate|nitrate)\b",
    ],
);

pub static REACTION_ARROW: TextPattern =
    TextPattern::new("reaction_arrow", &[r"->", r"→", r"⟶", r"=>"]);

pub static STATE_SYMBOL: TextPattern =
    TextPattern::new("state_symbol", &[r"\((aq|s|g|l)\)"]);

/// Working with an equals sign and a number
pub static CALCULATION: TextPattern =
    TextPattern::new("calculation", &[r"=\s*-?\d+(\.\d+)?"]);

pub static UNITS: TextPattern = TextPattern::new(
    "units",
    &[
        r"\d\s*(cm3|cm³|cm\^3|ml)",
        r"\d\s*(g|s|mol|kj)\b",
        r"\d\s*°\s*c",
    ],
);

/// Arrow plus at least one state symbol
pub fn looks_like_ionic_equation(text: &str) -> bool {
    REACTION_ARROW.is_match(text) && STATE_SYMBOL.is_match(text)
}
