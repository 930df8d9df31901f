//! Reaction rule engine: ordered, first-match rules over vessel contents

pub mod engine;
pub mod rule;
pub mod table;

pub use engine::{simulate_reaction, ReactionEngine, ReactionResult};
pub use rule::{ChemicalSet, ReactionEffect, ReactionRule, RuleMatch};
pub use table::default_rules;
