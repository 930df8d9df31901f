//! The standard bench rule table
//!
//! Order matters. Instrument and test actions come first, then heating of
//! specific solids, then two- and three-reagent combinations, then the
//! generic heat/stir fallbacks. Within each group the more specific
//! combination is registered before anything it overlaps with.
//!
//! Amounts are treated as if every solution were 1 mol dm⁻³ unless noted.
//! The numbers are tuned for plausibility, not accuracy.

use crate::core::config::ReactionConfig;
use crate::lab::log::LabAction;
use crate::lab::vessel::Vessel;
use crate::reactions::rule::{ReactionEffect, ReactionRule};

const ACIDS: &[&str] = &["HCl", "H2SO4", "HNO3"];
const METALS: &[&str] = &["Mg", "Zn"];
const CARBONATES: &[&str] = &["CaCO3", "Na2CO3"];
const SULFATES: &[&str] = &["Na2SO4", "CuSO4", "FeSO4", "ZnSO4", "H2SO4", "alum"];
const CHLORIDES: &[&str] = &["NaCl", "HCl", "FeCl3", "BaCl2"];

/// Specific heat capacity of water, J g⁻¹ K⁻¹
const WATER_HEAT_CAPACITY: f32 = 4.18;
/// Enthalpy of neutralisation magnitude, J mol⁻¹
const NEUTRALISATION_ENTHALPY: f32 = 57_100.0;
/// Zn + Cu²⁺ displacement enthalpy magnitude, J mol⁻¹
const DISPLACEMENT_ENTHALPY: f32 = 217_000.0;
/// Concentration assumed for the CuSO₄ used in displacement, mol dm⁻³
const COPPER_SULFATE_CONCENTRATION: f32 = 0.5;
const ZINC_MOLAR_MASS: f32 = 65.4;

/// Thiosulfate clock: seconds for neat thiosulfate with plenty of acid at room temperature
const THIOSULFATE_BASE_TIME: f32 = 20.0;

pub fn default_rules() -> Vec<ReactionRule> {
    vec![
        // --- timing and measuring ---
        ReactionRule::always("clock_start", |_, _, _| {
            ReactionEffect::observe("Stopwatch started.")
        })
        .on(LabAction::StartClock),
        ReactionRule::requires("clock_stop_thiosulfate", &["Na2S2O3", "HCl"], |v, _, cfg| {
            let t = thiosulfate_time(v, cfg);
            ReactionEffect::observe(format!(
                "Stopwatch stopped: the cross disappeared after {:.1} s.",
                t
            ))
            .timed(t)
        })
        .on(LabAction::StopClock),
        ReactionRule::always("clock_stop", |_, _, _| {
            ReactionEffect::observe("Stopwatch stopped.")
        })
        .on(LabAction::StopClock),
        ReactionRule::always("thermometer", |v, _, _| {
            ReactionEffect::observe(format!("Thermometer reads {:.1} °C.", v.temperature))
        })
        .on(LabAction::MeasureTemp),
        ReactionRule::always("balance", |v, _, _| {
            ReactionEffect::observe(format!("Balance reads {:.2} g.", contents_mass(v)))
        })
        .on(LabAction::Weigh),
        // --- gas and litmus tests ---
        ReactionRule::when(
            "splint_hydrogen",
            |set, _, _| set.contains_any(METALS) && set.contains_any(ACIDS),
            |v, _, _| {
                let hidden = v.any_hidden(METALS) || v.any_hidden(ACIDS);
                let text = if hidden {
                    "Lighted splint gives a squeaky pop."
                } else {
                    "Lighted splint gives a squeaky pop: hydrogen is present."
                };
                ReactionEffect::observe(text).gas(gas_label(hidden, "H₂"))
            },
        )
        .on(LabAction::TestGasSplint),
        ReactionRule::when(
            "splint_carbon_dioxide",
            |set, _, _| set.contains_any(CARBONATES) && set.contains_any(ACIDS),
            |v, _, _| {
                let hidden = v.any_hidden(CARBONATES) || v.any_hidden(ACIDS);
                ReactionEffect::observe("Lighted splint is extinguished.")
                    .gas(gas_label(hidden, "CO₂"))
            },
        )
        .on(LabAction::TestGasSplint),
        ReactionRule::always("splint_no_gas", |_, _, _| {
            ReactionEffect::observe("Lighted splint keeps burning; no gas detected.")
        })
        .on(LabAction::TestGasSplint),
        ReactionRule::when(
            "glowing_oxygen",
            |set, _, _| {
                set.contains("H2O2")
                    && (set.contains("MnO2") || set.contains_all(&["KMnO4", "H2SO4"]))
            },
            |v, _, _| {
                let hidden = v.is_hidden("H2O2");
                let text = if hidden {
                    "Glowing splint relights."
                } else {
                    "Glowing splint relights: oxygen is present."
                };
                ReactionEffect::observe(text).gas(gas_label(hidden, "O₂"))
            },
        )
        .on(LabAction::TestGasGlowing),
        ReactionRule::always("glowing_no_oxygen", |_, _, _| {
            ReactionEffect::observe("Glowing splint does not relight.")
        })
        .on(LabAction::TestGasGlowing),
        ReactionRule::when(
            "litmus_acidic",
            |_, v, _| acid_equivalents(v) > alkali_equivalents(v),
            |_, _, _| ReactionEffect::observe("Blue litmus paper turns red."),
        )
        .on(LabAction::TestLitmus),
        ReactionRule::when(
            "litmus_alkaline",
            |set, v, _| set.contains("NH3") || alkali_equivalents(v) > acid_equivalents(v),
            |_, _, _| ReactionEffect::observe("Red litmus paper turns blue."),
        )
        .on(LabAction::TestLitmus),
        ReactionRule::always("litmus_neutral", |_, _, _| {
            ReactionEffect::observe("Litmus paper does not change colour.")
        })
        .on(LabAction::TestLitmus),
        // --- filtration ---
        ReactionRule::when(
            "filter_residue",
            |_, v, _| v.has_precipitate,
            |v, _, _| {
                let residue = v.precipitate_label.as_deref().unwrap_or("solid");
                ReactionEffect::observe(format!(
                    "Residue ({}) collected on the filter paper; \
                     the filtrate runs through clear.",
                    residue
                ))
                .tint(filtrate_color(v))
            },
        )
        .on(LabAction::Filter),
        ReactionRule::always("filter_nothing", |_, _, _| {
            ReactionEffect::observe("Nothing is left on the filter paper.")
        })
        .on(LabAction::Filter),
        // --- heating solids ---
        ReactionRule::requires("dehydrate_copper_sulfate", &["CuSO4_5H2O"], |v, _, _| {
            let text = if v.is_hidden("CuSO4_5H2O") {
                "Blue crystals turn to a white powder; \
                 droplets of liquid condense near the mouth of the tube."
            } else {
                "Blue crystals turn to white anhydrous copper(II) sulfate; \
                 water condenses near the mouth of the tube."
            };
            ReactionEffect::observe(text)
                .color_change("blue → white", "white")
                .gas("H₂O(g)")
                .temp(25.0)
        })
        .on(LabAction::Heat),
        ReactionRule::requires("dehydrate_alum", &["alum"], |_, _, _| {
            ReactionEffect::observe(
                "Crystals melt in their own water of crystallisation, \
                 then swell into a white porous mass.",
            )
            .color_change("colourless crystals → white solid", "white")
            .gas("H₂O(g)")
            .temp(25.0)
        })
        .on(LabAction::Heat),
        // --- combinations ---
        ReactionRule::requires("thiosulfate_acid", &["Na2S2O3", "HCl"], |v, _, cfg| {
            let hidden = v.any_hidden(&["Na2S2O3", "HCl"]);
            let precipitate = if hidden {
                "pale yellow precipitate"
            } else {
                "pale yellow precipitate of sulfur, S(s)"
            };
            ReactionEffect::observe(
                "The mixture slowly turns cloudy and the cross beneath the flask fades from view.",
            )
            .color_change("colourless → cloudy pale yellow", "cloudy pale yellow")
            .precipitate(precipitate)
            .gas(gas_label(hidden, "SO₂"))
            .timed(thiosulfate_time(v, cfg))
        }),
        ReactionRule::when(
            "titration_phenolphthalein",
            |set, _, _| {
                set.contains_all(&["phenolphthalein", "NaOH"]) && set.contains_any(ACIDS)
            },
            |v, _, _| {
                let (observation, color) = match end_point(v) {
                    EndPoint::AcidExcess => {
                        ("The pink colour disappears on swirling.", "colourless")
                    }
                    EndPoint::Reached => (
                        "A faint permanent pink colour appears: end-point reached.",
                        "pale pink",
                    ),
                    EndPoint::AlkaliExcess => {
                        ("The solution turns deep pink: end-point overshot.", "pink")
                    }
                };
                ReactionEffect::observe(observation).tint(color).temp(0.5)
            },
        ),
        ReactionRule::when(
            "titration_methyl_orange",
            |set, _, _| set.contains_all(&["methyl_orange", "NaOH"]) && set.contains_any(ACIDS),
            |v, _, _| {
                let (observation, color) = match end_point(v) {
                    EndPoint::AcidExcess => ("The solution is red.", "red"),
                    EndPoint::Reached => {
                        ("The solution turns orange: end-point reached.", "orange")
                    }
                    EndPoint::AlkaliExcess => {
                        ("The solution turns yellow: end-point overshot.", "yellow")
                    }
                };
                ReactionEffect::observe(observation).tint(color).temp(0.5)
            },
        ),
        // Cation tests need the sodium hydroxide to outrun any acid present;
        // with acid in excess the mixture only neutralises.
        ReactionRule::when(
            "hydroxide_copper",
            |set, v, _| set.contains_all(&["NaOH", "CuSO4"]) && alkali_in_excess(v),
            |v, _, _| {
                let precipitate = hidden_or(
                    v,
                    &["CuSO4"],
                    "pale blue precipitate",
                    "pale blue precipitate of Cu(OH)₂",
                );
                ReactionEffect::observe("A pale blue precipitate forms, insoluble in excess.")
                    .color_change("blue → pale blue suspension", "pale blue")
                    .precipitate(precipitate)
            },
        ),
        ReactionRule::when(
            "hydroxide_iron_ii",
            |set, v, _| set.contains_all(&["NaOH", "FeSO4"]) && alkali_in_excess(v),
            |v, _, _| {
                let precipitate = hidden_or(
                    v,
                    &["FeSO4"],
                    "green precipitate",
                    "green precipitate of Fe(OH)₂",
                );
                ReactionEffect::observe(
                    "A green precipitate forms; it turns brown at the surface on standing.",
                )
                .color_change("pale green → green suspension", "green")
                .precipitate(precipitate)
            },
        ),
        ReactionRule::when(
            "hydroxide_iron_iii",
            |set, v, _| set.contains_all(&["NaOH", "FeCl3"]) && alkali_in_excess(v),
            |v, _, _| {
                let precipitate = hidden_or(
                    v,
                    &["FeCl3"],
                    "red-brown precipitate",
                    "red-brown precipitate of Fe(OH)₃",
                );
                ReactionEffect::observe("A red-brown precipitate forms, insoluble in excess.")
                    .color_change("yellow-brown → red-brown suspension", "red-brown")
                    .precipitate(precipitate)
            },
        ),
        ReactionRule::when(
            "hydroxide_zinc",
            |set, v, _| set.contains_all(&["NaOH", "ZnSO4"]) && alkali_in_excess(v),
            |v, _, _| {
                let free_alkali = alkali_equivalents(v) - acid_equivalents(v);
                if free_alkali > 2.0 * v.volume_of("ZnSO4") {
                    ReactionEffect::observe(
                        "The white precipitate dissolves in excess to give a colourless solution.",
                    )
                    .tint("colourless")
                } else {
                    let precipitate = hidden_or(
                        v,
                        &["ZnSO4"],
                        "white precipitate",
                        "white precipitate of Zn(OH)₂",
                    );
                    ReactionEffect::observe("A white precipitate forms.")
                        .color_change("colourless → white suspension", "white")
                        .precipitate(precipitate)
                }
            },
        ),
        ReactionRule::when(
            "ammonia_copper",
            |set, v, _| {
                set.contains_all(&["NH3", "CuSO4"]) && v.volume_of("NH3") > acid_equivalents(v)
            },
            |v, _, _| {
                let free_ammonia = v.volume_of("NH3") - acid_equivalents(v);
                if free_ammonia > 2.0 * v.volume_of("CuSO4") {
                    ReactionEffect::observe(
                        "The precipitate dissolves in excess to give a deep blue solution.",
                    )
                    .color_change("blue → deep blue", "deep blue")
                } else {
                    let precipitate = hidden_or(
                        v,
                        &["CuSO4"],
                        "pale blue precipitate",
                        "pale blue precipitate of Cu(OH)₂",
                    );
                    ReactionEffect::observe("A pale blue precipitate forms.")
                        .color_change("blue → pale blue suspension", "pale blue")
                        .precipitate(precipitate)
                }
            },
        ),
        ReactionRule::when(
            "neutralisation",
            |set, _, _| set.contains("NaOH") && set.contains_any(ACIDS),
            |v, _, _| {
                let reacting = acid_equivalents(v).min(alkali_equivalents(v));
                let total = v.total_volume().max(1.0);
                let delta =
                    reacting / 1000.0 * NEUTRALISATION_ENTHALPY / (total * WATER_HEAT_CAPACITY);
                ReactionEffect::observe("The mixture warms up; no other visible change.")
                    .temp(round_tenth(delta))
            },
        ),
        ReactionRule::when(
            "barium_sulfate",
            |set, _, _| set.contains("BaCl2") && set.contains_any(SULFATES),
            |v, _, _| {
                let precipitate =
                    hidden_or(v, SULFATES, "white precipitate", "white precipitate of BaSO₄");
                ReactionEffect::observe("A dense white precipitate forms immediately.")
                    .color_change("colourless → white suspension", "white")
                    .precipitate(precipitate)
            },
        ),
        // Silver iodide and bromide are less soluble than the chloride, so an
        // acidified halide shows its own precipitate.
        ReactionRule::requires("silver_iodide", &["AgNO3", "KI"], |v, _, _| {
            let precipitate =
                hidden_or(v, &["KI"], "yellow precipitate", "yellow precipitate of AgI");
            ReactionEffect::observe("A yellow precipitate forms.")
                .color_change("colourless → yellow suspension", "yellow")
                .precipitate(precipitate)
        }),
        ReactionRule::requires("silver_bromide", &["AgNO3", "KBr"], |v, _, _| {
            let precipitate =
                hidden_or(v, &["KBr"], "cream precipitate", "cream precipitate of AgBr");
            ReactionEffect::observe("A cream precipitate forms.")
                .color_change("colourless → cream suspension", "cream")
                .precipitate(precipitate)
        }),
        ReactionRule::when(
            "silver_chloride",
            |set, _, _| set.contains("AgNO3") && set.contains_any(CHLORIDES),
            |v, _, _| {
                let precipitate =
                    hidden_or(v, CHLORIDES, "white precipitate", "white precipitate of AgCl");
                ReactionEffect::observe("A white precipitate forms; it darkens slowly in light.")
                    .color_change("colourless → white suspension", "white")
                    .precipitate(precipitate)
            },
        ),
        ReactionRule::requires(
            "permanganate_iron_ii",
            &["KMnO4", "H2SO4", "FeSO4"],
            |_, _, _| {
                ReactionEffect::observe("The purple colour of the manganate(VII) is discharged.")
                    .color_change("purple → pale yellow", "pale yellow")
            },
        ),
        ReactionRule::requires(
            "permanganate_peroxide",
            &["KMnO4", "H2SO4", "H2O2"],
            |v, _, _| {
                ReactionEffect::observe("The purple colour is discharged with effervescence.")
                    .color_change("purple → colourless", "colourless")
                    .gas(gas_label(v.is_hidden("H2O2"), "O₂"))
            },
        ),
        ReactionRule::when(
            "permanganate_unacidified",
            |set, _, _| {
                set.contains("KMnO4")
                    && set.contains_any(&["FeSO4", "H2O2"])
                    && !set.contains("H2SO4")
            },
            |_, _, _| {
                ReactionEffect::observe(
                    "A brown precipitate forms; the purple colour fades only partly.",
                )
                .color_change("purple → brown suspension", "brown")
                .precipitate("brown precipitate")
            },
        ),
        ReactionRule::requires("peroxide_catalysed", &["H2O2", "MnO2"], |v, _, _| {
            let hidden = v.is_hidden("H2O2");
            let text = if hidden {
                "Vigorous effervescence; the black solid is unchanged."
            } else {
                "Vigorous effervescence as oxygen is released; the black solid is unchanged."
            };
            ReactionEffect::observe(text)
                .gas(gas_label(hidden, "O₂"))
                .temp(2.0)
        }),
        ReactionRule::requires("zinc_displacement", &["Zn", "CuSO4"], |v, _, _| {
            let volume = v.volume_of("CuSO4").max(1.0);
            let zinc_mass = v.content("Zn").map(|c| c.amount.value()).unwrap_or(0.0);
            let zinc = zinc_mass / ZINC_MOLAR_MASS;
            let copper = volume / 1000.0 * COPPER_SULFATE_CONCENTRATION;
            let heat_capacity = v.total_volume().max(1.0) * WATER_HEAT_CAPACITY;
            let delta = zinc.min(copper) * DISPLACEMENT_ENTHALPY / heat_capacity;
            ReactionEffect::observe(
                "The blue colour fades and a red-brown solid forms; the mixture gets warm.",
            )
            .color_change("blue → paler blue", "pale blue")
            .temp(round_tenth(delta))
        }),
        ReactionRule::when(
            "metal_acid",
            |set, _, _| set.contains_any(METALS) && set.contains_any(ACIDS),
            |v, _, _| {
                let rise = if v.contains("Mg") { 8.0 } else { 3.0 };
                let hidden = v.any_hidden(METALS) || v.any_hidden(ACIDS);
                let text = if hidden {
                    "Effervescence; the metal dissolves and the tube warms."
                } else {
                    "Effervescence as hydrogen is given off; \
                     the metal dissolves and the tube warms."
                };
                ReactionEffect::observe(text)
                    .gas(gas_label(hidden, "H₂"))
                    .temp(rise)
            },
        ),
        ReactionRule::when(
            "carbonate_acid",
            |set, _, _| set.contains_any(CARBONATES) && set.contains_any(ACIDS),
            |v, _, _| {
                let text = if v.contains("CaCO3") && v.contains("H2SO4") && !v.contains("HCl") {
                    "Fizzing starts but soon stops as an insoluble coating forms."
                } else {
                    "Effervescence; a colourless gas is given off."
                };
                let hidden = v.any_hidden(CARBONATES) || v.any_hidden(ACIDS);
                ReactionEffect::observe(text).gas(gas_label(hidden, "CO₂"))
            },
        ),
        // --- single chemicals ---
        ReactionRule::when(
            "coloured_solution",
            |_, v, _| {
                intrinsic_color(v)
                    .map(|color| color != v.color)
                    .unwrap_or(false)
            },
            |v, _, _| {
                let color = intrinsic_color(v).unwrap_or("colourless");
                ReactionEffect::observe(format!(
                    "No reaction observed; the solution is {}.",
                    color
                ))
                .tint(color)
            },
        )
        .on(LabAction::AddChemical),
        // --- fallbacks ---
        ReactionRule::when(
            "heat_generic",
            |_, v, _| !v.is_empty(),
            |v, _, _| heat_contents(v),
        )
        .on(LabAction::Heat),
        ReactionRule::when(
            "stir_generic",
            |_, v, _| !v.is_empty(),
            |_, _, _| ReactionEffect::observe("The contents are stirred until uniform."),
        )
        .on(LabAction::Stir),
    ]
}

/// Acid in cm³ of 1 mol dm⁻³ H⁺ equivalents (sulfuric acid is diprotic)
fn acid_equivalents(v: &Vessel) -> f32 {
    v.volume_of("HCl") + v.volume_of("HNO3") + 2.0 * v.volume_of("H2SO4")
}

fn alkali_equivalents(v: &Vessel) -> f32 {
    v.volume_of("NaOH")
}

fn alkali_in_excess(v: &Vessel) -> bool {
    alkali_equivalents(v) > acid_equivalents(v)
}

enum EndPoint {
    AcidExcess,
    Reached,
    AlkaliExcess,
}

/// Titration end-point within one drop (0.05 cm³)
fn end_point(v: &Vessel) -> EndPoint {
    let diff = alkali_equivalents(v) - acid_equivalents(v);
    if diff.abs() <= 0.05 {
        EndPoint::Reached
    } else if diff < 0.0 {
        EndPoint::AcidExcess
    } else {
        EndPoint::AlkaliExcess
    }
}

/// Seconds for the cross to disappear
///
/// Scales inversely with the thiosulfate fraction of the mixture, slows when
/// there is very little acid, and halves for every 10 °C above room
/// temperature.
fn thiosulfate_time(v: &Vessel, cfg: &ReactionConfig) -> f32 {
    let thio = v.volume_of("Na2S2O3");
    if thio <= 0.0 {
        return cfg.max_reaction_time;
    }
    let total = v.total_volume().max(thio);
    let acid = v.volume_of("HCl");
    let acid_factor = if acid >= 5.0 { 1.0 } else { 5.0 / acid.max(0.5) };
    let temp_factor = 2f32.powf((cfg.room_temperature - v.temperature) / 10.0);

    let t = THIOSULFATE_BASE_TIME * (total / thio) * acid_factor * temp_factor;
    round_tenth(t.max(cfg.min_reaction_time).min(cfg.max_reaction_time))
}

/// Approximate mass of the contents, taking solutions as 1 g cm⁻³
fn contents_mass(v: &Vessel) -> f32 {
    v.contents.iter().map(|c| c.amount.value()).sum()
}

fn intrinsic_color(v: &Vessel) -> Option<&'static str> {
    const COLOURED: &[(&str, &str)] = &[
        ("KMnO4", "purple"),
        ("CuSO4", "blue"),
        ("FeCl3", "yellow-brown"),
        ("FeSO4", "pale green"),
    ];
    COLOURED
        .iter()
        .find(|(id, _)| v.contains(id))
        .map(|(_, color)| *color)
}

fn filtrate_color(v: &Vessel) -> &'static str {
    if v.contains("CuSO4") && !v.contains("NaOH") {
        "blue"
    } else {
        "colourless"
    }
}

fn heat_contents(v: &Vessel) -> ReactionEffect {
    if v.total_volume() <= 0.0 {
        return ReactionEffect::observe("The solid is heated strongly; no visible change.")
            .temp(25.0);
    }
    let headroom = (100.0 - v.temperature).max(0.0);
    if headroom <= 0.0 {
        return ReactionEffect::observe("The solution boils; steam is given off.").gas("H₂O(g)");
    }
    let rise = headroom.min(15.0);
    ReactionEffect::observe(format!(
        "The contents warm to about {:.0} °C.",
        v.temperature + rise
    ))
    .temp(rise)
}

fn hidden_or(v: &Vessel, ids: &[&str], hidden: &str, revealed: &str) -> String {
    if v.any_hidden(ids) {
        hidden.to_string()
    } else {
        revealed.to_string()
    }
}

/// Gas formula, or a neutral description when it would identify an unknown
fn gas_label(hidden: bool, formula: &str) -> String {
    if hidden {
        "colourless gas".to_string()
    } else {
        formula.to_string()
    }
}

fn round_tenth(x: f32) -> f32 {
    (x * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reactions::rule::RuleMatch;

    fn position(rules: &[ReactionRule], id: &str) -> usize {
        rules
            .iter()
            .position(|r| r.id == id)
            .unwrap_or_else(|| panic!("missing rule {}", id))
    }

    #[test]
    fn test_rule_ids_unique() {
        let rules = default_rules();
        let mut ids: Vec<&str> = rules.iter().map(|r| r.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), rules.len());
    }

    #[test]
    fn test_specific_combinations_precede_overlapping_rules() {
        let rules = default_rules();
        let before = |a: &str, b: &str| position(&rules, a) < position(&rules, b);
        assert!(before("titration_phenolphthalein", "neutralisation"));
        assert!(before("hydroxide_copper", "barium_sulfate"));
        assert!(before("permanganate_iron_ii", "permanganate_unacidified"));
        assert!(before("zinc_displacement", "metal_acid"));
        assert!(before("clock_stop_thiosulfate", "clock_stop"));
    }

    #[test]
    fn test_cation_tests_precede_neutralisation() {
        let rules = default_rules();
        let neutralisation = position(&rules, "neutralisation");
        for id in [
            "hydroxide_copper",
            "hydroxide_iron_ii",
            "hydroxide_iron_iii",
            "hydroxide_zinc",
            "ammonia_copper",
        ] {
            assert!(position(&rules, id) < neutralisation, "{} is shadowed", id);
        }
    }

    #[test]
    fn test_silver_halides_precede_chloride() {
        let rules = default_rules();
        let chloride = position(&rules, "silver_chloride");
        assert!(position(&rules, "silver_iodide") < chloride);
        assert!(position(&rules, "silver_bromide") < chloride);
    }

    #[test]
    fn test_generic_fallbacks_are_last() {
        let rules = default_rules();
        let n = rules.len();
        assert_eq!(rules[n - 2].id, "heat_generic");
        assert_eq!(rules[n - 1].id, "stir_generic");
        assert!(rules[n - 2..].iter().all(|r| r.action_filter.is_some()));
    }

    #[test]
    fn test_unconditional_rules_are_action_filtered() {
        for rule in default_rules() {
            if matches!(rule.matcher, RuleMatch::Always) {
                assert!(
                    rule.action_filter.is_some(),
                    "{} would shadow everything after it",
                    rule.id
                );
            }
        }
    }

    #[test]
    fn test_thiosulfate_time_drops_with_temperature() {
        let cfg = ReactionConfig::default();
        let mut cold = Vessel::new("Flask", "flask", 20.0);
        cold.add_content(crate::lab::chemical::ChemicalContent::new(
            "Na2S2O3",
            crate::lab::chemical::Amount::Volume(50.0),
            "Na₂S₂O₃",
        ));
        cold.add_content(crate::lab::chemical::ChemicalContent::new(
            "HCl",
            crate::lab::chemical::Amount::Volume(5.0),
            "HCl",
        ));
        let mut warm = cold.clone();
        warm.temperature = 30.0;

        let t_cold = thiosulfate_time(&cold, &cfg);
        let t_warm = thiosulfate_time(&warm, &cfg);
        assert!(t_warm < t_cold);
        assert!((t_cold / t_warm - 2.0).abs() < 0.05);
    }

    #[test]
    fn test_thiosulfate_time_tolerates_inverted_bounds() {
        let cfg = ReactionConfig {
            min_reaction_time: 50.0,
            max_reaction_time: 10.0,
            ..ReactionConfig::default()
        };
        let vessel = Vessel::new("Flask", "flask", 20.0).with_content(
            crate::lab::chemical::ChemicalContent::new(
                "Na2S2O3",
                crate::lab::chemical::Amount::Volume(10.0),
                "Na₂S₂O₃",
            ),
        );
        assert_eq!(thiosulfate_time(&vessel, &cfg), 10.0);
    }

    #[test]
    fn test_gas_label_hides_formula_for_unknowns() {
        assert_eq!(gas_label(false, "H₂"), "H₂");
        assert_eq!(gas_label(true, "H₂"), "colourless gas");
    }
}
