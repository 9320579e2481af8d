//! End-to-end checks of the public API.

use std::collections::{BTreeMap, BTreeSet};

use approx::assert_abs_diff_eq;
use chem_core::calculations::molar_mass::ElementContribution;
use chem_core::config::{self, EngineConfig};
use chem_core::{
    molar_mass, normalize, parse_to_counts, stoichiometry, AtomicMassTable, CalcError, CalculationItem,
    ChemEngine, FormulaCounts, ParseMode, StoichiometryResult,
};

fn counts(pairs: &[(&str, u32)]) -> FormulaCounts {
    pairs.iter().map(|(s, n)| (s.to_string(), *n)).collect()
}

#[test]
fn breakdown_matches_symbols_and_sum() {
    let table = AtomicMassTable::standard();
    for formula in ["H2O", "C6H12O6", "NaCl", "KMnO4", "Ca3P2O8", "C2H5OH", "Fe2S3"] {
        let result = molar_mass(formula).unwrap();
        let parsed = parse_to_counts(formula);

        let keys: BTreeSet<&str> = result.breakdown.keys().map(String::as_str).collect();
        let symbols: BTreeSet<&str> = parsed.keys().map(String::as_str).collect();
        assert_eq!(keys, symbols, "{}", formula);

        let expected: f64 = parsed
            .iter()
            .map(|(symbol, count)| f64::from(*count) * table.get(symbol).unwrap())
            .sum();
        assert_abs_diff_eq!(result.molar_mass, expected, epsilon = 1e-9);
    }
}

#[test]
fn parenthesis_expansion() {
    let grouped = molar_mass("Ca(OH)2").unwrap();
    let flat = molar_mass("CaO2H2").unwrap();
    assert_abs_diff_eq!(grouped.molar_mass, flat.molar_mass, epsilon = 1e-12);
    assert_eq!(parse_to_counts("Ca(OH)2"), counts(&[("Ca", 1), ("O", 2), ("H", 2)]));
}

#[test]
fn normalization_is_idempotent() {
    let inputs = [
        "",
        "H₂O",
        "SO₄²⁻",
        "NH₄⁺",
        "CuSO4·5H2O",
        "NaCl(aq)",
        "Fe3+",
        "SO4^2-",
        "  C6 H12 O6 ",
        "(aq)(s)",
        "H2O(l)(aq)+-",
        "Mg²⁺(aq)",
        "x^-",
    ];
    for input in inputs {
        let once = normalize(input);
        assert_eq!(normalize(&once), once, "input {:?}", input);
    }
}

#[test]
fn charge_and_state_stripping() {
    let sulfate = counts(&[("S", 1), ("O", 4)]);
    assert_eq!(parse_to_counts(&normalize("SO4^2-")), sulfate);
    assert_eq!(parse_to_counts(&normalize("SO4(aq)")), sulfate);
    assert_eq!(parse_to_counts("SO₄²⁻"), sulfate);
}

#[test]
fn unicode_subscripts_match_ascii() {
    let water = counts(&[("H", 2), ("O", 1)]);
    assert_eq!(parse_to_counts("H₂O"), water);
    assert_eq!(parse_to_counts("H2O"), water);
}

#[test]
fn unknown_element_fails_molar_mass() {
    assert_eq!(
        molar_mass("Xx2O").unwrap_err(),
        CalcError::UnknownElement { symbol: "Xx".to_string() }
    );
}

#[test]
fn limiting_reagent_tie_goes_to_first() {
    let masses = BTreeMap::from([("H2".to_string(), 4.032), ("O2".to_string(), 32.0)]);
    let result = stoichiometry("2H2 + O2 -> 2H2O", &masses);

    assert_abs_diff_eq!(result.moles["H2"], 2.0, epsilon = 1e-9);
    assert_abs_diff_eq!(result.moles["O2"], 1.0, epsilon = 1e-3);
    assert_eq!(result.limiting_reagent, "H2");
    assert_abs_diff_eq!(result.products["H2O"], 36.03, epsilon = 1e-2);
}

#[test]
fn malformed_equation_is_empty_not_error() {
    let result = stoichiometry("not an equation", &BTreeMap::new());
    assert_eq!(result, StoichiometryResult::default());
    assert!(result.moles.is_empty());
    assert!(result.limiting_reagent.is_empty());
    assert!(result.products.is_empty());
}

#[test]
fn glucose_scenario() {
    let result = molar_mass("C6H12O6").unwrap();
    assert_abs_diff_eq!(result.molar_mass, 180.156, epsilon = 1e-3);
    assert_eq!(result.breakdown["C"], ElementContribution { count: 6, atomic_mass: 12.011 });
    assert_eq!(result.breakdown["H"], ElementContribution { count: 12, atomic_mass: 1.008 });
    assert_eq!(result.breakdown["O"], ElementContribution { count: 6, atomic_mass: 15.999 });
}

#[test]
fn strict_mode_reports_position() {
    let engine = ChemEngine::default().with_parse_mode(ParseMode::Strict);
    assert_eq!(
        engine.parse_to_counts("H2O#").unwrap_err(),
        CalcError::MalformedFormula { character: '#', position: 3 }
    );
    assert!(matches!(
        engine.molar_mass("Ca(OH2").unwrap_err(),
        CalcError::UnbalancedParentheses { .. }
    ));
    // Lenient: the stray character is skipped.
    assert_eq!(parse_to_counts("H2O#"), counts(&[("H", 2), ("O", 1)]));
}

#[test]
fn engine_from_config_files() {
    let dir = tempfile::tempdir().unwrap();
    let table_path = dir.path().join("masses.json");
    let config_path = dir.path().join("beaker.json");

    let table = AtomicMassTable::new(BTreeMap::from([
        ("H".to_string(), 1.0),
        ("O".to_string(), 16.0),
    ]))
    .unwrap();
    config::save_mass_table(&table, &table_path).unwrap();
    config::save_config(
        &EngineConfig {
            parse_mode: ParseMode::Strict,
            atomic_mass_table: Some("masses.json".into()),
        },
        &config_path,
    )
    .unwrap();

    let engine = ChemEngine::from_config(&config::load_config(&config_path).unwrap()).unwrap();
    assert_eq!(engine.parse_mode(), ParseMode::Strict);
    assert_eq!(engine.molar_mass("H2O").unwrap().molar_mass, 18.0);
    assert_eq!(engine.molar_mass("NaCl").unwrap_err(), CalcError::unknown_element("Na"));
}

#[test]
fn calculation_item_from_json() {
    let item: CalculationItem = serde_json::from_str(
        r#"{"type":"Concentration","solve_for":"mass_to_molarity","mass_g":40.0,"solute":"NaOH","volume_l":1.0}"#,
    )
    .unwrap();
    assert_eq!(item.calc_type(), "Concentration");
    let out = item.run(ChemEngine::standard()).unwrap();
    assert_abs_diff_eq!(out["value"].as_f64().unwrap(), 40.0 / 39.997, epsilon = 1e-9);
}
