use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use chem_core::calculations::acid_base::{self, ConjugatePair, ProtonRole};
use chem_core::calculations::concentration::{self, ConcentrationInput, ConcentrationResult, Solute};
use chem_core::calculations::empirical_formula::{self, ElementPercentage, EmpiricalFormulaInput};
use chem_core::calculations::gas_law::{self, CombinedGasInput, GasLawInput, IdealGasInput};
use chem_core::calculations::percent_yield::{self, YieldInput};
use chem_core::calculations::ph::{self, PhInput};
use chem_core::calculations::CalculationItem;
use chem_core::config::{self, EngineConfig};
use chem_core::equation::reactant_labels;
use chem_core::units::{self, Unit};
use chem_core::{normalize, CalcError, CalcResult, ChemEngine};
use log::info;
use serde::Serialize;

use crate::cli::{Command, ConcCommand, GasCommand, GlobalOptions, PhArgs, YieldCommand};

/// A command's result in both output forms.
pub struct Report {
    pub json: serde_json::Value,
    pub text: String,
}

impl Report {
    fn new<T: Serialize>(value: &T, text: String) -> CalcResult<Self> {
        Ok(Report {
            json: serde_json::to_value(value)?,
            text,
        })
    }
}

/// Build the engine from `--config`, then apply `--table` and `--strict`.
pub fn build_engine(global: &GlobalOptions) -> CalcResult<ChemEngine> {
    let mut engine_config = match &global.config {
        Some(path) => config::load_config(path)?,
        None => EngineConfig::default(),
    };
    if let Some(table) = &global.table {
        engine_config.atomic_mass_table = Some(table.clone());
    }
    if global.strict {
        engine_config.parse_mode = chem_core::ParseMode::Strict;
    }
    info!("engine config: {:?}", engine_config);
    ChemEngine::from_config(&engine_config)
}

pub fn dispatch(command: Command, engine: &ChemEngine) -> CalcResult<Report> {
    match command {
        Command::Mass { formula } => mass(engine, &formula),
        Command::Parse { formula } => parse(engine, &formula),
        Command::Stoich { equation, masses } => stoich(engine, &equation, masses),
        Command::Ph(args) => ph(args),
        Command::Gas { law } => gas(law),
        Command::Conc { solve } => conc(engine, solve),
        Command::Yield { solve } => yield_(solve),
        Command::Empirical { elements, molar_mass } => empirical(engine, elements, molar_mass),
        Command::Convert {
            value,
            from,
            to,
            molar_mass,
        } => convert(value, from, to, molar_mass),
        Command::Pairs { equation } => pairs(&equation),
        Command::Table => table(engine),
        Command::Run { file } => run(engine, &file),
    }
}

fn mass(engine: &ChemEngine, formula: &str) -> CalcResult<Report> {
    let result = engine.molar_mass(formula)?;
    let mut text = format!("{}: {:.3} g/mol\n", result.formula, result.molar_mass);
    for (symbol, part) in &result.breakdown {
        let share = result.mass_fraction(symbol).unwrap_or(0.0) * 100.0;
        let _ = writeln!(
            text,
            "  {:<2} {:>4} × {:>8.3} = {:>9.3} g/mol  ({:.2}%)",
            symbol,
            part.count,
            part.atomic_mass,
            part.subtotal(),
            share
        );
    }
    Report::new(&result, text)
}

fn parse(engine: &ChemEngine, formula: &str) -> CalcResult<Report> {
    let normalized = normalize(formula);
    let counts = engine.parse_to_counts(formula)?;
    let mut text = format!("normalized: {}\n", normalized);
    for (symbol, count) in &counts {
        let _ = writeln!(text, "  {:<2} {}", symbol, count);
    }
    let json = serde_json::json!({ "normalized": normalized, "counts": counts });
    Ok(Report { json, text })
}

fn stoich(engine: &ChemEngine, equation: &str, masses: Vec<(String, f64)>) -> CalcResult<Report> {
    let masses: BTreeMap<String, f64> = masses.into_iter().collect();
    let result = engine.stoichiometry(equation, &masses);

    let mut text = String::new();
    if result.is_empty() {
        text.push_str("No result. Check the equation and element symbols.\n");
        return Report::new(&result, text);
    }

    // Report reactants in equation order rather than map order.
    text.push_str("Moles:\n");
    for label in &reactant_labels(equation) {
        if let Some(n) = result.moles.get(label) {
            let _ = writeln!(text, "  {:<10} {:.4} mol", label, n);
        }
    }
    if result.has_limiting_reagent() {
        let _ = writeln!(text, "Limiting reagent: {}", result.limiting_reagent);
        text.push_str("Theoretical products:\n");
        for (product, grams) in &result.products {
            let _ = writeln!(text, "  {:<10} {:.3} g", product, grams);
        }
    } else {
        text.push_str("Enter a positive mass for at least one reactant.\n");
    }
    Report::new(&result, text)
}

fn ph(args: PhArgs) -> CalcResult<Report> {
    let input = match (args.ph, args.poh, args.hydrogen, args.hydroxide) {
        (Some(v), ..) => PhInput::Ph(v),
        (_, Some(v), ..) => PhInput::Poh(v),
        (_, _, Some(c), _) => PhInput::HydrogenConcentration(c),
        (_, _, _, Some(c)) => PhInput::HydroxideConcentration(c),
        _ => return Err(CalcError::missing_field("ph")),
    };
    let result = ph::calculate(&input)?;
    let text = format!(
        "pH    = {:.3}\npOH   = {:.3}\n[H+]  = {:.3e} mol/L\n[OH-] = {:.3e} mol/L\n{}\n",
        result.ph, result.poh, result.h_concentration, result.oh_concentration, result.classification
    );
    Report::new(&result, text)
}

fn gas(law: GasCommand) -> CalcResult<Report> {
    let input = match law {
        GasCommand::Ideal {
            pressure,
            volume,
            moles,
            temperature,
        } => GasLawInput::Ideal(IdealGasInput {
            pressure_atm: pressure,
            volume_l: volume,
            moles,
            temperature_k: temperature,
        }),
        GasCommand::Combined { p1, v1, t1, p2, v2, t2 } => GasLawInput::Combined(CombinedGasInput {
            initial_pressure_atm: p1,
            initial_volume_l: v1,
            initial_temperature_k: t1,
            final_pressure_atm: p2,
            final_volume_l: v2,
            final_temperature_k: t2,
        }),
    };
    let result = gas_law::calculate(&input)?;
    let mut text = format!("{:.3} {}  ({})\n", result.value, result.unit, result.formula);
    if let Some(celsius) = result.celsius {
        let _ = writeln!(text, "= {:.1} °C", celsius);
    }
    Report::new(&result, text)
}

fn conc(engine: &ChemEngine, solve: ConcCommand) -> CalcResult<Report> {
    let input = match solve {
        ConcCommand::Molarity { moles, volume } => ConcentrationInput::Molarity { moles, volume_l: volume },
        ConcCommand::Moles { molarity, volume } => ConcentrationInput::Moles { molarity, volume_l: volume },
        ConcCommand::Volume { moles, molarity } => ConcentrationInput::Volume { moles, molarity },
        ConcCommand::FromMass { mass, solute, volume } => ConcentrationInput::MassToMolarity {
            mass_g: mass,
            solute: match solute.trim().parse::<f64>() {
                Ok(molar_mass) => Solute::MolarMass(molar_mass),
                Err(_) => Solute::Formula(solute),
            },
            volume_l: volume,
        },
    };
    let result = concentration::calculate(engine, &input)?;
    Report::new(&result, concentration_text(&result))
}

fn concentration_text(result: &ConcentrationResult) -> String {
    let mut text = format!("{:.4} {}  ({})\n", result.value, result.unit, result.formula);
    if let (Some(moles), Some(molar_mass)) = (result.moles, result.molar_mass) {
        let _ = writeln!(text, "moles = {:.4} mol (MM = {:.3} g/mol)", moles, molar_mass);
    }
    text
}

fn yield_(solve: YieldCommand) -> CalcResult<Report> {
    let input = match solve {
        YieldCommand::Percent { actual, theoretical } => YieldInput::Percent { actual, theoretical },
        YieldCommand::Actual { percent, theoretical } => YieldInput::Actual { percent, theoretical },
        YieldCommand::Theoretical { actual, percent } => YieldInput::Theoretical { actual, percent },
    };
    let result = percent_yield::calculate(&input)?;
    let mut text = format!("{:.2} {}  ({})\n", result.value, result.unit, result.formula);
    if let Some(efficiency) = result.efficiency {
        let _ = writeln!(text, "{}", efficiency.description());
    }
    Report::new(&result, text)
}

fn empirical(engine: &ChemEngine, elements: Vec<(String, f64)>, molar_mass: Option<f64>) -> CalcResult<Report> {
    let input = EmpiricalFormulaInput {
        elements: elements
            .into_iter()
            .map(|(element, pct)| ElementPercentage::new(element, pct))
            .collect(),
        molecular_mass: molar_mass,
    };
    let result = empirical_formula::calculate(engine, &input)?;
    let mut text = format!(
        "Empirical formula: {} ({:.3} g/mol)\n",
        result.empirical_formula, result.empirical_mass
    );
    for r in &result.ratios {
        let _ = writeln!(text, "  {:<2} {:.4} mol  ratio {:.3}  → {}", r.element, r.moles, r.ratio, r.count);
    }
    if molar_mass.is_some() {
        let _ = writeln!(
            text,
            "Molecular formula: {} (× {})",
            result.molecular_formula, result.molecular_multiplier
        );
    }
    Report::new(&result, text)
}

fn convert(value: f64, from: Unit, to: Unit, molar_mass: Option<f64>) -> CalcResult<Report> {
    let converted = units::convert(value, from, to, molar_mass)?;
    let result = units::ConversionResult { value: converted, unit: to };
    let text = format!("{} {} = {} {}\n", value, from, converted, to);
    Report::new(&result, text)
}

fn pairs(equation: &str) -> CalcResult<Report> {
    let found: Vec<ConjugatePair> = acid_base::conjugate_pairs(equation);
    let mut text = String::new();
    if found.is_empty() {
        text.push_str("No conjugate pairs found.\n");
    }
    for pair in &found {
        let role = match pair.role {
            ProtonRole::Acid => "acid",
            ProtonRole::Base => "base",
        };
        let _ = writeln!(text, "{:<4} {} → {}   pair: {}", role, pair.reactant, pair.conjugate, pair.pair);
    }
    Report::new(&found, text)
}

fn table(engine: &ChemEngine) -> CalcResult<Report> {
    let mut text = String::new();
    for (symbol, mass) in engine.table().iter() {
        let _ = writeln!(text, "{:<2} {:>8.3}", symbol, mass);
    }
    Report::new(engine.table(), text)
}

fn run(engine: &ChemEngine, path: &Path) -> CalcResult<Report> {
    let contents = fs::read_to_string(path)
        .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))?;
    let item: CalculationItem = serde_json::from_str(&contents)?;
    info!("running {} from {}", item.calc_type(), path.display());
    let json = item.run(engine)?;
    let text = format!("{}\n", serde_json::to_string_pretty(&json)?);
    Ok(Report { json, text })
}
