use std::path::PathBuf;

use chem_core::units::Unit;
use clap::{ArgAction, Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "beaker",
    about = "Chemistry calculators: formulas, molar mass, stoichiometry and more",
    version,
    propagate_version = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOptions,

    #[command(subcommand)]
    pub command: Command,
}

/// Options accepted by every command.
#[derive(Args)]
pub struct GlobalOptions {
    /// Print results (and errors) as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Reject formulas with stray characters or unbalanced parentheses
    #[arg(long, global = true)]
    pub strict: bool,

    /// Atomic mass table (JSON object of symbol to g/mol)
    #[arg(long, value_name = "FILE", global = true)]
    pub table: Option<PathBuf>,

    /// Engine config file
    #[arg(long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Molar mass with per-element breakdown
    #[command(visible_alias = "m")]
    Mass { formula: String },

    /// Normalize a formula and count its atoms
    Parse { formula: String },

    /// Limiting reagent and theoretical product masses
    #[command(visible_alias = "s")]
    Stoich {
        /// Balanced equation, e.g. "2H2 + O2 -> 2H2O"
        equation: String,

        /// Reactant mass in grams, repeatable
        #[arg(long = "mass", value_name = "TERM=GRAMS", value_parser = parse_key_value, action = ArgAction::Append)]
        masses: Vec<(String, f64)>,
    },

    /// pH, pOH and ion concentrations from any one of them
    Ph(PhArgs),

    /// Ideal or combined gas law
    Gas {
        #[command(subcommand)]
        law: GasCommand,
    },

    /// Molarity, moles or volume of a solution
    Conc {
        #[command(subcommand)]
        solve: ConcCommand,
    },

    /// Percent, actual or theoretical yield
    Yield {
        #[command(subcommand)]
        solve: YieldCommand,
    },

    /// Empirical (and molecular) formula from percent composition
    Empirical {
        /// Element percentage, e.g. C=40.0
        #[arg(value_name = "EL=PCT", value_parser = parse_key_value, required = true)]
        elements: Vec<(String, f64)>,

        /// Molar mass of the compound, for the molecular formula
        #[arg(long, value_name = "G/MOL")]
        molar_mass: Option<f64>,
    },

    /// Convert between g, kg, mol, L, mL, m3, dm3, cm3, mm3 and particles
    Convert {
        #[arg(allow_hyphen_values = true)]
        value: f64,
        from: Unit,
        to: Unit,

        /// Needed whenever mass meets moles or particles
        #[arg(long, value_name = "G/MOL")]
        molar_mass: Option<f64>,
    },

    /// Conjugate acid/base pairs in a reaction
    Pairs { equation: String },

    /// List the active atomic mass table
    Table,

    /// Run a calculation described by a JSON file
    Run {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

#[derive(Args)]
#[group(required = true, multiple = false)]
pub struct PhArgs {
    #[arg(long)]
    pub ph: Option<f64>,

    #[arg(long)]
    pub poh: Option<f64>,

    /// [H+] in mol/L
    #[arg(long = "h", value_name = "MOL/L")]
    pub hydrogen: Option<f64>,

    /// [OH-] in mol/L
    #[arg(long = "oh", value_name = "MOL/L")]
    pub hydroxide: Option<f64>,
}

#[derive(Subcommand)]
pub enum GasCommand {
    /// PV = nRT; omit exactly one quantity
    Ideal {
        /// Pressure (atm)
        #[arg(long)]
        pressure: Option<f64>,
        /// Volume (L)
        #[arg(long)]
        volume: Option<f64>,
        #[arg(long)]
        moles: Option<f64>,
        /// Temperature (K)
        #[arg(long)]
        temperature: Option<f64>,
    },
    /// P1V1/T1 = P2V2/T2; omit exactly one final condition
    Combined {
        #[arg(long)]
        p1: f64,
        #[arg(long)]
        v1: f64,
        #[arg(long)]
        t1: f64,
        #[arg(long)]
        p2: Option<f64>,
        #[arg(long)]
        v2: Option<f64>,
        #[arg(long)]
        t2: Option<f64>,
    },
}

#[derive(Subcommand)]
pub enum ConcCommand {
    /// M = n / V
    Molarity {
        #[arg(long)]
        moles: f64,
        /// Liters
        #[arg(long)]
        volume: f64,
    },
    /// n = M × V
    Moles {
        #[arg(long)]
        molarity: f64,
        #[arg(long)]
        volume: f64,
    },
    /// V = n / M
    Volume {
        #[arg(long)]
        moles: f64,
        #[arg(long)]
        molarity: f64,
    },
    /// M = (mass / MM) / V
    FromMass {
        /// Grams of solute
        #[arg(long)]
        mass: f64,
        /// Molar mass in g/mol, or a formula
        #[arg(long)]
        solute: String,
        #[arg(long)]
        volume: f64,
    },
}

#[derive(Subcommand)]
pub enum YieldCommand {
    Percent {
        #[arg(long)]
        actual: f64,
        #[arg(long)]
        theoretical: f64,
    },
    Actual {
        #[arg(long)]
        percent: f64,
        #[arg(long)]
        theoretical: f64,
    },
    Theoretical {
        #[arg(long)]
        actual: f64,
        #[arg(long)]
        percent: f64,
    },
}

pub fn parse() -> Cli {
    Cli::parse()
}

/// `KEY=NUMBER`, split at the last `=`.
fn parse_key_value(s: &str) -> Result<(String, f64), String> {
    let (key, value) = s
        .rsplit_once('=')
        .ok_or_else(|| format!("expected KEY=NUMBER, got '{}'", s))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing name before '=' in '{}'", s));
    }
    let value = value
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("invalid number in '{}': {}", s, e))?;
    Ok((key.to_string(), value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_key_value() {
        assert_eq!(parse_key_value("H2=4.032").unwrap(), ("H2".to_string(), 4.032));
        assert_eq!(parse_key_value("H₂O = 18").unwrap(), ("H₂O".to_string(), 18.0));
        assert!(parse_key_value("H2").is_err());
        assert!(parse_key_value("=3").is_err());
        assert!(parse_key_value("O2=lots").is_err());
    }

    #[test]
    fn test_stoich_args() {
        let cli = Cli::try_parse_from([
            "beaker", "--json", "stoich", "2H2 + O2 -> 2H2O", "--mass", "H2=4.032", "--mass", "O2=32",
        ])
        .unwrap();
        assert!(cli.global.json);
        match cli.command {
            Command::Stoich { equation, masses } => {
                assert_eq!(equation, "2H2 + O2 -> 2H2O");
                assert_eq!(masses.len(), 2);
            }
            _ => panic!("expected stoich"),
        }
    }

    #[test]
    fn test_ph_needs_exactly_one() {
        assert!(Cli::try_parse_from(["beaker", "ph"]).is_err());
        assert!(Cli::try_parse_from(["beaker", "ph", "--ph", "3", "--poh", "11"]).is_err());
        assert!(Cli::try_parse_from(["beaker", "ph", "--oh", "0.01"]).is_ok());
    }

    #[test]
    fn test_convert_units() {
        let cli = Cli::try_parse_from(["beaker", "convert", "2", "mol", "L"]).unwrap();
        match cli.command {
            Command::Convert { from, to, .. } => {
                assert_eq!(from, Unit::Moles);
                assert_eq!(to, Unit::Liters);
            }
            _ => panic!("expected convert"),
        }
    }
}
