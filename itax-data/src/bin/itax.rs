use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use itax_core::{
    AgeBracket, IncomeProfile, Regime, TaxCalculator, TaxError, TaxRequest, TaxRules,
};
use itax_data::parse::{self, KeyAmount, ParseAmountError};
use itax_data::report::{self, BreakdownReport, ComparisonReport};
use itax_data::{loader, logging, rules_file};
use rust_decimal::Decimal;
use tracing::{debug, info};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Indian personal income tax calculator.
///
/// Computes liability under the New and Old regimes: slab tax, the section
/// 87A rebate, surcharge and the 4% health and education cess. Uses the
/// FY 2024-25 tables unless `--rules` points at another rules file.
#[derive(Debug, Parser)]
#[command(name = "itax")]
#[command(version, about, long_about = None)]
struct Cli {
    /// TOML file with slab, rebate, surcharge and cess tables
    #[arg(long, global = true, value_name = "FILE")]
    rules: Option<PathBuf>,

    /// Report format written to stdout
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Log more detail to stderr (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Calculate liability under one regime
    Calc {
        #[command(flatten)]
        profile: ProfileArgs,

        /// `new` or `old`
        #[arg(long, default_value = "new", value_parser = parse_regime)]
        regime: Regime,
    },

    /// Calculate under both regimes and recommend the cheaper one
    Compare {
        #[command(flatten)]
        profile: ProfileArgs,
    },

    /// Calculate every profile in a CSV file
    Batch {
        /// CSV with `regime`, `gross_income` and optional income and deduction columns
        file: PathBuf,

        /// Compare both regimes for each row instead of using its `regime` column
        #[arg(long, default_value_t = false)]
        compare: bool,
    },

    /// Print the rule tables in effect
    Rules,
}

#[derive(Debug, Args)]
struct ProfileArgs {
    /// Salary and other income counted under both regimes, e.g. 12,00,000
    #[arg(long, value_parser = parse_amount)]
    income: Decimal,

    /// `below60`, `senior` (60 to 80) or `super-senior` (above 80)
    #[arg(long, default_value = "below60", value_parser = parse_age)]
    age: AgeBracket,

    /// Deduction claim, repeatable; only the old regime uses these
    #[arg(
        short,
        long = "deduction",
        value_name = "SECTION=AMOUNT",
        value_parser = parse::parse_key_amount
    )]
    deductions: Vec<KeyAmount>,

    /// Non-salary income, repeatable; only the old regime counts these
    #[arg(long = "other", value_name = "HEAD=AMOUNT", value_parser = parse::parse_key_amount)]
    other_income: Vec<KeyAmount>,
}

impl ProfileArgs {
    fn to_request(
        &self,
        regime: Regime,
    ) -> Result<TaxRequest> {
        let other_income = parse::other_income_from_pairs(&self.other_income)?;
        let profile = IncomeProfile::new(self.income)
            .with_age(self.age)
            .with_other_income(other_income);
        let deductions = parse::deductions_from_claims(&self.deductions);
        Ok(TaxRequest::new(profile, regime).with_deductions(deductions))
    }
}

fn parse_amount(s: &str) -> Result<Decimal, ParseAmountError> {
    parse::parse_amount(s)
}

fn parse_regime(s: &str) -> Result<Regime, TaxError> {
    s.parse()
}

fn parse_age(s: &str) -> Result<AgeBracket, TaxError> {
    s.parse()
}

// ─── commands ────────────────────────────────────────────────────────────────

fn load_rules(path: Option<&Path>) -> Result<TaxRules> {
    match path {
        Some(path) => rules_file::load(path)
            .with_context(|| format!("Failed to load rules from: {}", path.display())),
        None => {
            debug!("using built-in FY 2024-25 rules");
            Ok(TaxRules::default())
        }
    }
}

fn run(
    command: Command,
    format: OutputFormat,
    rules: &TaxRules,
) -> Result<String> {
    let calculator = TaxCalculator::new(rules);

    let output = match command {
        Command::Calc { profile, regime } => {
            let breakdown = calculator
                .calculate(&profile.to_request(regime)?)
                .context("Failed to calculate tax")?;
            match format {
                OutputFormat::Text => report::render_breakdown(&breakdown),
                OutputFormat::Json => report::breakdown_json(&breakdown)?,
            }
        }
        Command::Compare { profile } => {
            let comparison = calculator
                .compare(&profile.to_request(Regime::default())?)
                .context("Failed to compare regimes")?;
            match format {
                OutputFormat::Text => report::render_comparison(&comparison),
                OutputFormat::Json => report::comparison_json(&comparison)?,
            }
        }
        Command::Batch { file, compare } => {
            let requests = loader::load_from_file(&file)
                .with_context(|| format!("Failed to load profiles from: {}", file.display()))?;
            info!(rows = requests.len(), file = %file.display(), "batch loaded");

            if compare {
                let comparisons = requests
                    .iter()
                    .map(|request| calculator.compare(request))
                    .collect::<Result<Vec<_>, _>>()?;
                match format {
                    OutputFormat::Text => {
                        report::render_batch(&comparisons, report::render_comparison)
                    }
                    OutputFormat::Json => {
                        report::batch_json::<_, ComparisonReport>(&comparisons)?
                    }
                }
            } else {
                let breakdowns = requests
                    .iter()
                    .map(|request| calculator.calculate(request))
                    .collect::<Result<Vec<_>, _>>()?;
                match format {
                    OutputFormat::Text => {
                        report::render_batch(&breakdowns, report::render_breakdown)
                    }
                    OutputFormat::Json => {
                        report::batch_json::<_, BreakdownReport>(&breakdowns)?
                    }
                }
            }
        }
        Command::Rules => match format {
            OutputFormat::Text => rules_file::to_toml_string(rules)?,
            OutputFormat::Json => serde_json::to_string_pretty(rules)?,
        },
    };
    Ok(output)
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_tracing(cli.verbose);

    let rules = load_rules(cli.rules.as_deref())?;
    let output = run(cli.command, cli.format, &rules)?;

    print!("{output}");
    if !output.ends_with('\n') {
        println!();
    }
    Ok(())
}
