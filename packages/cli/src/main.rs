use std::process::ExitCode;

use clap::{ArgAction, Parser};
use colored::Colorize;
use serde::Serialize;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};
use tautology::{
    explanation::{DiscardedExplanation, Explanation},
    parse_expression, Cell, ExpressionTree, ParseError, ParseOptions, DEFAULT_MAX_VARIABLES,
};

/// Checks whether a propositional expression is a tautology and prints its truth table.
///
/// Connectives: ! (not), ^ or & (and), | (or), > or -> or => (implies),
/// = or <-> or <=> (equivalent), ~ (not equivalent). Binary connectives group
/// strictly left to right.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Expression to analyze, e.g. "(a -> b) & a -> b".
    expression: String,

    /// Maximum number of distinct variables.
    #[arg(long, default_value_t = DEFAULT_MAX_VARIABLES)]
    max_variables: usize,

    /// Print every step taken while parsing.
    #[arg(long)]
    explain: bool,

    /// Print the parsed tree.
    #[arg(long)]
    tree: bool,

    /// Print the report as JSON instead of text.
    #[arg(long, conflicts_with_all = ["explain", "tree"])]
    json: bool,

    /// Increase logging verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Serialize)]
struct Report<'a> {
    original: &'a str,
    expression: String,
    tautology: bool,
    truth_table: Vec<Vec<Cell>>,
}

#[derive(Debug, Serialize)]
struct ErrorReport<'a> {
    original: &'a str,
    error: String,
}

fn init_logger(verbosity: u8) -> color_eyre::Result<()> {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )?;

    Ok(())
}

fn parse(cli: &Cli) -> Result<ExpressionTree, ParseError> {
    let options = ParseOptions::new().max_variables(cli.max_variables);

    if !cli.explain {
        return parse_expression(&cli.expression, options, &mut DiscardedExplanation);
    }

    let mut explanation = Explanation::new(format!("Parsing \"{}\"", cli.expression));
    let result = parse_expression(&cli.expression, options, &mut explanation);

    println!("{explanation}");

    result
}

fn print_report(cli: &Cli, tree: &ExpressionTree) {
    let tautology = tree.is_tautology();

    println!("{} {}", "Original:".bold(), cli.expression);
    println!("{} {}", "Expression:".bold(), tree.to_string().blue());
    println!(
        "{} {}",
        "Tautology:".bold(),
        if tautology { "yes".green() } else { "no".red() }
    );

    if cli.tree {
        println!("\n{}", tree.get_tree());
    }

    println!("\n{}", tree.truth_table());
}

fn print_json_report(cli: &Cli, tree: &ExpressionTree) -> color_eyre::Result<()> {
    let report = Report {
        original: &cli.expression,
        expression: tree.to_string(),
        tautology: tree.is_tautology(),
        truth_table: tree.truth_table().grid(),
    };

    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}

fn main() -> color_eyre::Result<ExitCode> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_logger(cli.verbose)?;

    log::info!("Analyzing \"{}\"", cli.expression);

    let tree = match parse(&cli) {
        Ok(tree) => tree,
        Err(error) => {
            if cli.json {
                let report = ErrorReport {
                    original: &cli.expression,
                    error: error.to_string(),
                };

                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                eprintln!("{} {error}", "Error:".red().bold());
            }

            return Ok(ExitCode::FAILURE);
        }
    };

    if cli.json {
        print_json_report(&cli, &tree)?;
    } else {
        print_report(&cli, &tree);
    }

    Ok(ExitCode::SUCCESS)
}
