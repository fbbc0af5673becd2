use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use serde::Serialize;

use ipval_core::Ipv4Address;
use ipval_subnet::Subnet;

mod batch;

/// Validate and normalize IPv4 addresses and subnet notations
#[derive(Parser)]
#[command(name = "ipval")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "human", global = true)]
    output: OutputFormat,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a subnet or address string
    Check(CheckArgs),
    /// Normalize a subnet and show its derived addresses
    Info(InfoArgs),
    /// Test whether an address falls inside a subnet
    Contains(ContainsArgs),
    /// Validate subnets from a file or stdin, one per line
    Batch(BatchArgs),
}

#[derive(Parser)]
struct CheckArgs {
    /// Subnet in wildcard, slash or bare-address notation
    #[arg(value_name = "TARGET")]
    target: String,

    /// Validate as a plain dotted-decimal address instead of a subnet
    #[arg(short, long)]
    address: bool,
}

#[derive(Parser)]
struct InfoArgs {
    /// Subnet in any accepted notation
    #[arg(value_name = "SUBNET")]
    subnet: String,
}

#[derive(Parser)]
struct ContainsArgs {
    /// Subnet in any accepted notation
    #[arg(value_name = "SUBNET")]
    subnet: String,

    /// Address to test
    #[arg(value_name = "ADDRESS")]
    address: String,
}

#[derive(Parser)]
struct BatchArgs {
    /// Input file (use '-' for stdin)
    #[arg(short, long, value_name = "FILE")]
    file: Option<String>,

    /// Number of worker threads (default: CPU cores * 2)
    #[arg(short, long)]
    threads: Option<usize>,
}

#[derive(Debug, Clone, ValueEnum)]
enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output (pretty-printed)
    Json,
    /// JSON output (compact)
    JsonCompact,
    /// CSV output
    Csv,
}

#[derive(Serialize)]
struct CheckResult {
    input: String,
    kind: &'static str,
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    canonical: Option<String>,
}

#[derive(Serialize)]
struct InfoResult {
    input: String,
    network: String,
    mask: String,
    prefix_len: u8,
    broadcast: String,
    canonical: String,
}

#[derive(Serialize)]
struct ContainsResult {
    subnet: String,
    address: String,
    in_range: bool,
}

#[derive(Serialize)]
struct BatchRow {
    input: String,
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    canonical: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl From<&batch::BatchResult> for BatchRow {
    fn from(entry: &batch::BatchResult) -> Self {
        match &entry.result {
            Ok(subnet) => Self {
                input: entry.input.clone(),
                valid: true,
                canonical: Some(subnet.to_string()),
                error: None,
            },
            Err(message) => Self {
                input: entry.input.clone(),
                valid: false,
                canonical: None,
                error: Some(message.clone()),
            },
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check(args) => handle_check(args, cli.output, cli.verbose)?,
        Commands::Info(args) => handle_info(args, cli.output, cli.verbose)?,
        Commands::Contains(args) => handle_contains(args, cli.output, cli.verbose)?,
        Commands::Batch(args) => handle_batch(args, cli.output, cli.verbose)?,
    }

    Ok(())
}

fn handle_check(args: CheckArgs, format: OutputFormat, verbose: bool) -> Result<()> {
    let kind = if args.address { "address" } else { "subnet" };

    if verbose {
        eprintln!("{} Checking {}: {}", "›".blue(), kind, args.target);
    }

    let canonical = if args.address {
        Ipv4Address::parse(&args.target).ok().map(|addr| addr.to_string())
    } else {
        Subnet::parse(&args.target).ok().map(|subnet| subnet.to_string())
    };

    let result = CheckResult {
        valid: canonical.is_some(),
        input: args.target,
        kind,
        canonical,
    };

    print_check(&result, format)?;

    if !result.valid {
        std::process::exit(1);
    }

    Ok(())
}

fn handle_info(args: InfoArgs, format: OutputFormat, verbose: bool) -> Result<()> {
    if verbose {
        eprintln!("{} Normalizing: {}", "›".blue(), args.subnet);
    }

    let subnet = Subnet::parse(&args.subnet)?;

    let result = InfoResult {
        input: args.subnet,
        network: subnet.network().to_string(),
        mask: subnet.mask().to_string(),
        prefix_len: subnet.prefix_len(),
        broadcast: subnet.broadcast().to_string(),
        canonical: subnet.to_string(),
    };

    print_info(&result, format)?;

    Ok(())
}

fn handle_contains(args: ContainsArgs, format: OutputFormat, verbose: bool) -> Result<()> {
    if verbose {
        eprintln!("{} Testing {} against {}", "›".blue(), args.address, args.subnet);
    }

    let subnet = Subnet::parse(&args.subnet)?;
    let in_range = subnet.is_in_range(&args.address)?;

    let result = ContainsResult {
        subnet: subnet.to_string(),
        address: args.address,
        in_range,
    };

    print_contains(&result, format)?;

    if !result.in_range {
        std::process::exit(1);
    }

    Ok(())
}

fn handle_batch(args: BatchArgs, format: OutputFormat, verbose: bool) -> Result<()> {
    if verbose {
        match args.file.as_deref() {
            Some("-") | None => eprintln!("{} Reading from stdin", "›".blue()),
            Some(path) => eprintln!("{} Reading from: {}", "›".blue(), path),
        }
    }

    let lines = read_lines(args.file.as_deref())?;

    let processor = batch::BatchProcessor::new(args.threads)?;

    if verbose {
        eprintln!(
            "{} Validating {} lines with {} threads",
            "›".blue(),
            lines.len(),
            processor.thread_count()
        );
    }

    let results = processor.process_lines(lines);
    let invalid = results.iter().filter(|entry| entry.result.is_err()).count();

    print_batch(&results, format)?;

    if verbose {
        eprintln!(
            "{} {} valid, {} invalid",
            "›".blue(),
            results.len() - invalid,
            invalid
        );
    }

    if invalid > 0 {
        std::process::exit(1);
    }

    Ok(())
}

fn read_lines(file: Option<&str>) -> Result<Vec<String>> {
    let content = match file {
        Some("-") | None => std::io::read_to_string(std::io::stdin())?,
        Some(path) => std::fs::read_to_string(path)?,
    };

    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

fn print_check(result: &CheckResult, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Human => {
            if result.valid {
                let canonical = result.canonical.as_deref().unwrap_or_default();
                println!(
                    "{} {} is a valid {} ({})",
                    "✓".green(),
                    result.input.bold(),
                    result.kind,
                    canonical
                );
            } else {
                println!(
                    "{} {} is not a valid {}",
                    "✗".red(),
                    result.input.bold(),
                    result.kind
                );
            }
        }
        OutputFormat::Json => print_json(result, true)?,
        OutputFormat::JsonCompact => print_json(result, false)?,
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(std::io::stdout());
            wtr.write_record(["input", "kind", "valid", "canonical"])?;
            wtr.write_record([
                result.input.as_str(),
                result.kind,
                if result.valid { "true" } else { "false" },
                result.canonical.as_deref().unwrap_or(""),
            ])?;
            wtr.flush()?;
        }
    }

    Ok(())
}

fn print_info(result: &InfoResult, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Human => {
            println!();
            println!("{}", "Subnet Details".bold().cyan());
            println!("{}", "─".repeat(50).dimmed());
            println!("{:>12}: {}", "Input".bold(), result.input);
            println!("{:>12}: {}", "Network".bold(), result.network.green());
            println!("{:>12}: {}", "Mask".bold(), result.mask);
            println!("{:>12}: /{}", "Prefix".bold(), result.prefix_len);
            println!("{:>12}: {}", "Broadcast".bold(), result.broadcast);
            println!("{:>12}: {}", "Canonical".bold(), result.canonical.cyan());
            println!();
        }
        OutputFormat::Json => print_json(result, true)?,
        OutputFormat::JsonCompact => print_json(result, false)?,
        OutputFormat::Csv => {
            let prefix_len = result.prefix_len.to_string();
            let mut wtr = csv::Writer::from_writer(std::io::stdout());
            wtr.write_record([
                "input",
                "network",
                "mask",
                "prefix_len",
                "broadcast",
                "canonical",
            ])?;
            wtr.write_record([
                result.input.as_str(),
                result.network.as_str(),
                result.mask.as_str(),
                prefix_len.as_str(),
                result.broadcast.as_str(),
                result.canonical.as_str(),
            ])?;
            wtr.flush()?;
        }
    }

    Ok(())
}

fn print_contains(result: &ContainsResult, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Human => {
            if result.in_range {
                println!(
                    "{} {} is in {}",
                    "✓".green(),
                    result.address.bold(),
                    result.subnet
                );
            } else {
                println!(
                    "{} {} is not in {}",
                    "✗".red(),
                    result.address.bold(),
                    result.subnet
                );
            }
        }
        OutputFormat::Json => print_json(result, true)?,
        OutputFormat::JsonCompact => print_json(result, false)?,
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(std::io::stdout());
            wtr.write_record(["subnet", "address", "in_range"])?;
            wtr.write_record([
                result.subnet.as_str(),
                result.address.as_str(),
                if result.in_range { "true" } else { "false" },
            ])?;
            wtr.flush()?;
        }
    }

    Ok(())
}

fn print_batch(results: &[batch::BatchResult], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Human => {
            for entry in results {
                match &entry.result {
                    Ok(subnet) => {
                        println!("{} {} -> {}", "✓".green(), entry.input, subnet)
                    }
                    Err(message) => {
                        println!("{} {}: {}", "✗".red(), entry.input, message)
                    }
                }
            }
        }
        OutputFormat::Json => {
            let rows: Vec<BatchRow> = results.iter().map(BatchRow::from).collect();
            print_json(&rows, true)?;
        }
        OutputFormat::JsonCompact => {
            let rows: Vec<BatchRow> = results.iter().map(BatchRow::from).collect();
            print_json(&rows, false)?;
        }
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(std::io::stdout());
            wtr.write_record(["input", "valid", "canonical", "error"])?;
            for entry in results {
                let (valid, canonical, error) = match &entry.result {
                    Ok(subnet) => ("true", subnet.to_string(), String::new()),
                    Err(message) => ("false", String::new(), message.clone()),
                };
                wtr.write_record([
                    entry.input.as_str(),
                    valid,
                    canonical.as_str(),
                    error.as_str(),
                ])?;
            }
            wtr.flush()?;
        }
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };

    println!("{}", json);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::parse_from(["ipval", "check", "10.0.0.0/8"]);
        assert!(matches!(cli.command, Commands::Check(_)));
        assert!(matches!(cli.output, OutputFormat::Human));
        assert!(!cli.verbose);
    }

    #[test]
    fn test_output_format_flag() {
        let cli = Cli::parse_from(["ipval", "--output", "json", "info", "10.0.0.0/8"]);
        assert!(matches!(cli.output, OutputFormat::Json));
    }

    #[test]
    fn test_global_flag_after_subcommand() {
        let cli = Cli::parse_from(["ipval", "info", "10.0.0.0/8", "-o", "csv", "-v"]);
        assert!(matches!(cli.output, OutputFormat::Csv));
        assert!(cli.verbose);
    }

    #[test]
    fn test_check_address_flag() {
        let cli = Cli::parse_from(["ipval", "check", "--address", "10.0.0.1"]);
        if let Commands::Check(args) = cli.command {
            assert!(args.address);
            assert_eq!(args.target, "10.0.0.1");
        } else {
            panic!("Expected Check command");
        }
    }

    #[test]
    fn test_contains_command() {
        let cli = Cli::parse_from(["ipval", "contains", "192.168.0.0/24", "192.168.0.17"]);
        if let Commands::Contains(args) = cli.command {
            assert_eq!(args.subnet, "192.168.0.0/24");
            assert_eq!(args.address, "192.168.0.17");
        } else {
            panic!("Expected Contains command");
        }
    }

    #[test]
    fn test_batch_command() {
        let cli = Cli::parse_from(["ipval", "batch", "--file", "subnets.txt", "--threads", "4"]);
        if let Commands::Batch(args) = cli.command {
            assert_eq!(args.file.as_deref(), Some("subnets.txt"));
            assert_eq!(args.threads, Some(4));
        } else {
            panic!("Expected Batch command");
        }
    }

    #[test]
    fn test_batch_row_from_result() {
        let ok = batch::BatchResult {
            input: "10.*.*.*".to_string(),
            result: Ok(Subnet::parse("10.*.*.*").unwrap()),
        };
        let row = BatchRow::from(&ok);
        assert!(row.valid);
        assert_eq!(row.canonical.as_deref(), Some("10.0.0.0/255.0.0.0"));
        assert!(row.error.is_none());

        let err = batch::BatchResult {
            input: "10.0.0.0/33".to_string(),
            result: Err("'10.0.0.0/33' is not a valid subnet".to_string()),
        };
        let row = BatchRow::from(&err);
        assert!(!row.valid);
        assert!(row.canonical.is_none());
        assert!(row.error.is_some());
    }
}
