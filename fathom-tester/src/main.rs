mod scenarios;

use anyhow::{Context, Result, bail};
use clap::Parser;
use colored::Colorize;
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::PathBuf;
use std::time::Instant;

use scenarios::{ScenarioResult, resolve_seeds, run_scenario, select};

#[derive(Debug, Parser)]
#[command(name = "fathom-tester", version = "0.1.0")]
#[command(about = "Automated QA testing for the Fathom dive engine - pure logic scenarios")]
struct Args {
    /// Scenarios to run (comma-separated, or `all`)
    #[arg(long, default_value = "all")]
    scenarios: String,

    /// List all available scenarios and exit
    #[arg(long)]
    list_scenarios: bool,

    /// Seeds to run (comma-separated; integers, 0x-hex, or DV- dive codes)
    #[arg(long, default_value = "1337")]
    seeds: String,

    /// Output report format
    #[arg(long, default_value = "console")]
    #[arg(value_parser = ["json", "console"])]
    report: String,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.list_scenarios {
        println!("{}", "Available scenarios:".bold());
        for scenario in scenarios::catalog() {
            println!("  {:<12} {}", scenario.name.cyan(), scenario.desc);
        }
        return Ok(());
    }

    println!("{}", "Fathom engine tester".bold().blue());

    let start_time = Instant::now();
    let selected = select(&split_csv(&args.scenarios))?;
    let seeds = resolve_seeds(&split_csv(&args.seeds))?;
    if seeds.is_empty() {
        bail!("no seeds to run");
    }

    let mut results = Vec::new();
    for scenario in &selected {
        for &seed in &seeds {
            let result = run_scenario(scenario, seed);
            if args.verbose {
                print_verbose(&result);
            }
            results.push(result);
        }
    }

    match args.report.as_str() {
        "json" => write_json_report(&args.output, &results)?,
        _ => print_console_report(&results),
    }

    let failed = results.iter().filter(|r| !r.passed).count();
    let elapsed = start_time.elapsed();
    if failed == 0 {
        println!(
            "{} {} runs in {:.2?}",
            "PASS".green().bold(),
            results.len(),
            elapsed
        );
        Ok(())
    } else {
        println!(
            "{} {failed}/{} runs failed in {:.2?}",
            "FAIL".red().bold(),
            results.len(),
            elapsed
        );
        std::process::exit(1);
    }
}

fn split_csv(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn print_verbose(result: &ScenarioResult) {
    let status = if result.passed {
        "ok".green()
    } else {
        "failed".red()
    };
    println!(
        "  {} {} seed={} ({}) ticks={} discovered={} score={}",
        status,
        result.scenario,
        result.seed,
        result.seed_code,
        result.stats.ticks,
        result.stats.discovered,
        result.stats.score,
    );
    if let Some(error) = &result.error {
        println!("    {}", error.red());
    }
}

fn print_console_report(results: &[ScenarioResult]) {
    println!(
        "{:<12} {:<18} {:>6} {:>6} {:>7} {:>9} {:>8}",
        "SCENARIO".bold(),
        "SEED".bold(),
        "TICKS".bold(),
        "FOUND".bold(),
        "SCORE".bold(),
        "MAXDEPTH".bold(),
        "STATUS".bold(),
    );
    for result in results {
        let status = if result.passed {
            "pass".green()
        } else {
            "fail".red()
        };
        println!(
            "{:<12} {:<18} {:>6} {:>6} {:>7} {:>9.1} {:>8}",
            result.scenario,
            result.seed_code,
            result.stats.ticks,
            result.stats.discovered,
            result.stats.score,
            result.stats.max_depth_reached,
            status,
        );
        if let Some(error) = &result.error {
            println!("  {} {}", "error:".red(), error);
        }
    }
}

fn write_json_report(output: &Option<PathBuf>, results: &[ScenarioResult]) -> Result<()> {
    let payload = serde_json::to_string_pretty(results)?;
    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("cannot create report at {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            writer.write_all(payload.as_bytes())?;
            writer.flush()?;
        }
        None => {
            let mut out = stdout().lock();
            out.write_all(payload.as_bytes())?;
            out.write_all(b"\n")?;
        }
    }
    Ok(())
}
