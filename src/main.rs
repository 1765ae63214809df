//! Compensation Projection CLI
//!
//! Command-line interface for projecting, comparing and stress-testing offers

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use comp_projection::{
    equity::vesting_schedule,
    math::{format_currency, round_to_nearest_thousand},
    offer::{load_json, load_offers},
    projection::{write_projections_csv_path, DEFAULT_PROJECTION_YEARS},
    request::{validate_comparison, validate_years},
    scenario_impact, BatchScenarioRequest, CompensationProjector, OfferProjection, ProjectionConfig,
    ScenarioEngine, ScenarioRequest,
};
use log::info;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "comp_projection", version, about = "Multi-year compensation offer projections")]
struct Cli {
    /// Number of years to project (1-6); overrides `projection_years` in request files
    #[arg(short, long, global = true)]
    years: Option<u32>,

    /// Also write yearly rows to this CSV file
    #[arg(long, global = true)]
    csv: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Project each offer in a JSON file with summary metrics
    Project { offers: PathBuf },

    /// Compare up to 10 offers side by side
    Compare { offers: PathBuf },

    /// Run a single scenario request (start date shift or exit)
    Scenario { request: PathBuf },

    /// Run a base offer against a list of scenario descriptors
    Batch { request: PathBuf },

    /// Show the year-by-year vesting schedule of every grant
    Vesting { offers: PathBuf },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let start = Instant::now();

    let years = cli.years.unwrap_or(DEFAULT_PROJECTION_YEARS);
    let projections = match &cli.command {
        Command::Project { offers } => project(offers, years)?,
        Command::Compare { offers } => compare(offers, years)?,
        Command::Scenario { request } => run_scenario(request, cli.years)?,
        Command::Batch { request } => run_batch(request, cli.years)?,
        Command::Vesting { offers } => {
            show_vesting(offers, years)?;
            Vec::new()
        }
    };

    if let Some(path) = &cli.csv {
        write_projections_csv_path(path, &projections)
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!("\nYearly rows written to: {}", path.display());
    }

    info!("Completed in {:?}", start.elapsed());
    Ok(())
}

fn project(path: &Path, years: u32) -> Result<Vec<OfferProjection>> {
    let offers = load_offers(path).with_context(|| format!("loading {}", path.display()))?;
    validate_comparison(&offers, years)?;

    let projector = CompensationProjector::new();
    let projections = projector.compare(&offers, years);
    for projection in &projections {
        print_projection(projection);
        print_summary(projection);
    }
    Ok(projections)
}

fn compare(path: &Path, years: u32) -> Result<Vec<OfferProjection>> {
    let offers = load_offers(path).with_context(|| format!("loading {}", path.display()))?;
    validate_comparison(&offers, years)?;

    let projector = CompensationProjector::new();
    let projections = projector.compare_parallel(&offers, years);

    println!("Comparison over {} year(s):", years);
    println!("{:<30} {:>14} {:>14} {:>14} {:>8}", "Offer", "Year 1", "Final Year", "Total", "CAGR");
    println!("{}", "-".repeat(84));
    for projection in &projections {
        let summary = projection.summary();
        println!(
            "{:<30} {:>14.2} {:>14.2} {:>14.2} {:>7.2}%",
            summary.offer_name,
            summary.first_year_total,
            summary.final_year_total,
            summary.total_value,
            summary.cagr * 100.0,
        );
    }

    if let Some(best) = projections
        .iter()
        .max_by(|a, b| a.total_value().total_cmp(&b.total_value()))
    {
        println!(
            "\nHighest total: {} (~{})",
            best.offer_name,
            format_currency(round_to_nearest_thousand(best.total_value()))
        );
    }
    Ok(projections)
}

fn run_scenario(path: &Path, years: Option<u32>) -> Result<Vec<OfferProjection>> {
    let mut request: ScenarioRequest = load_json(path).with_context(|| format!("loading {}", path.display()))?;
    if let Some(years) = years {
        request.projection_years = years;
    }
    request.validate()?;

    let engine = ScenarioEngine::new();
    let base = engine.project(&request.offer, request.projection_years);
    let scenario = engine.run_request(&request);

    print_projection(&base);
    print_projection(&scenario);
    print_impact(&base, &scenario)?;
    Ok(vec![base, scenario])
}

fn run_batch(path: &Path, years: Option<u32>) -> Result<Vec<OfferProjection>> {
    let mut request: BatchScenarioRequest = load_json(path).with_context(|| format!("loading {}", path.display()))?;
    if let Some(years) = years {
        request.projection_years = years;
    }
    request.validate()?;

    let engine = ScenarioEngine::with_config(ProjectionConfig {
        projection_years: request.projection_years,
        ..ProjectionConfig::default()
    });
    let projections = engine.run_batch(&request.base_offer, &request.scenarios);

    let Some((base, scenarios)) = projections.split_first() else {
        bail!("batch produced no base projection");
    };
    print_projection(base);
    for scenario in scenarios {
        print_projection(scenario);
        print_impact(base, scenario)?;
    }
    Ok(projections)
}

fn show_vesting(path: &Path, years: u32) -> Result<()> {
    validate_years(years)?;
    let offers = load_offers(path).with_context(|| format!("loading {}", path.display()))?;

    for offer in &offers {
        println!("\n{}", offer.name);
        for (i, grant) in offer.equity_grants.iter().enumerate() {
            println!(
                "  Grant {} ({:?}, {:.2}, {} cliff / {} months {}):",
                i + 1,
                grant.kind,
                grant.value,
                grant.vesting_schedule.cliff_months,
                grant.vesting_schedule.duration_months,
                grant.vesting_schedule.frequency.as_str(),
            );
            for row in vesting_schedule(grant, years) {
                println!(
                    "    Year {:>2} {}  months={:>3}  vested={:>6.2}%  value={:>14.2}",
                    row.year,
                    row.date,
                    row.months_since_grant,
                    row.vesting_percentage * 100.0,
                    row.vested_value,
                );
            }
        }
    }
    Ok(())
}

fn print_projection(projection: &OfferProjection) {
    println!("\n{}", projection.offer_name);
    println!("{:>5} {:>14} {:>14} {:>14} {:>14}", "Year", "Base", "Bonus", "Equity", "Total");
    println!("{}", "-".repeat(65));
    for row in &projection.years {
        println!(
            "{:>5} {:>14.2} {:>14.2} {:>14.2} {:>14.2}",
            row.year, row.base_salary, row.bonus, row.equity_value, row.total
        );
    }
}

fn print_summary(projection: &OfferProjection) {
    let summary = projection.summary();
    println!("  Total Value: {} ({:.2})", format_currency(summary.total_value), summary.total_value);
    println!("  CAGR: {:.2}%", summary.cagr * 100.0);
    println!(
        "  Breakdown: base {:.1}% / bonus {:.1}% / equity {:.1}%",
        summary.breakdown.base, summary.breakdown.bonus, summary.breakdown.equity
    );
}

fn print_impact(base: &OfferProjection, scenario: &OfferProjection) -> Result<()> {
    let impact = scenario_impact(base, scenario)?;
    println!(
        "  Impact vs {}: {:+.2} ({:+.2}%)",
        base.offer_name, impact.total_difference, impact.percentage_change
    );
    for year in &impact.yearly_differences {
        println!(
            "    Year {:>2}: {:+14.2} ({:+.2}%)",
            year.year, year.difference, year.percentage_change
        );
    }
    Ok(())
}
