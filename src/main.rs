use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use stock_purchasing::io::{inputs, reporting, sample};
use stock_purchasing::model::records::UNITS_PER_PALLET;
use stock_purchasing::{MicroLpSolver, PlannerConfig, PlannerResult, PurchasePlanner};
use tracing::error;
use tracing_subscriber::EnvFilter;

const ITEMS_FILE: &str = "items_updated.csv";
const SUPPLIERS_FILE: &str = "suppliers.csv";
const PRICING_FILE: &str = "pricing.csv";
const PLAN_FILE: &str = "optimal_purchasing_plan.csv";

/// Computes the cheapest purchasing plan that keeps every item within its stock bounds
#[derive(Parser)]
#[command(name = "stock-purchasing")]
struct Args {
    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Solve the purchasing model and write the plan
    Plan(PlanArgs),
    /// Write a random, solvable set of input tables
    Sample(SampleArgs),
}

#[derive(clap::Args, Debug, PartialEq)]
struct PlanArgs {
    #[arg(long, default_value = ITEMS_FILE)]
    items: PathBuf,

    #[arg(long, default_value = SUPPLIERS_FILE)]
    suppliers: PathBuf,

    #[arg(long, default_value = PRICING_FILE)]
    pricing: PathBuf,

    #[arg(long, default_value = PLAN_FILE)]
    output: PathBuf,

    /// Order whole pallets only
    #[arg(long)]
    integer_pallets: bool,

    /// Fail on pricing rows that reference unknown items or suppliers
    #[arg(long)]
    strict_join: bool,

    #[arg(long, default_value_t = UNITS_PER_PALLET)]
    units_per_pallet: u32,

    /// Log model constraints and solver timing
    #[arg(long)]
    verbose: bool,
}

impl Default for PlanArgs {
    fn default() -> Self {
        Self {
            items: PathBuf::from(ITEMS_FILE),
            suppliers: PathBuf::from(SUPPLIERS_FILE),
            pricing: PathBuf::from(PRICING_FILE),
            output: PathBuf::from(PLAN_FILE),
            integer_pallets: false,
            strict_join: false,
            units_per_pallet: UNITS_PER_PALLET,
            verbose: false,
        }
    }
}

#[derive(clap::Args)]
struct SampleArgs {
    /// Directory to write items.csv, suppliers.csv and pricing.csv into
    #[arg(long, default_value = "sample")]
    dir: PathBuf,

    #[arg(long, default_value_t = 20)]
    items: usize,

    #[arg(long, default_value_t = 3)]
    suppliers: usize,

    #[arg(long, default_value_t = 1)]
    seed: u64,
}

fn init_logging(level: &str, verbose: bool) {
    let fallback = if verbose { "debug" } else { level };
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(fallback))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt().with_env_filter(env_filter).init();
}

fn run_plan(args: PlanArgs) -> PlannerResult<()> {
    let config = PlannerConfig {
        units_per_pallet: args.units_per_pallet,
        integer_pallets: args.integer_pallets,
        strict_join: args.strict_join,
        verbose: args.verbose,
        ..PlannerConfig::default()
    };

    // 1. LOAD AND JOIN
    let table =
        inputs::load_purchasing_table(&args.items, &args.suppliers, &args.pricing, config.strict_join)?;
    println!(
        "Loaded {} orderable pairs ({} items, {} suppliers)",
        table.rows().len(),
        table.items().len(),
        table.suppliers().len()
    );

    // 2. BUILD AND SOLVE
    let planner = PurchasePlanner::new(config.clone(), MicroLpSolver::new(config.verbose))?;
    let plan = planner.plan(&table)?;

    // 3. EXPORT RESULTS
    reporting::write_purchasing_plan(&args.output, &plan)?;
    println!(
        "Optimization complete. Results saved to {}.",
        args.output.display()
    );

    reporting::print_cost_analysis(&plan);
    Ok(())
}

fn run_sample(args: SampleArgs) -> PlannerResult<()> {
    let inputs = sample::generate_sample_inputs(args.items, args.suppliers, args.seed);
    sample::write_sample_inputs(&args.dir, &inputs)?;
    println!(
        "Wrote {} items, {} suppliers and {} pricing rows to ./{}",
        inputs.items.len(),
        inputs.suppliers.len(),
        inputs.pricing.len(),
        args.dir.display()
    );
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    let verbose = matches!(&args.command, Some(Command::Plan(plan)) if plan.verbose);
    init_logging(&args.log_level, verbose);

    let result = match args.command {
        Some(Command::Sample(sample_args)) => run_sample(sample_args),
        Some(Command::Plan(plan_args)) => run_plan(plan_args),
        None => run_plan(PlanArgs::default()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
