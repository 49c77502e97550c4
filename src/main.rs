use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use etfolio::core::log::init_logging;
use etfolio::core::view::{DistributionFilter, FilterState, SortKey};
use etfolio::core::MacroCategory;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to the portfolio plan file
    #[arg(short, long, global = true)]
    plan_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Clone, Copy, ValueEnum)]
enum CategoryArg {
    Bonds,
    Equity,
    Commodities,
    RealEstate,
}

impl From<CategoryArg> for MacroCategory {
    fn from(arg: CategoryArg) -> MacroCategory {
        match arg {
            CategoryArg::Bonds => MacroCategory::Bonds,
            CategoryArg::Equity => MacroCategory::Equity,
            CategoryArg::Commodities => MacroCategory::Commodities,
            CategoryArg::RealEstate => MacroCategory::RealEstate,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum DistributionArg {
    All,
    Acc,
    Dist,
}

impl From<DistributionArg> for DistributionFilter {
    fn from(arg: DistributionArg) -> DistributionFilter {
        match arg {
            DistributionArg::All => DistributionFilter::All,
            DistributionArg::Acc => DistributionFilter::Accumulating,
            DistributionArg::Dist => DistributionFilter::Distributing,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum SortArg {
    Aum,
    Ter,
    Name,
}

impl From<SortArg> for SortKey {
    fn from(arg: SortArg) -> SortKey {
        match arg {
            SortArg::Aum => SortKey::Aum,
            SortArg::Ter => SortKey::Ter,
            SortArg::Name => SortKey::Name,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create a starter plan file
    Setup,
    /// List catalogue funds by category, filtered and sorted
    Funds {
        /// Show a single category instead of all four
        #[arg(short, long, value_enum)]
        category: Option<CategoryArg>,
        /// Filter by distribution policy
        #[arg(long, value_enum, default_value = "all")]
        distribution: DistributionArg,
        /// Filter by exact replication method (e.g. Fisica, Sintetica)
        #[arg(long)]
        replication: Option<String>,
        /// Filter by exact quotation currency (e.g. EUR, USD)
        #[arg(long)]
        currency: Option<String>,
        /// Sort order within each category
        #[arg(long, value_enum, default_value = "aum")]
        sort: SortArg,
    },
    /// Display allocation summary and portfolio metrics
    Summary,
    /// Display the finished allocation, cost analysis, and ISIN list
    Export,
}

impl From<Commands> for etfolio::AppCommand {
    fn from(cmd: Commands) -> etfolio::AppCommand {
        match cmd {
            Commands::Funds {
                category,
                distribution,
                replication,
                currency,
                sort,
            } => etfolio::AppCommand::Funds {
                category: category.map(MacroCategory::from),
                filter: FilterState {
                    distribution: distribution.into(),
                    replication,
                    currency,
                    sort_by: sort.into(),
                },
            },
            Commands::Summary => etfolio::AppCommand::Summary,
            Commands::Export => etfolio::AppCommand::Export,
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => setup(),
        Some(cmd) => etfolio::run_command(cmd.into(), cli.plan_path.as_deref()),
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}

fn setup() -> anyhow::Result<()> {
    use anyhow::Context;
    use etfolio::core::plan::{PlanConfig, STARTER_PLAN};

    let path = PlanConfig::default_plan_path()?;

    if path.exists() {
        anyhow::bail!("Plan file already exists at {}", path.display());
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    std::fs::write(&path, STARTER_PLAN)
        .with_context(|| format!("Failed to write plan file to {}", path.display()))?;

    tracing::info!("Created starter plan at {}", path.display());
    Ok(())
}
