use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing::info;

use lotsize::logging::{self, LogTarget};
use lotsize::services::catalog::parse_size_list;
use lotsize::services::lot_file::load_lot;
use lotsize::services::measure::format_weight;
use lotsize::services::{DrawerProps, LotSizeAggregator, SizeCatalog};
use lotsize::tui::{self, SessionOutcome, Theme};
use lotsize::types::{
    format_count, DrawerMode, LotTotals, SavedLot, SizeGroupSummary, Specification, PLANE,
};

/// Lot size drawer: record sets and weights per size
#[derive(Parser)]
#[command(name = "lotsize")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive lot drawer (default)
    Edit(EditArgs),

    /// Recompute size summaries and totals of a saved lot
    Summary {
        /// Lot file (rows array or saved payload)
        file: PathBuf,

        /// Specification mode (PLANE hides spec weight)
        #[arg(long, default_value = PLANE)]
        spec: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the allowed sizes of a product
    Sizes {
        /// Product name (matched case-insensitively)
        product: String,

        /// Size catalog file [default: ~/.lotsize/catalog.json]
        #[arg(long)]
        catalog: Option<PathBuf>,
    },
}

#[derive(Args, Debug, Clone, PartialEq)]
struct EditArgs {
    /// Product name shown in the title and used for the catalog lookup
    #[arg(long, default_value = "")]
    product: String,

    /// Specification mode (PLANE hides spec weight)
    #[arg(long, default_value = PLANE)]
    spec: String,

    /// Prior lot data; opens the drawer in edit mode
    #[arg(long)]
    lot: Option<PathBuf>,

    /// Allowed sizes, comma separated (overrides the catalog)
    #[arg(long)]
    sizes: Option<String>,

    /// Size catalog file [default: ~/.lotsize/catalog.json]
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Also print the derived product stock fields
    #[arg(long)]
    stock: bool,
}

impl Default for EditArgs {
    fn default() -> Self {
        Self {
            product: String::new(),
            spec: PLANE.to_string(),
            lot: None,
            sizes: None,
            catalog: None,
            stock: false,
        }
    }
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        match self.command {
            None => run_edit(EditArgs::default()),
            Some(Commands::Edit(args)) => run_edit(args),
            Some(Commands::Summary { file, spec, json }) => {
                logging::init(LogTarget::Stderr)?;
                run_summary(file, Specification::new(spec), json)
            }
            Some(Commands::Sizes { product, catalog }) => {
                logging::init(LogTarget::Stderr)?;
                let catalog = load_catalog(catalog)?;
                for size in catalog.sizes_for(&product) {
                    println!("{}", size);
                }
                Ok(())
            }
        }
    }
}

fn load_catalog(path: Option<PathBuf>) -> anyhow::Result<SizeCatalog> {
    let path = match path {
        Some(path) => path,
        None => SizeCatalog::default_path()?,
    };
    SizeCatalog::load(&path).with_context(|| format!("loading catalog {}", path.display()))
}

/// Build drawer props from the command line
fn drawer_props(args: &EditArgs) -> anyhow::Result<DrawerProps> {
    let initial_lot_sizes = match &args.lot {
        Some(path) => load_lot(path).with_context(|| format!("loading lot {}", path.display()))?,
        None => Vec::new(),
    };

    let size_options = match &args.sizes {
        Some(list) => parse_size_list(list),
        None => load_catalog(args.catalog.clone())?.sizes_for(&args.product),
    };

    let mode = if initial_lot_sizes.is_empty() {
        DrawerMode::Create
    } else {
        DrawerMode::Edit
    };

    Ok(DrawerProps {
        mode,
        product_name: args.product.clone(),
        specification: Specification::new(args.spec.clone()),
        initial_lot_sizes,
        size_options,
    })
}

fn run_edit(args: EditArgs) -> anyhow::Result<()> {
    logging::init(LogTarget::default_file()?)?;
    let props = drawer_props(&args)?;
    info!(
        product = %props.product_name,
        sizes = props.size_options.len(),
        "opening lot drawer"
    );

    // Theme detection must run before the terminal enters raw mode
    let theme = Theme::detect();
    match tui::run(props, theme)? {
        SessionOutcome::Saved(saved) => {
            println!("{}", saved_output(&saved, args.stock)?);
        }
        SessionOutcome::Closed => info!("lot drawer cancelled"),
    }
    Ok(())
}

/// Save payload as printed on stdout
fn saved_output(saved: &SavedLot, with_stock: bool) -> anyhow::Result<String> {
    let mut value = serde_json::to_value(saved)?;
    if with_stock {
        if let Some(object) = value.as_object_mut() {
            object.insert(
                "stock".to_string(),
                serde_json::to_value(saved.stock_update())?,
            );
        }
    }
    Ok(serde_json::to_string_pretty(&value)?)
}

fn run_summary(file: PathBuf, specification: Specification, json: bool) -> anyhow::Result<()> {
    let rows = load_lot(&file).with_context(|| format!("loading lot {}", file.display()))?;
    let aggregator = LotSizeAggregator::seeded(rows, specification, Vec::new());
    let groups = aggregator.group_by_size();
    let totals = aggregator.compute_totals();

    if json {
        let output = serde_json::json!({
            "sizes": groups,
            "totals": totals,
            "complete": aggregator.is_valid(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print!(
            "{}",
            format_summary(&groups, &totals, aggregator.specification())
        );
    }
    Ok(())
}

/// Plain-text "Size & Totals" table
fn format_summary(
    groups: &[SizeGroupSummary],
    totals: &LotTotals,
    specification: &Specification,
) -> String {
    let spec_label = specification.weight_label();
    let mut out = format!(
        "{:<10}{:>12}{:>14}{:>14}",
        "Size", "Total Sets", "Gross Wt (g)", "Net Wt (g)"
    );
    if let Some(label) = &spec_label {
        out.push_str(&format!("{:>16}", label));
    }
    out.push('\n');

    let mut push_row = |label: &str, sets: f64, gross: f64, net: f64| {
        out.push_str(&format!(
            "{:<10}{:>12}{:>14}{:>14}",
            label,
            format_count(sets),
            format_weight(gross),
            format_weight(net)
        ));
        if spec_label.is_some() {
            out.push_str(&format!("{:>16}", format_weight(gross - net)));
        }
        out.push('\n');
    };

    for group in groups {
        push_row(
            &group.size,
            group.total_sets,
            group.average_gross_wt,
            group.average_net_wt,
        );
    }
    push_row(
        "Total",
        totals.total_sets,
        totals.total_gross_wt,
        totals.total_net_wt,
    );
    out
}
