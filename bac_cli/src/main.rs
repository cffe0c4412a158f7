use bac_core::report::{write_curve_csv, EstimateReport};
use bac_core::*;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "bac")]
#[command(about = "Blood alcohol concentration estimator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override config file location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate current BAC and the matching penalty
    Estimate {
        /// Gender (male, female)
        #[arg(long, default_value = "male")]
        gender: String,

        /// Body weight in kg
        #[arg(long)]
        weight: String,

        /// Hours since drinking started
        #[arg(long)]
        hours: String,

        /// Servings consumed, as <id>=<count> (repeatable)
        #[arg(long = "drink", value_name = "ID=COUNT")]
        drinks: Vec<String>,

        /// Print the full report as JSON
        #[arg(long)]
        json: bool,

        /// Include the decay curve
        #[arg(long)]
        curve: bool,

        /// Write the decay curve to a CSV file (implies --curve)
        #[arg(long, value_name = "PATH")]
        curve_csv: Option<PathBuf>,
    },

    /// Print the projected BAC decay curve
    Curve {
        /// Gender (male, female)
        #[arg(long, default_value = "male")]
        gender: String,

        /// Body weight in kg
        #[arg(long)]
        weight: String,

        /// Servings consumed, as <id>=<count> (repeatable)
        #[arg(long = "drink", value_name = "ID=COUNT")]
        drinks: Vec<String>,

        /// Write the curve to a CSV file instead of stdout
        #[arg(long, value_name = "PATH")]
        csv: Option<PathBuf>,
    },

    /// List the drinks the estimator knows about
    Catalog,

    /// Write a default config file
    InitConfig {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        bac_core::logging::init_with_level("debug");
    } else {
        bac_core::logging::init();
    }

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(Config::default_config_path);

    if let Some(Commands::InitConfig { force }) = &cli.command {
        return cmd_init_config(&config_path, *force);
    }

    let config = match cli.config {
        Some(_) => Config::load_or_default(&config_path)?,
        None => Config::load()?,
    };
    tracing::debug!("Using model {:?}", config.widmark_model());

    // Catalog is built once and handed to every command
    let catalog = build_default_catalog();
    let errors = catalog.validate();
    if !errors.is_empty() {
        eprintln!("Catalog validation errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        return Err(Error::CatalogValidation("Invalid catalog".into()));
    }

    match cli.command {
        Some(Commands::Estimate {
            gender,
            weight,
            hours,
            drinks,
            json,
            curve,
            curve_csv,
        }) => {
            let form = build_form(gender, weight, hours, &drinks)?;
            cmd_estimate(&catalog, &config, &form, json, curve, curve_csv)
        }
        Some(Commands::Curve {
            gender,
            weight,
            drinks,
            csv,
        }) => {
            let form = build_form(gender, weight, "0".into(), &drinks)?;
            cmd_curve(&catalog, &config, &form, csv)
        }
        Some(Commands::Catalog) => {
            display_catalog(&catalog);
            Ok(())
        }
        Some(Commands::InitConfig { .. }) => Ok(()),
        None => {
            display_catalog(&catalog);
            println!("Run `bac estimate --help` to estimate your BAC.");
            Ok(())
        }
    }
}

fn build_form(
    gender: String,
    weight: String,
    hours: String,
    drinks: &[String],
) -> Result<FormInput> {
    let drinks = drinks
        .iter()
        .map(|arg| form::parse_drink_arg(arg))
        .collect::<Result<Vec<_>>>()?;

    Ok(FormInput {
        gender,
        weight,
        hours,
        drinks,
    })
}

fn cmd_estimate(
    catalog: &Catalog,
    config: &Config,
    form: &FormInput,
    json: bool,
    curve: bool,
    curve_csv: Option<PathBuf>,
) -> Result<()> {
    let (subject, intake) = form.parse(catalog)?;
    let model = config.widmark_model();
    let settings = config.curve_settings();
    let want_curve = curve || curve_csv.is_some();

    let report = EstimateReport::build(
        catalog,
        &model,
        &subject,
        &intake,
        chrono::Utc::now(),
        want_curve.then_some(&settings),
    )?;

    if let (Some(path), Some(curve)) = (&curve_csv, &report.curve) {
        write_curve_csv(path, curve)?;
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    display_report(&report);

    if let Some(ref curve) = report.curve {
        println!(
            "  Decay curve: {} points over {:.2} h",
            curve.points.len(),
            curve.window_hours
        );
    }
    if let Some(path) = curve_csv {
        println!("  Curve written to {}", path.display());
    }
    println!();

    Ok(())
}

fn cmd_curve(
    catalog: &Catalog,
    config: &Config,
    form: &FormInput,
    csv: Option<PathBuf>,
) -> Result<()> {
    let (subject, intake) = form.parse(catalog)?;
    let model = config.widmark_model();
    let result = estimate(catalog, &model, &subject, &intake)?;
    let curve = decay_curve(result.initial_bac_percent, &model, &config.curve_settings());

    match csv {
        Some(path) => {
            write_curve_csv(&path, &curve)?;
            println!(
                "✓ Wrote {} points over {:.2} h to {}",
                curve.points.len(),
                curve.window_hours,
                path.display()
            );
        }
        None => {
            match curve.time_to_safe_hours {
                Some(t) => println!("Below {:.2}% after {:.2} h", SAFE_DRIVING_LIMIT, t),
                None => println!("Already below {:.2}%", SAFE_DRIVING_LIMIT),
            }
            println!("{:>8}  {:>8}", "hours", "bac %");
            for point in &curve.points {
                println!("{:>8.2}  {:>8.4}", point.hours, point.bac_percent);
            }
        }
    }

    Ok(())
}

fn cmd_init_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        println!(
            "Config already exists at {} (use --force to overwrite)",
            path.display()
        );
        return Ok(());
    }

    Config::default().save_to(path)?;
    println!("✓ Wrote default config to {}", path.display());
    Ok(())
}

fn display_catalog(catalog: &Catalog) {
    println!("\n=== Drink Catalog ===\n");
    for drink in catalog.iter() {
        println!(
            "  {:<10} {} ({} mL, {}%) → {:.2} g per serving",
            drink.id, drink.name, drink.volume_ml, drink.abv_percent, drink.grams_per_serving
        );
    }
    println!();
}

fn display_report(report: &EstimateReport) {
    let result = &report.result;

    println!("\n=== Intake ===\n");
    for line in &result.breakdown {
        println!(
            "  {}: {} × ({} mL, {}%) → {:.2} g",
            line.name, line.count, line.volume_ml, line.abv_percent, line.grams
        );
    }

    println!("\n=== Result ===\n");
    println!("  Total alcohol: {:.2} g", result.total_alcohol_grams);
    println!(
        "  BAC: {:.3}% (peak {:.3}%, r = {:.2})",
        result.current_bac_percent, result.initial_bac_percent, result.distribution_ratio
    );

    println!("\n  Penalty brackets:");
    let tiers = PenaltyTier::ALL;
    for (i, tier) in tiers.iter().enumerate() {
        let range = match tiers.get(i + 1) {
            Some(next) if i == 0 => format!("BAC < {:.2}%", next.lower_bound()),
            Some(next) => format!(
                "{:.2}% ≤ BAC < {:.2}%",
                tier.lower_bound(),
                next.lower_bound()
            ),
            None => format!("BAC ≥ {:.2}%", tier.lower_bound()),
        };
        println!("    {}: {}", range, tier.label());
    }

    println!("\n  Verdict: {}", result.penalty_tier.label());

    if report.hours_until_safe > 0.0 {
        match report.safe_at {
            Some(at) => println!(
                "  Below {:.2}% in ~{:.1} h (around {})",
                SAFE_DRIVING_LIMIT,
                report.hours_until_safe,
                at.with_timezone(&chrono::Local).format("%Y-%m-%d %H:%M")
            ),
            None => println!(
                "  Below {:.2}% in ~{:.1} h",
                SAFE_DRIVING_LIMIT, report.hours_until_safe
            ),
        }
    }
}
