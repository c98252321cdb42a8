use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use colored::Colorize;
use itinerary::EnhancedItinerary;
use server::{ItinerarySink, RecommendationOrchestrator, ResponseEnvelope};
use std::path::PathBuf;
use std::sync::Arc;
use supplier::{Catalog, CatalogSupplier};
use travel_data::{EnhancementKind, OptimizationGoal, Preferences, Rated};

/// TripRecs - Travel Itinerary Recommendation Engine
#[derive(Parser)]
#[command(name = "trip-recs")]
#[command(about = "Travel itinerary recommendations from a candidate catalog", long_about = None)]
struct Cli {
    /// Path to a JSON catalog; the built-in sample is used when omitted
    #[arg(short, long)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build an itinerary recommendation
    Recommend {
        /// Total trip budget
        #[arg(long)]
        budget: f64,

        /// Trip length in days (may be omitted when both dates are given)
        #[arg(long, default_value = "0")]
        duration: u32,

        /// Trip start date (YYYY-MM-DD)
        #[arg(long)]
        start_date: Option<NaiveDate>,

        /// Trip end date (YYYY-MM-DD)
        #[arg(long)]
        end_date: Option<NaiveDate>,

        /// Comma-separated interest tags (e.g. "cultural,food")
        #[arg(long, value_delimiter = ',')]
        interests: Vec<String>,

        /// Optimization goal: budget, activity, comfort, or time
        #[arg(long, default_value = "budget")]
        goal: String,

        /// Minimum candidate rating on a 0-5 scale
        #[arg(long)]
        min_rating: Option<f32>,

        /// Comma-separated enhancements (luxury, adventure, cultural,
        /// family-friendly, eco-friendly)
        #[arg(long, value_delimiter = ',')]
        enhancements: Vec<String>,

        /// Destination city to search around
        #[arg(long)]
        destination: Option<String>,

        /// Region to search within
        #[arg(long)]
        region: Option<String>,

        /// Traveler name recorded on the itinerary
        #[arg(long)]
        traveler: Option<String>,

        /// Save the itinerary as JSON into this directory
        #[arg(long)]
        save_dir: Option<PathBuf>,

        /// Emit the raw response envelope as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a summary of the candidate catalog
    Catalog,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let catalog = match &cli.catalog {
        Some(path) => Catalog::load_from_file(path)
            .with_context(|| format!("Failed to load catalog from {}", path.display()))?,
        None => Catalog::sample(),
    };

    match cli.command {
        Commands::Recommend {
            budget,
            duration,
            start_date,
            end_date,
            interests,
            goal,
            min_rating,
            enhancements,
            destination,
            region,
            traveler,
            save_dir,
            json,
        } => {
            let goal: OptimizationGoal = goal.parse()?;
            let mut prefs = Preferences::new(budget, duration, goal);
            prefs.start_date = start_date;
            prefs.end_date = end_date;
            prefs.interests = interests;
            prefs.destination = destination;
            prefs.region = region;
            prefs.traveler = traveler;
            if let Some(min_rating) = min_rating {
                prefs.min_rating = min_rating;
            }
            prefs.enhancements = enhancements
                .iter()
                .map(|e| e.parse::<EnhancementKind>())
                .collect::<travel_data::Result<Vec<_>>>()?;

            handle_recommend(catalog, prefs, save_dir, json).await?
        }
        Commands::Catalog => handle_catalog(&catalog),
    }

    Ok(())
}

/// Handle the 'recommend' command
async fn handle_recommend(
    catalog: Catalog,
    prefs: Preferences,
    save_dir: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let supplier = Arc::new(CatalogSupplier::new(Arc::new(catalog)));
    let mut orchestrator = RecommendationOrchestrator::new(supplier);
    if let Some(dir) = save_dir {
        orchestrator = orchestrator.with_sink(Arc::new(JsonFileSink { dir }));
    }

    let result = orchestrator.recommend_and_save(&prefs).await;

    if json {
        let envelope = ResponseEnvelope::from_result(result.map(|(r, _)| r));
        println!("{}", serde_json::to_string_pretty(&envelope)?);
        return Ok(());
    }

    match result {
        Ok((recommendation, persisted)) => {
            print_recommendation(&recommendation);
            if let Some(persisted) = persisted {
                println!("{} Saved as {}", "✓".green(), persisted.id);
            }
        }
        Err(error) => {
            eprintln!(
                "{} {} [{}]",
                "✗".red(),
                error.to_string().red(),
                error.code()
            );
            std::process::exit(1);
        }
    }
    Ok(())
}

/// Handle the 'catalog' command
fn handle_catalog(catalog: &Catalog) {
    println!("{}", "Catalog summary:".bold().blue());
    println!(
        "{}{} locations, {} lodgings, {} transport options",
        "• ".green(),
        catalog.locations.len(),
        catalog.lodgings.len(),
        catalog.transports.len()
    );

    let mut top: Vec<_> = catalog.locations.iter().collect();
    top.sort_by(|a, b| {
        b.rating_or_zero()
            .partial_cmp(&a.rating_or_zero())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    println!("Top-rated locations:");
    for location in top.iter().take(5) {
        println!(
            "  - {} ({}) [{}] {:.1}",
            location.name,
            location.city,
            location.categories.join(", "),
            location.rating_or_zero()
        );
    }
}

/// Helper to format and print one recommendation
fn print_recommendation(recommendation: &server::Recommendation) {
    let summary = &recommendation.summary;
    let data = &recommendation.itinerary.data;

    println!("{}", data.title.bold().blue());
    println!("{}", recommendation.itinerary.description);
    println!(
        "{}{} to {} ({} days)",
        "• ".green(),
        data.start_date,
        data.end_date,
        data.duration
    );
    println!(
        "{}Estimated cost: {:.2} (budget {:.2})",
        "• ".green(),
        summary.total_cost,
        data.budget
    );
    println!("{}Strategy: {}", "• ".green(), summary.strategy_used);
    println!(
        "{}Filters: {}",
        "• ".cyan(),
        summary.filters_applied.join(" → ")
    );
    println!("{}Features: {}", "• ".cyan(), summary.features.join(", "));

    for plan in &data.daily_plans {
        println!(
            "{}",
            format!("Day {} - {}", plan.day, plan.date).bold()
        );
        if let Some(morning) = &plan.morning {
            println!("  morning:   {morning}");
        }
        if let Some(afternoon) = &plan.afternoon {
            println!("  afternoon: {afternoon}");
        }
        if let Some(evening) = &plan.evening {
            println!("  evening:   {evening}");
        }
        if let Some(lodging) = &plan.lodging {
            println!("  stay:      {lodging}");
        }
        for leg in &plan.transport {
            println!("  travel:    {} {} → {}", leg.mode, leg.origin, leg.destination);
        }
        for activity in &plan.activities {
            println!("  activity:  {}", activity.name);
        }
        println!("  day cost:  {:.2}", plan.daily_cost);
    }

    let floating: Vec<_> = data
        .activities
        .iter()
        .filter(|a| a.date.is_none())
        .collect();
    if !floating.is_empty() {
        println!("{}", "Anytime activities:".bold());
        for activity in floating {
            match &activity.tag {
                Some(tag) => println!("  - {} ({tag})", activity.name),
                None => println!("  - {}", activity.name),
            }
        }
    }
}

/// Writes each saved itinerary as one JSON file under a directory.
struct JsonFileSink {
    dir: PathBuf,
}

impl ItinerarySink for JsonFileSink {
    fn save(&self, itinerary: &EnhancedItinerary) -> anyhow::Result<String> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create {}", self.dir.display()))?;

        let slug: String = itinerary
            .data
            .title
            .to_lowercase()
            .chars()
            .map(|c| if c.is_alphanumeric() { c } else { '-' })
            .collect();
        let id = format!("{}-{}", slug, itinerary.data.start_date);
        let path = self.dir.join(format!("{id}.json"));
        let file = std::fs::File::create(&path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        serde_json::to_writer_pretty(file, itinerary)?;
        Ok(id)
    }
}
