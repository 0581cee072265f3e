//! cycle-predictor entrypoint: one command per interaction, run to completion.
//! `predict` encodes the form, runs the model, shows the next period dates and
//! appends to the history; the other commands read or clear that history.

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use console::style;
use cycle_predictor::{
    config::AppConfig,
    error::Error,
    evaluation,
    features::{parse_date, Cramps, CycleInput, Mood},
    form::CycleForm,
    forecast::Forecaster,
    logging::StructuredLogger,
    model::OnnxPredictor,
    projection::DateProjector,
    report,
    storage::HistoryStore,
    trends,
};
use dialoguer::{theme::ColorfulTheme, Confirm};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "cycle-predictor", version, about = "Predict your next menstrual cycle")]
struct Cli {
    /// JSON config file; defaults apply when it does not exist
    #[arg(long, global = true, env = "CYCLE_PREDICTOR_CONFIG", default_value = "config.json")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Predict the next cycle and record it in the history
    Predict(PredictArgs),
    /// Show past predictions, newest first
    History,
    /// Show cycle length and mood/cramps trends
    Trends,
    /// Delete the whole prediction history
    Clear {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Report MAE and R² of the configured model on a labelled CSV dataset
    Evaluate { dataset: PathBuf },
}

#[derive(Args)]
struct PredictArgs {
    /// Prompt for every field instead of reading flags
    #[arg(long, short)]
    interactive: bool,
    /// Last period start date (YYYY-MM-DD); defaults to today
    #[arg(long, value_parser = parse_date)]
    last_period_date: Option<NaiveDate>,
    #[arg(long, default_value_t = 28)]
    mean_cycle_length: u32,
    #[arg(long, default_value_t = 12)]
    luteal_phase: u32,
    #[arg(long, default_value_t = 5)]
    period_length: u32,
    #[arg(long, default_value_t = 2)]
    peak_days: u32,
    #[arg(long, default_value_t = 50)]
    menses_score: u32,
    #[arg(long, default_value_t = 25)]
    age: u32,
    #[arg(long, default_value_t = 21.0)]
    bmi: f64,
    /// Happy, Normal, Moody or Sad
    #[arg(long, default_value = "Happy")]
    mood: Mood,
    /// None, Mild or Severe
    #[arg(long, default_value = "None")]
    cramps: Cramps,
    /// Print the forecast as JSON instead of text
    #[arg(long)]
    json: bool,
    /// Only show the prediction, not the history and trends
    #[arg(long)]
    brief: bool,
}

impl PredictArgs {
    fn to_input(&self, today: NaiveDate) -> CycleInput {
        CycleInput {
            last_period_date: self.last_period_date.unwrap_or(today),
            mean_cycle_length: self.mean_cycle_length,
            luteal_phase: self.luteal_phase,
            period_length: self.period_length,
            peak_days: self.peak_days,
            menses_score: self.menses_score,
            age: self.age,
            bmi: self.bmi,
            mood: self.mood,
            cramps: self.cramps,
        }
    }
}

fn load_model(config: &AppConfig) -> Result<OnnxPredictor> {
    OnnxPredictor::load(&config.model_path, config.model_sha256.as_deref())
        .map_err(Error::ModelLoadFailure)
        .with_context(|| format!("cannot start without a model ({})", config.model_path.display()))
}

fn predict(config: &AppConfig, store: &HistoryStore, args: &PredictArgs) -> Result<()> {
    let forecaster =
        Forecaster::new(load_model(config)?, DateProjector::new(config.projection.clone()));

    let today = Local::now().date_naive();
    let input = if args.interactive {
        CycleForm::prompt(&args.to_input(today))?
    } else {
        args.to_input(today)
    };
    let forecast = forecaster.forecast(&input, today)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&forecast)?);
    } else {
        println!("{}", style(report::success_message(&forecast)).green().bold());
        println!("{}", style(report::next_period_message(&forecast)).cyan());
        println!();
        println!("{}", style("Upcoming periods").bold());
        print!("{}", report::upcoming_table(&forecast.upcoming));
    }

    if let Err(e) = store.append(&forecast.record) {
        warn!(error = %e, "failed to record prediction");
        eprintln!("{}", style(format!("Prediction not saved to history: {e}")).yellow());
    }

    if !args.brief && !args.json {
        println!();
        show_history(store);
        println!();
        show_trends(store);
    }
    Ok(())
}

fn show_history(store: &HistoryStore) {
    println!("{}", style("Prediction history").bold());
    match store.read_all() {
        Ok(log) => print!("{}", with_newline(report::history_table(&log))),
        Err(e) => eprintln!("{}", style(format!("History unavailable: {e}")).yellow()),
    }
}

fn show_trends(store: &HistoryStore) {
    let log = match store.read_all() {
        Ok(log) => log,
        Err(e) => {
            eprintln!("{}", style(format!("Trends unavailable: {e}")).yellow());
            return;
        }
    };
    println!("{}", style("Cycle length trend").bold());
    print!("{}", with_newline(report::cycle_trend_chart(&trends::cycle_length_series(&log))));
    println!();
    println!("{}", style("Mood & cramps trend").bold());
    print!("{}", with_newline(report::symptom_trend_chart(&trends::mood_cramp_series(&log))));
}

fn clear(store: &HistoryStore, yes: bool) -> Result<()> {
    let confirmed = yes
        || Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt("Delete the entire prediction history? This cannot be undone")
            .default(false)
            .interact()?;
    if !confirmed {
        println!("History kept.");
        return Ok(());
    }
    store.clear()?;
    info!(path = %store.path().display(), "history cleared");
    println!("{}", style("History cleared.").green());
    Ok(())
}

fn evaluate(config: &AppConfig, dataset: &Path) -> Result<()> {
    let model = load_model(config)?;
    let data = evaluation::read_dataset(dataset)
        .with_context(|| format!("reading {}", dataset.display()))?;
    let metrics = evaluation::evaluate(&model, &data.samples)?;
    info!(samples = metrics.samples, skipped = data.skipped, "model evaluated");

    println!("Samples: {} ({} skipped)", metrics.samples, data.skipped);
    println!("Mean Absolute Error: {:.2}", metrics.mae);
    match metrics.r2 {
        Some(r2) => println!("R² Score: {r2:.2}"),
        None => println!("R² Score: undefined (constant targets)"),
    }
    Ok(())
}

fn with_newline(mut s: String) -> String {
    if !s.ends_with('\n') {
        s.push('\n');
    }
    s
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load(&cli.config)?;

    StructuredLogger::init(&config.log);
    info!(data_dir = ?config.data_dir, "cycle-predictor starting");

    let store = HistoryStore::new(config.history_path());
    match &cli.command {
        Command::Predict(args) => predict(&config, &store, args)?,
        Command::History => show_history(&store),
        Command::Trends => show_trends(&store),
        Command::Clear { yes } => clear(&store, *yes)?,
        Command::Evaluate { dataset } => evaluate(&config, dataset)?,
    }
    Ok(())
}
