// src/cli.rs
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use color_eyre::eyre::{Result, WrapErr};
use serde::Serialize;

use crate::config::consts::DEFAULT_LIMIT;
use crate::config::options::{RequestOptions, SourcePlan};
use crate::core::net::HttpLoader;
use crate::model::Fetched;
use crate::report::collect_report;
use crate::scrape::Lotto;
use crate::trace::{TraceEntry, TraceLog, TraceSink};

#[derive(Parser, Debug)]
#[command(name = "cli")]
#[command(about = "SuperEnalotto jackpot, latest draw and archive as JSON")]
#[command(long_about = None)]
pub struct Args {
    /// Archive draws to return (clamped to 1..=50)
    #[arg(long, short = 'n', default_value_t = DEFAULT_LIMIT)]
    pub limit: usize,

    /// Leave draws on this day out of the archive ("3 March 2024", "March 3")
    #[arg(long)]
    pub exclude_date: Option<String>,

    /// Attach the disambiguation trace and log at debug level
    #[arg(long, short)]
    pub debug: bool,

    /// JSON file with the source lists to use instead of the built-in mirrors
    #[arg(long, value_name = "FILE")]
    pub sources: Option<PathBuf>,

    /// Which request to run
    #[arg(long, value_enum, default_value = "all")]
    pub only: Only,

    /// Indent the JSON output
    #[arg(long)]
    pub pretty: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Only {
    All,
    Jackpot,
    Latest,
    Previous,
    Unified,
}

/// Single-request output: the field's value, per-source errors, and the trace
/// when asked for.
#[derive(Serialize)]
struct Single<T: Serialize> {
    #[serde(flatten)]
    fetched: Fetched<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    debug: Option<Vec<TraceEntry>>,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    crate::log::init(args.debug);

    let plan = match &args.sources {
        Some(path) => SourcePlan::load(path).wrap_err("loading --sources")?,
        None => SourcePlan::default(),
    };
    let lotto = Lotto::with_plan(HttpLoader::new(), plan);
    let opts = RequestOptions { limit: args.limit, exclude_date: args.exclude_date.clone(), debug: args.debug };

    let mut log = TraceLog::new();
    let json = {
        let sink: &mut dyn TraceSink = &mut log;
        let trace = args.debug.then_some(sink);
        match args.only {
            Only::All => render(&collect_report(&lotto, &opts), args.pretty)?,
            Only::Jackpot => single(lotto.get_jackpot_traced(trace), &mut log, &args)?,
            Only::Latest => single(lotto.get_latest_draw_traced(trace), &mut log, &args)?,
            Only::Previous => {
                let got = lotto.get_previous_draws_traced(opts.limit, opts.exclude_date.as_deref(), trace);
                single(got, &mut log, &args)?
            }
            Only::Unified => single(lotto.get_unified_results_traced(opts.limit, trace), &mut log, &args)?,
        }
    };

    println!("{json}");
    Ok(())
}

fn single<T: Serialize>(fetched: Fetched<T>, log: &mut TraceLog, args: &Args) -> Result<String> {
    let debug = args.debug.then(|| std::mem::take(&mut log.entries));
    render(&Single { fetched, debug }, args.pretty)
}

fn render<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    let out = if pretty { serde_json::to_string_pretty(value) } else { serde_json::to_string(value) };
    out.wrap_err("serializing output")
}
