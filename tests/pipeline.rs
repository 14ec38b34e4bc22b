// tests/pipeline.rs
//
// End to end over captured pages, loaded from disk through HttpLoader.
//
mod common;

use common::fixture;
use enalotto_scrape::config::options::{SourcePlan, SourceSpec, Strategy};
use enalotto_scrape::trace::TraceLog;
use enalotto_scrape::{HttpLoader, Lotto};

fn latest_box() -> Strategy {
    Strategy::Container(vec![".latest-results".to_string(), ".result-balls".to_string()])
}

#[test]
fn unified_from_english_results_page() {
    let plan = SourcePlan {
        unified: vec![SourceSpec::new("en", &fixture("results_en.html"), latest_box())],
        ..SourcePlan::default()
    };
    let lotto = Lotto::with_plan(HttpLoader::new(), plan);

    let got = lotto.get_unified_results(10);
    assert!(got.errors.is_empty(), "{:?}", got.errors);

    let latest = got.value.latest.expect("latest draw");
    assert_eq!(latest.date.as_deref(), Some("2nd March 2024"));
    assert_eq!(latest.draw.as_deref(), Some("27"));
    assert_eq!(latest.main, vec![5, 12, 34, 56, 78, 90]);
    assert_eq!((latest.jolly, latest.superstar), (Some(11), Some(22)));
    assert_eq!(latest.source.as_deref(), Some("en"));

    let dates: Vec<_> = got.value.previous.draws.iter().map(|d| d.date.clone().unwrap_or_default()).collect();
    assert_eq!(dates, vec!["29 February 2024", "27 February 2024", "24 February 2024"]);
    assert!(got.value.previous.draws.iter().all(|d| d.is_complete()));
}

#[test]
fn jackpot_prefers_the_jackpot_box() {
    let plan = SourcePlan {
        jackpot: vec![SourceSpec::new(
            "en",
            &fixture("results_en.html"),
            Strategy::Container(vec![".jackpot".to_string()]),
        )],
        ..SourcePlan::default()
    };
    let got = Lotto::with_plan(HttpLoader::new(), plan).get_jackpot();
    assert_eq!(got.value.amount.as_deref(), Some("€130 Million"));
    assert_eq!(got.value.source.as_deref(), Some("en"));
}

#[test]
fn italian_archive_with_repeated_row() {
    let plan = SourcePlan {
        previous: vec![SourceSpec::new("it", &fixture("archivio_it.html"), Strategy::PageText)],
        ..SourcePlan::default()
    };
    let lotto = Lotto::with_plan(HttpLoader::new(), plan);

    let draws = lotto.get_previous_draws(10, None).value.draws;
    assert_eq!(draws.len(), 2, "the repeated row is returned once");
    assert_eq!(draws[0].date.as_deref(), Some("2 marzo 2024"));
    assert_eq!(draws[0].draw.as_deref(), Some("27"));
    assert_eq!(draws[0].superstar, Some(22));
    assert_eq!(draws[1].main, vec![1, 2, 3, 4, 5, 6]);

    // English spelling of the same day excludes it.
    let draws = lotto.get_previous_draws(10, Some("March 2, 2024")).value.draws;
    assert_eq!(draws.len(), 1);
    assert_eq!(draws[0].date.as_deref(), Some("29 febbraio 2024"));
}

#[test]
fn missing_fixture_falls_back_and_is_reported() {
    let plan = SourcePlan {
        latest: vec![
            SourceSpec::new("gone", &fixture("does_not_exist.html"), latest_box()),
            SourceSpec::new("en", &fixture("results_en.html"), latest_box()),
        ],
        ..SourcePlan::default()
    };
    let mut log = TraceLog::new();
    let got = Lotto::with_plan(HttpLoader::new(), plan).get_latest_draw_traced(Some(&mut log));

    assert!(got.value.is_complete());
    assert_eq!(got.value.source.as_deref(), Some("en"));
    assert_eq!(got.errors.len(), 1);
    assert!(got.errors["gone"].contains("does_not_exist.html"));

    let picks: Vec<_> = log.entries.iter().filter(|e| e.stage == "superstar").collect();
    assert_eq!(picks.len(), 1);
    assert_eq!(picks[0].picked.as_deref(), Some("22"));
    assert_eq!(picks[0].source.as_deref(), Some("en"));
}

#[test]
fn archive_with_every_date_ordering() {
    let plan = SourcePlan {
        previous: vec![SourceSpec::new("mixed", &fixture("archive_mixed_dates.html"), Strategy::PageText)],
        ..SourcePlan::default()
    };
    let lotto = Lotto::with_plan(HttpLoader::new(), plan);

    let draws = lotto.get_previous_draws(10, None).value.draws;
    let dates: Vec<_> = draws.iter().filter_map(|d| d.date.as_deref()).collect();
    assert_eq!(dates, vec!["9 March 2024", "March 7, 2024", "March 5", "2 March"]);
    let ids: Vec<_> = draws.iter().filter_map(|d| d.draw.as_deref()).collect();
    assert_eq!(ids, vec!["30", "29", "28", "27"]);

    // the trailing SuperStar 8 is not read as "8 March"
    assert_eq!(draws[0].superstar, Some(8));
    assert_eq!(draws[1].main, vec![1, 2, 3, 5, 6, 9]);
    assert_eq!(draws[2].main, vec![10, 20, 30, 40, 50, 60]);
    // labels after their numbers
    assert_eq!((draws[3].jolly, draws[3].superstar), (Some(11), Some(33)));

    let draws = lotto.get_previous_draws(3, Some("7 March")).value.draws;
    let ids: Vec<_> = draws.iter().filter_map(|d| d.draw.as_deref()).collect();
    assert_eq!(ids, vec!["30", "28", "27"]);
}
