use std::sync::{Arc, Mutex};

use tabular_insight::ingestion::{
    load_dataset, CompositeObserver, DatasetFormat, IngestionContext, IngestionObserver, IngestionSeverity,
    IngestionStats, LoadOptions,
};
use tabular_insight::DatasetError;

#[derive(Default)]
struct RecordingObserver {
    successes: Mutex<Vec<IngestionStats>>,
    failures: Mutex<Vec<IngestionSeverity>>,
    alerts: Mutex<Vec<IngestionSeverity>>,
}

impl IngestionObserver for RecordingObserver {
    fn on_success(&self, _ctx: &IngestionContext, stats: IngestionStats) {
        self.successes.lock().unwrap().push(stats);
    }

    fn on_failure(&self, _ctx: &IngestionContext, severity: IngestionSeverity, _error: &DatasetError) {
        self.failures.lock().unwrap().push(severity);
    }

    fn on_alert(&self, _ctx: &IngestionContext, severity: IngestionSeverity, _error: &DatasetError) {
        self.alerts.lock().unwrap().push(severity);
    }
}

fn options(obs: Arc<RecordingObserver>) -> LoadOptions {
    LoadOptions {
        format: Some(DatasetFormat::Csv),
        observer: Some(obs),
        alert_at_or_above: IngestionSeverity::Critical,
        ..Default::default()
    }
}

#[test]
fn observer_receives_row_and_column_counts() {
    let obs = Arc::new(RecordingObserver::default());
    load_dataset("tests/fixtures/data.csv", &options(obs.clone())).unwrap();

    assert_eq!(
        obs.successes.lock().unwrap().clone(),
        vec![IngestionStats { rows: 3, columns: 2 }]
    );
    assert!(obs.failures.lock().unwrap().is_empty());
}

#[test]
fn observer_receives_failure_and_alert_on_missing_file() {
    let obs = Arc::new(RecordingObserver::default());
    let _ = load_dataset("tests/fixtures/does_not_exist.csv", &options(obs.clone())).unwrap_err();

    assert_eq!(obs.failures.lock().unwrap().clone(), vec![IngestionSeverity::Critical]);
    assert_eq!(obs.alerts.lock().unwrap().clone(), vec![IngestionSeverity::Critical]);
}

#[test]
fn observer_receives_failure_without_alert_for_malformed_body() {
    let obs = Arc::new(RecordingObserver::default());
    let _ = load_dataset("tests/fixtures/ragged.csv", &options(obs.clone())).unwrap_err();

    assert_eq!(obs.failures.lock().unwrap().clone(), vec![IngestionSeverity::Error]);
    assert!(obs.alerts.lock().unwrap().is_empty());
}

#[test]
fn composite_observer_fans_out() {
    let first = Arc::new(RecordingObserver::default());
    let second = Arc::new(RecordingObserver::default());
    let composite = CompositeObserver::new(vec![first.clone(), second.clone()]);
    let opts = LoadOptions {
        observer: Some(Arc::new(composite)),
        ..Default::default()
    };

    let _ = load_dataset("tests/fixtures/notes.txt", &opts).unwrap_err();

    assert_eq!(first.failures.lock().unwrap().clone(), vec![IngestionSeverity::Error]);
    assert_eq!(second.failures.lock().unwrap().clone(), vec![IngestionSeverity::Error]);
}

#[test]
fn lowering_the_alert_threshold_alerts_on_malformed_body() {
    let obs = Arc::new(RecordingObserver::default());
    let opts = LoadOptions {
        alert_at_or_above: IngestionSeverity::Error,
        ..options(obs.clone())
    };
    let _ = load_dataset("tests/fixtures/ragged.csv", &opts).unwrap_err();

    assert!(IngestionSeverity::Error < IngestionSeverity::Critical);
    assert_eq!(obs.alerts.lock().unwrap().clone(), vec![IngestionSeverity::Error]);
}
