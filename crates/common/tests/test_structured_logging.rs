use common::{init_structured_logging, LoggingConfig, OperationTimer, StructuredLogEntry};
use std::time::Duration;

#[test]
fn test_subscriber_installs_once() {
    let config = LoggingConfig {
        json_output: true,
        ..LoggingConfig::default()
    };

    assert!(init_structured_logging(config.clone()).is_ok());
    tracing::info!(operation = "deals.win_rate", "logged through the JSON layer");

    // The global subscriber cannot be replaced
    assert!(init_structured_logging(config).is_err());
}

#[test]
fn test_log_entry_round_trips_with_extra_fields() {
    let raw = r#"{"timestamp":"2024-05-01T12:00:00Z","level":"WARN","target":"infrastructure::store","message":"Operation failed","operation":"record_store_request","duration_ms":12}"#;

    let entry: StructuredLogEntry = serde_json::from_str(raw).unwrap();
    assert_eq!(entry.level, "WARN");
    assert_eq!(entry.fields["operation"], "record_store_request");
    assert_eq!(entry.fields["duration_ms"], 12);
}

#[test]
fn test_operation_timer_measures_elapsed_time() {
    let timer = OperationTimer::new("fetch_records");
    std::thread::sleep(Duration::from_millis(10));
    assert!(timer.elapsed_ms() >= 10);
    timer.finish();
}
