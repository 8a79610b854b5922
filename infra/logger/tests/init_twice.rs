use gate_logger::{LevelFilter, Logger, LoggerError};
use serial_test::serial;

#[test]
#[serial]
fn init_twice_returns_subscriber_error() {
    let _logger = Logger::builder("integration-init-twice")
        .level(LevelFilter::INFO)
        .init()
        .expect("first init should succeed");

    let err = Logger::builder("integration-init-twice-second")
        .level(LevelFilter::INFO)
        .init()
        .expect_err("second init should fail");

    assert!(
        matches!(err, LoggerError::Subscriber { .. }),
        "expected subscriber error for second init"
    );
}

#[test]
#[serial]
fn invalid_filter_is_reported_without_installing() {
    let err = Logger::builder("integration-bad-filter")
        .env_filter("gate_kernel=loud")
        .init()
        .expect_err("invalid filter should fail");

    assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));
}
