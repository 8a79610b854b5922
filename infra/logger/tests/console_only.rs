use gate_logger::{ConsoleTarget, LevelFilter, Logger};

#[test]
fn init_console_only_writes_no_file() {
    let logger = Logger::builder("integration-console-only")
        .console(ConsoleTarget::Stdout)
        .level(LevelFilter::INFO)
        .init()
        .expect("logger should initialize");

    assert!(!logger.writes_file(), "console-only logger should not create a file guard");
}
