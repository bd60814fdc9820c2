use ccentral::domain::config::AppConfig;
use ccentral::logger::LoggerError;
use std::fs;
use std::time::Duration;
use tempfile::tempdir;

#[test]
fn init_logging_applies_the_logging_section() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let log_dir = dir.path().join("logs");

    let mut config = AppConfig::default();
    config.logging.console = false;
    config.logging.directory = Some(log_dir.clone());

    let logger = ccentral::init_logging(&config)?;
    assert!(logger.guard().is_some());

    tracing::info!("facade logging ready");
    std::thread::sleep(Duration::from_millis(20));
    drop(logger);

    let has_log = fs::read_dir(&log_dir)?
        .flatten()
        .any(|entry| entry.path().extension().and_then(|e| e.to_str()) == Some("log"));
    assert!(has_log);
    Ok(())
}

#[test]
fn init_logging_rejects_unknown_level() {
    let mut config = AppConfig::default();
    config.logging.level = "chatty".to_owned();

    let err = ccentral::init_logging(&config).unwrap_err();
    assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));
}
