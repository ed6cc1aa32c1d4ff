//! Wiring between configuration, recommendation sources and the wizard.

use anyhow::{Context, Result};
use meal_core::source::mock::MockSourceFactory;
use meal_core::{SourceRegistry, WizardController};
use meal_data::CsvSourceFactory;
use tracing::{debug, info};

use crate::config::AppConfig;

/// Registry with every recommendation backend this build knows about.
pub fn build_registry() -> SourceRegistry {
    let mut registry = SourceRegistry::new();
    registry.register(Box::new(MockSourceFactory));
    registry.register(Box::new(CsvSourceFactory));
    registry
}

/// Creates the configured source and a controller on top of it.
pub async fn build_controller(config: &AppConfig) -> Result<WizardController> {
    let registry = build_registry();
    let backend = registry
        .resolve(&config.source)
        .context("cannot choose a recommendation source")?;
    debug!(
        backend,
        location = %config.source.location,
        available = ?registry.available_backends(),
        "creating recommendation source"
    );
    let source = registry
        .create(backend, &config.source)
        .await
        .with_context(|| format!("cannot create '{backend}' recommendation source"))?;

    let settings = config.wizard_settings();
    info!(
        source = source.name(),
        delay_ms = settings.fetch_delay.as_millis() as u64,
        validation = ?settings.validation,
        "wizard ready"
    );
    Ok(WizardController::new(source, settings))
}
