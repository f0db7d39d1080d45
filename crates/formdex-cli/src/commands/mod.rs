//! Command handlers, one module per subcommand.
//!
//! Handlers translate arguments into calls on the core services and render
//! the results. No business logic lives here.

pub mod categories;
pub mod completions;
pub mod config;
pub mod entities;
pub mod form;
pub mod index;
pub mod validate;

use std::sync::Arc;

use tracing::debug;

use formdex_adapters::{FixedClock, SchemaManifestLoader, StaticTenant, SystemClock};
use formdex_core::{
    application::{Clock, EntityService},
    domain::SchemaRegistry,
};

use crate::{
    cli::GlobalArgs,
    config::AppConfig,
    error::{CliError, CliResult},
};

/// Built-in schemas plus every manifest under `schemas.dir`.
pub(crate) fn load_registry(config: &AppConfig) -> CliResult<SchemaRegistry> {
    let mut registry = SchemaRegistry::builtin().map_err(formdex_core::error::FormdexError::from)?;
    if let Some(dir) = &config.schemas.dir {
        let added = SchemaManifestLoader::new(dir).load_into(&mut registry)?;
        debug!(added, dir = %dir.display(), "Extra schemas registered");
    }
    Ok(registry)
}

/// Wire the registry and the adapters into an [`EntityService`].
pub(crate) fn entity_service(global: &GlobalArgs, config: &AppConfig) -> CliResult<EntityService> {
    let clock: Arc<dyn Clock> = match &global.today {
        Some(today) => Arc::new(FixedClock::parse(today).map_err(|e| CliError::InvalidInput {
            message: format!("--today '{today}' is not a date"),
            source: Some(Box::new(e)),
        })?),
        None => Arc::new(SystemClock::new()),
    };
    Ok(EntityService::new(
        Arc::new(load_registry(config)?),
        clock,
        Arc::new(StaticTenant::new(config.tenant.id.clone())),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use formdex_core::domain::SchemaRegistry;

    #[test]
    fn default_config_loads_the_builtin_registry() {
        let registry = load_registry(&AppConfig::default()).unwrap();
        assert_eq!(registry.len(), SchemaRegistry::builtin().unwrap().len());
    }

    #[test]
    fn missing_schema_dir_is_a_configuration_error() {
        let mut config = AppConfig::default();
        config.schemas.dir = Some("/definitely/not/here".into());
        let err = load_registry(&config).unwrap_err();
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn today_flag_must_be_a_date() {
        let global = GlobalArgs {
            today: Some("soon".into()),
            ..GlobalArgs::default()
        };
        let err = entity_service(&global, &AppConfig::default()).unwrap_err();
        assert!(matches!(err, CliError::InvalidInput { .. }));
    }

    #[test]
    fn today_flag_pins_the_clock() {
        let global = GlobalArgs {
            today: Some("2025-06-15".into()),
            ..GlobalArgs::default()
        };
        let service = entity_service(&global, &AppConfig::default()).unwrap();
        let ctx = service.mapping_context().unwrap();
        assert_eq!(ctx.today(), "20250615");
        assert_eq!(ctx.tenant(), "default");
    }
}
