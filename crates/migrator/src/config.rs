//! Engine configuration
//!
//! The fixed addresses an engine instance works with. They never change
//! after construction.

use migrator_core::Address;
use serde::{Deserialize, Serialize};

use crate::error::{MigrationError, MigratorResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct MigratorConfig {
    /// Account the engine holds balances and approvals under
    pub engine: Address,

    /// Position manager that mints destination positions and pulls tokens
    pub position_manager: Address,

    /// Concentrated-liquidity factory
    pub factory: Address,

    /// Wrapper of the native currency
    pub wrapped_native: Address,
}

impl MigratorConfig {
    pub fn new(
        engine: Address,
        position_manager: Address,
        factory: Address,
        wrapped_native: Address,
    ) -> MigratorResult<Self> {
        let config = Self {
            engine,
            position_manager,
            factory,
            wrapped_native,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> MigratorResult<()> {
        let named = [
            ("engine", self.engine),
            ("position_manager", self.position_manager),
            ("factory", self.factory),
            ("wrapped_native", self.wrapped_native),
        ];

        for (i, (name, address)) in named.iter().enumerate() {
            if address.is_zero() {
                return Err(MigrationError::InvalidConfig(format!("{} is the zero address", name)));
            }
            if let Some((other, _)) = named[i + 1..].iter().find(|(_, a)| a == address) {
                return Err(MigrationError::InvalidConfig(format!(
                    "{} and {} share address {}",
                    name, other, address
                )));
            }
        }

        Ok(())
    }
}
