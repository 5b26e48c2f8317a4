//! Migration engine logic, leaf-first: source withdrawal, pool gateway,
//! settlement, then the orchestrator that sequences them under a unit of
//! work.

pub mod multicall;
pub mod orchestrator;
pub mod pool_gateway;
pub mod settlement;
pub mod source_withdrawal;
pub mod unit_of_work;

pub use multicall::{CallOutput, MigratorCall};
pub use orchestrator::{MigrationStage, Migrator};
pub use pool_gateway::MintedPosition;
pub use settlement::Refunds;
pub use unit_of_work::{atomically, UnitOfWork};
