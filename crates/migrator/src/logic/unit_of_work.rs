/// Unit of Work Pattern for Host State
///
/// Opens a journal checkpoint on the host before an operation runs and either
/// commits or reverts it when the operation finishes. A unit dropped without
/// an explicit decision reverts, so an early return or panic inside an
/// operation can never leave partial effects behind.
use migrator_core::host::Journal;
use tracing::{debug, warn};

use crate::error::MigratorResult;

/// Checkpointed view of a host
pub struct UnitOfWork<'h, H: Journal> {
    host: &'h mut H,

    /// Journal depth this unit opened
    depth: usize,

    /// Track if unit has been committed or reverted
    finished: bool,
}

impl<'h, H: Journal> UnitOfWork<'h, H> {
    /// Open a checkpoint on `host`
    pub fn begin(host: &'h mut H) -> Self {
        let depth = host.checkpoint();
        debug!(depth, "opened checkpoint");
        Self {
            host,
            depth,
            finished: false,
        }
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Host access for the operation running inside this unit
    pub fn host(&mut self) -> &mut H {
        &mut *self.host
    }

    /// Keep every change made since `begin`
    pub fn commit(mut self) -> MigratorResult<()> {
        // A failed commit leaves the checkpoint open for `Drop` to revert
        self.host.commit()?;
        self.finished = true;
        debug!(depth = self.depth, "committed checkpoint");
        Ok(())
    }

    /// Discard every change made since `begin`
    pub fn rollback(mut self) -> MigratorResult<()> {
        self.finished = true;
        self.host.revert()?;
        debug!(depth = self.depth, "reverted checkpoint");
        Ok(())
    }
}

impl<H: Journal> Drop for UnitOfWork<'_, H> {
    fn drop(&mut self) {
        if !self.finished {
            if let Err(err) = self.host.revert() {
                warn!(depth = self.depth, error = %err, "failed to revert abandoned checkpoint");
            }
        }
    }
}

/// Run `operation` inside its own unit of work: commit on success, revert on
/// failure. Units nest, so an atomic operation may call other atomic
/// operations.
pub fn atomically<H, T, F>(host: &mut H, operation: F) -> MigratorResult<T>
where
    H: Journal,
    F: FnOnce(&mut H) -> MigratorResult<T>,
{
    let mut unit = UnitOfWork::begin(host);
    match operation(unit.host()) {
        Ok(value) => {
            unit.commit()?;
            Ok(value)
        }
        Err(err) => {
            if let Err(revert_err) = unit.rollback() {
                warn!(error = %revert_err, "rollback failed");
            }
            Err(err)
        }
    }
}
