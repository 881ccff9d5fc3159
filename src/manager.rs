//! Database lifecycle manager with atomic hot reload.

use std::path::Path;
use std::sync::Arc;

use arc_swap::ArcSwapOption;
use log::info;

use crate::binary::Database;
use crate::Result;

/// Shared handle over a reloadable database.
///
/// `load` opens and validates the new file before swapping it in, so readers
/// always see either the old database or the fully validated new one, never
/// a half-open state. In-flight lookups keep the old mapping alive through
/// their `Arc` until they finish.
#[derive(Default)]
pub struct GeoManager {
    db: ArcSwapOption<Database>,
}

impl GeoManager {
    /// Create a manager with no database loaded.
    pub fn new() -> Self {
        Self {
            db: ArcSwapOption::const_empty(),
        }
    }

    /// Open a database file and atomically swap it in.
    ///
    /// On failure the previously loaded database, if any, stays in place.
    pub fn load(&self, path: &Path) -> Result<()> {
        let db = Database::open(path)?;
        info!(
            "loaded database {} ({} entries)",
            path.display(),
            db.entry_count()
        );
        self.db.store(Some(Arc::new(db)));
        Ok(())
    }

    /// Whether a database is currently loaded.
    pub fn is_loaded(&self) -> bool {
        self.db.load().is_some()
    }

    /// Drop the current database, if any.
    pub fn unload(&self) {
        self.db.store(None);
    }

    /// Look up the label covering a numeric address.
    pub fn lookup(&self, ip: u32) -> Option<String> {
        self.db.load().as_ref()?.lookup(ip).map(str::to_owned)
    }

    /// Look up the label covering a dotted-quad address.
    pub fn lookup_str(&self, ip: &str) -> Option<String> {
        self.db.load().as_ref()?.lookup_str(ip).map(str::to_owned)
    }
}
