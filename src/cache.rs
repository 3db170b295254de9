use crate::config::TaylorConfig;
use crate::constants::{ConstantSource, MpfrConstants};
use crate::error::{Error, Result};
use crate::fixed::Fixed;
use crate::taylor::{gamma_taylor_coefficients, TaylorCoefficients};
use crate::zeta::zeta_array;
use moka::sync::Cache;
use std::sync::Arc;
use tracing::{info, trace};

/// Coefficient tables keyed by requested precision.
///
/// Entries are never evicted or replaced. Concurrent misses on the same
/// precision are coalesced into a single computation, so the cache can be
/// shared across threads as is.
pub struct GammaTaylorCache {
    entries: Cache<u32, Arc<TaylorCoefficients>>,
    config: TaylorConfig,
    constants: Arc<dyn ConstantSource>,
}

impl GammaTaylorCache {
    pub fn new() -> Self {
        GammaTaylorCache::with_config(TaylorConfig::default(), Arc::new(MpfrConstants::new()))
    }

    pub fn with_config(config: TaylorConfig, constants: Arc<dyn ConstantSource>) -> Self {
        GammaTaylorCache {
            entries: Cache::builder().name("gamma-taylor-coefficients").build(),
            config,
            constants,
        }
    }

    pub fn config(&self) -> &TaylorConfig {
        &self.config
    }

    pub fn coefficients(&self, prec: u32) -> Result<Arc<TaylorCoefficients>> {
        if let Some(table) = self.entries.get(&prec) {
            trace!(prec, "coefficient cache hit");
            return Ok(table);
        }
        self.entries
            .try_get_with(prec, || -> Result<Arc<TaylorCoefficients>> {
                let table = gamma_taylor_coefficients(prec, &self.config, self.constants.as_ref())?;
                info!(prec, terms = table.len(), "cached gamma Taylor coefficients");
                Ok(Arc::new(table))
            })
            .map_err(|error: Arc<Error>| (*error).clone())
    }

    /// Uncached zeta values computed with this cache's configuration.
    pub fn zeta_array(&self, n: usize, wp: u32) -> Result<Vec<Fixed>> {
        zeta_array(n, wp, &self.config, self.constants.as_ref())
    }

    pub fn contains(&self, prec: u32) -> bool {
        self.entries.contains_key(&prec)
    }

    pub fn len(&self) -> usize {
        self.entries.run_pending_tasks();
        self.entries.entry_count() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for GammaTaylorCache {
    fn default() -> Self {
        GammaTaylorCache::new()
    }
}
