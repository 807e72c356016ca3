//! Persistence boundary for computed results.
//!
//! Projection and depreciation outputs are derived data: each run replaces
//! whatever was stored for the same owner and record wholesale, so reruns are
//! idempotent. The in-memory store backs tests and the CLI; a database-backed
//! implementation plugs in behind the same trait.

use std::collections::HashMap;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use crate::depreciation::DepreciationRecord;
use crate::error::RentSimError;
use crate::projection::{project, SimulationParameters, YearlyResult};
use crate::RentSimResult;

/// Owner scope for stored rows. Every read and write is keyed by tenant, so
/// one tenant can never observe another's results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TenantId(pub u64);

/// Storage for derived simulation output.
pub trait ResultStore {
    /// Replace all projection rows for a simulation.
    fn replace_results(
        &self,
        tenant: TenantId,
        simulation_id: u64,
        rows: Vec<YearlyResult>,
    ) -> RentSimResult<()>;

    fn results(&self, tenant: TenantId, simulation_id: u64) -> RentSimResult<Vec<YearlyResult>>;

    /// Replace the stored depreciation register for an asset.
    fn replace_depreciation(
        &self,
        tenant: TenantId,
        asset_id: u64,
        rows: Vec<DepreciationRecord>,
    ) -> RentSimResult<()>;

    fn depreciation(
        &self,
        tenant: TenantId,
        asset_id: u64,
    ) -> RentSimResult<Vec<DepreciationRecord>>;
}

type Keyed<T> = Mutex<HashMap<(TenantId, u64), Vec<T>>>;

/// Tenant-scoped in-memory store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    results: Keyed<YearlyResult>,
    depreciation: Keyed<DepreciationRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned(what: &str) -> RentSimError {
    RentSimError::Persistence(format!("{what} lock poisoned"))
}

impl ResultStore for MemoryStore {
    fn replace_results(
        &self,
        tenant: TenantId,
        simulation_id: u64,
        rows: Vec<YearlyResult>,
    ) -> RentSimResult<()> {
        let mut map = self.results.lock().map_err(|_| poisoned("results"))?;
        map.insert((tenant, simulation_id), rows);
        Ok(())
    }

    fn results(&self, tenant: TenantId, simulation_id: u64) -> RentSimResult<Vec<YearlyResult>> {
        let map = self.results.lock().map_err(|_| poisoned("results"))?;
        Ok(map.get(&(tenant, simulation_id)).cloned().unwrap_or_default())
    }

    fn replace_depreciation(
        &self,
        tenant: TenantId,
        asset_id: u64,
        rows: Vec<DepreciationRecord>,
    ) -> RentSimResult<()> {
        let mut map = self
            .depreciation
            .lock()
            .map_err(|_| poisoned("depreciation"))?;
        map.insert((tenant, asset_id), rows);
        Ok(())
    }

    fn depreciation(
        &self,
        tenant: TenantId,
        asset_id: u64,
    ) -> RentSimResult<Vec<DepreciationRecord>> {
        let map = self
            .depreciation
            .lock()
            .map_err(|_| poisoned("depreciation"))?;
        Ok(map.get(&(tenant, asset_id)).cloned().unwrap_or_default())
    }
}

/// Project and persist in one step: runs the simulation, then replaces the
/// stored rows for `(tenant, simulation_id)` with the fresh output.
pub fn run_simulation(
    store: &dyn ResultStore,
    tenant: TenantId,
    simulation_id: u64,
    params: &SimulationParameters,
) -> RentSimResult<Vec<YearlyResult>> {
    let output = project(params)?;
    store.replace_results(tenant, simulation_id, output.result.clone())?;
    Ok(output.result)
}
