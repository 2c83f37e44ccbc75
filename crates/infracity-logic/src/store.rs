//! Shared city state for concurrent resource additions.
//!
//! Each tenant sits behind its own mutex: additions to one tenant serialize,
//! additions to different tenants don't contend. Links never change after
//! generation so they are shared read-only.

use crate::model::{CitySnapshot, Component, GenerationStats, Link, Tenant};
use crate::mutation::{append_to_tenant, validate_request, AddResourceError, AddResourceRequest};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

pub struct CityStore {
    /// Generation order is kept for snapshots.
    tenants: Vec<Mutex<Tenant>>,
    index: HashMap<String, usize>,
    links: Vec<Link>,
    stats: GenerationStats,
}

impl CityStore {
    pub fn from_snapshot(snapshot: CitySnapshot) -> Self {
        let index = snapshot
            .tenants
            .iter()
            .enumerate()
            .map(|(i, t)| (t.id.clone(), i))
            .collect();
        Self {
            tenants: snapshot.tenants.into_iter().map(Mutex::new).collect(),
            index,
            links: snapshot.links,
            stats: snapshot.stats,
        }
    }

    pub fn len(&self) -> usize {
        self.tenants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tenants.is_empty()
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// Cloned view of one tenant.
    pub fn tenant(&self, id: &str) -> Option<Tenant> {
        let slot = self.index.get(id)?;
        Some(lock(&self.tenants[*slot]).clone())
    }

    /// Cloned view of the whole city, tenants in generation order.
    pub fn snapshot(&self) -> CitySnapshot {
        CitySnapshot {
            tenants: self.tenants.iter().map(|t| lock(t).clone()).collect(),
            links: self.links.clone(),
            stats: self.stats,
        }
    }

    /// Append a component to one tenant under that tenant's lock.
    pub fn add_resource(&self, request: &AddResourceRequest) -> Result<Component, AddResourceError> {
        validate_request(request)?;
        let slot = self
            .index
            .get(&request.tenant_id)
            .ok_or_else(|| AddResourceError::UnknownTenant(request.tenant_id.clone()))?;
        let mut tenant = lock(&self.tenants[*slot]);
        let result = append_to_tenant(&mut tenant, request);
        match &result {
            Ok(component) => log::debug!(
                "Store: added {} to {}",
                component.resource_type,
                request.tenant_id
            ),
            Err(e) => log::warn!("Store: rejected addition to {}: {}", request.tenant_id, e),
        }
        result
    }
}

/// A poisoned tenant lock still holds an aligned tenant: appends only touch
/// the vectors after every fallible step has passed.
fn lock(tenant: &Mutex<Tenant>) -> MutexGuard<'_, Tenant> {
    tenant.lock().unwrap_or_else(PoisonError::into_inner)
}
