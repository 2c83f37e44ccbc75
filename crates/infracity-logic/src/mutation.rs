//! Interactive resource addition: the only mutation after generation.
//!
//! Appends one component to one tenant. `resources` and `components` are
//! updated together or not at all.

use crate::catalog;
use crate::model::{Component, Tenant};
use crate::names;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;

/// A user's request to add one resource to a tenant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddResourceRequest {
    pub tenant_id: String,
    pub resource_type: String,
    pub description: String,
    pub resource_group: String,
}

impl AddResourceRequest {
    pub fn new(tenant_id: &str, resource_type: &str, description: &str, resource_group: &str) -> Self {
        Self {
            tenant_id: tenant_id.to_string(),
            resource_type: resource_type.to_string(),
            description: description.to_string(),
            resource_group: resource_group.to_string(),
        }
    }
}

/// Why a resource addition was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddResourceError {
    #[error("description is empty")]
    EmptyDescription,
    #[error("resource group is empty")]
    EmptyResourceGroup,
    #[error("unknown tenant '{0}'")]
    UnknownTenant(String),
    #[error("resource type '{0}' cannot be added")]
    UnknownResourceType(String),
    #[error("tenant '{0}' has no floors to extend")]
    NoFloors(String),
}

/// Check the tenant-independent fields of a request.
pub fn validate_request(request: &AddResourceRequest) -> Result<(), AddResourceError> {
    if request.description.trim().is_empty() {
        return Err(AddResourceError::EmptyDescription);
    }
    if request.resource_group.trim().is_empty() {
        return Err(AddResourceError::EmptyResourceGroup);
    }
    if !catalog::is_addable(&request.resource_type) {
        return Err(AddResourceError::UnknownResourceType(
            request.resource_type.clone(),
        ));
    }
    Ok(())
}

/// Append the requested component to `tenant`, returning a copy of it.
pub fn append_to_tenant(
    tenant: &mut Tenant,
    request: &AddResourceRequest,
) -> Result<Component, AddResourceError> {
    validate_request(request)?;
    if !tenant.has_floors() {
        return Err(AddResourceError::NoFloors(tenant.id.clone()));
    }
    let template = catalog::template(&request.resource_type)
        .ok_or_else(|| AddResourceError::UnknownResourceType(request.resource_type.clone()))?;

    let component = Component {
        resource_type: template.resource_type.to_string(),
        description: request.description.trim().to_string(),
        code: template.code.to_string(),
        display_type: template.label.to_string(),
        resource_group: request.resource_group.trim().to_string(),
        resource_name: unique_resource_name(&tenant.name, template.resource_type),
    };
    tenant.push_component(component.clone());
    Ok(component)
}

/// Apply a request to a tenant collection in place.
pub fn try_add_resource(
    tenants: &mut [Tenant],
    request: &AddResourceRequest,
) -> Result<Component, AddResourceError> {
    validate_request(request)?;
    let tenant = tenants
        .iter_mut()
        .find(|t| t.id == request.tenant_id)
        .ok_or_else(|| AddResourceError::UnknownTenant(request.tenant_id.clone()))?;
    append_to_tenant(tenant, request)
}

/// Add a resource, returning the updated collection.
///
/// Invalid requests are a silent no-op: the collection comes back unchanged
/// and the rejection is only logged.
pub fn add_resource(
    mut tenants: Vec<Tenant>,
    tenant_id: &str,
    resource_type: &str,
    description: &str,
    resource_group: &str,
) -> Vec<Tenant> {
    let request = AddResourceRequest::new(tenant_id, resource_type, description, resource_group);
    match try_add_resource(&mut tenants, &request) {
        Ok(component) => log::info!(
            "Added {} '{}' to {}",
            component.resource_type,
            component.resource_name,
            tenant_id
        ),
        Err(e) => log::warn!("Rejected resource addition for {}: {}", tenant_id, e),
    }
    tenants
}

/// `<tenant-slug>-<shorttype>-<stamp>`, unique within the process.
pub fn unique_resource_name(tenant_name: &str, resource_type: &str) -> String {
    format!(
        "{}-{}-{}",
        names::slug(tenant_name),
        names::short_type(resource_type),
        next_stamp()
    )
}

/// Millisecond wall-clock stamp, bumped past the previous one when the
/// clock has not advanced.
fn next_stamp() -> u64 {
    static LAST: AtomicU64 = AtomicU64::new(0);
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    let prev = LAST
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
            Some(now.max(last + 1))
        })
        .unwrap_or_else(|last| last);
    now.max(prev + 1)
}
