//! Invariant checks for generated cities.
//!
//! Pure functions that take a snapshot and return validation errors. A
//! non-empty `Error` list means generation itself is broken, never user input.

use crate::catalog;
use crate::config::CityConfig;
use crate::model::{CitySnapshot, Env, LinkType, Tenant, CONTROL_PLANE_ID, LANDMARK_ID};
use crate::placement::nearest_distance;
use crate::zones::zone_for;
use std::collections::{HashMap, HashSet};

/// A city validation error.
#[derive(Debug, Clone)]
pub struct ValidationError {
    pub category: &'static str,
    pub severity: Severity,
    pub message: String,
}

/// Error severity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Severity {
    Error,
    Warning,
}

fn error(category: &'static str, message: String) -> ValidationError {
    ValidationError {
        category,
        severity: Severity::Error,
        message,
    }
}

// ── A. Tenants ──────────────────────────────────────────────────────────

/// Every tenant sits inside its environment's zone.
pub fn check_positions_in_zones(tenants: &[Tenant]) -> Vec<ValidationError> {
    tenants
        .iter()
        .filter(|t| !zone_for(t.env).contains(t.position))
        .map(|t| {
            error(
                "placement",
                format!(
                    "Tenant {} at ({:.2},{:.2}) is outside the {} zone",
                    t.id, t.position.x, t.position.z, t.env
                ),
            )
        })
        .collect()
}

/// Tenant ids are unique.
pub fn check_unique_ids(tenants: &[Tenant]) -> Vec<ValidationError> {
    let mut seen = HashSet::new();
    tenants
        .iter()
        .filter(|t| !seen.insert(t.id.as_str()))
        .map(|t| error("identity", format!("Duplicate tenant id {}", t.id)))
        .collect()
}

/// `components[i]` describes `resources[i]` for every tenant with floors.
pub fn check_index_alignment(tenants: &[Tenant]) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for t in tenants.iter().filter(|t| t.has_floors()) {
        if t.resources.len() != t.components.len() {
            errors.push(error(
                "alignment",
                format!(
                    "Tenant {} has {} resources but {} components",
                    t.id,
                    t.resources.len(),
                    t.components.len()
                ),
            ));
            continue;
        }
        for (i, (r, c)) in t.resources.iter().zip(&t.components).enumerate() {
            if r != &c.resource_type {
                errors.push(error(
                    "alignment",
                    format!("Tenant {} floor {} is {} but resource is {}", t.id, i, c.resource_type, r),
                ));
            }
        }
    }
    errors
}

/// Every component is a catalog type and carries the catalog's text. Special
/// types may only appear on the landmark.
pub fn check_catalog_membership(tenants: &[Tenant]) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for t in tenants {
        for c in &t.components {
            match catalog::template(&c.resource_type) {
                None => errors.push(error(
                    "catalog",
                    format!("Tenant {} has unknown component type {}", t.id, c.resource_type),
                )),
                Some(template) if template.code != c.code => errors.push(error(
                    "catalog",
                    format!("Tenant {} component {} code differs from catalog", t.id, c.resource_type),
                )),
                Some(_) if catalog::is_special(&c.resource_type) && t.id != LANDMARK_ID => errors
                    .push(error(
                        "catalog",
                        format!("Special type {} on non-landmark tenant {}", c.resource_type, t.id),
                    )),
                Some(_) => {}
            }
        }
    }
    errors
}

/// Tiered tenants have a resource count inside their tier's range.
///
/// Resource addition only appends, so falling below the range is an error
/// while exceeding it is a warning: a tenant that grew after generation is
/// indistinguishable from an oversized one.
pub fn check_tier_resource_counts(tenants: &[Tenant]) -> Vec<ValidationError> {
    tenants
        .iter()
        .filter_map(|t| t.tier.map(|tier| (t, tier)))
        .filter_map(|(t, tier)| {
            let range = tier.resource_range();
            let count = t.resources.len();
            if count < *range.start() {
                Some(error(
                    "tier",
                    format!(
                        "Tenant {} ({:?}) has {} resources, expected {:?}",
                        t.id, tier, count, range
                    ),
                ))
            } else if count > *range.end() {
                Some(ValidationError {
                    category: "tier",
                    severity: Severity::Warning,
                    message: format!(
                        "Tenant {} ({:?}) has {} resources, above the generated {:?}",
                        t.id, tier, count, range
                    ),
                })
            } else {
                None
            }
        })
        .collect()
}

/// The landmark keeps its spacing from every tenant placed before it, unless
/// placement used up the whole attempt budget.
pub fn check_landmark_spacing(snapshot: &CitySnapshot, config: &CityConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let Some(index) = snapshot.tenants.iter().position(|t| t.id == LANDMARK_ID) else {
        errors.push(error("landmark", "Landmark tenant is missing".to_string()));
        return errors;
    };
    let landmark = &snapshot.tenants[index];
    let earlier: Vec<_> = snapshot.tenants[..index].iter().map(|t| t.position).collect();
    let cap = config.max_placement_attempts.max(1);
    let attempts = snapshot.stats.landmark_attempts;

    if attempts == 0 || attempts > cap {
        errors.push(error(
            "landmark",
            format!("Landmark placement used {attempts} attempts, cap is {cap}"),
        ));
    }

    let nearest = nearest_distance(landmark.position, &earlier);
    let spaced = nearest.map_or(true, |d| d >= config.landmark_spacing);
    if spaced != snapshot.stats.landmark_spaced {
        errors.push(error(
            "landmark",
            format!(
                "Landmark spacing report ({}) disagrees with positions (nearest {:?})",
                snapshot.stats.landmark_spaced, nearest
            ),
        ));
    }
    if !spaced && attempts != cap {
        errors.push(error(
            "landmark",
            format!(
                "Landmark within {:?} of a neighbour after only {} of {} attempts",
                nearest, attempts, cap
            ),
        ));
    } else if !spaced {
        errors.push(ValidationError {
            category: "landmark",
            severity: Severity::Warning,
            message: format!(
                "Landmark spacing not met after {cap} attempts (nearest {:.2})",
                nearest.unwrap_or(0.0)
            ),
        });
    }
    errors
}

// ── B. Links ────────────────────────────────────────────────────────────

/// Every link endpoint names a tenant in the snapshot.
pub fn check_link_endpoints(snapshot: &CitySnapshot) -> Vec<ValidationError> {
    let ids: HashSet<&str> = snapshot.tenants.iter().map(|t| t.id.as_str()).collect();
    let mut errors = Vec::new();
    for link in &snapshot.links {
        for end in [&link.from, &link.to] {
            if !ids.contains(end.as_str()) {
                errors.push(error(
                    "links",
                    format!("Link {} → {} references unknown tenant {}", link.from, link.to, end),
                ));
            }
        }
    }
    errors
}

/// Exactly one data edge per non-control-plane tenant into the control plane,
/// and none out of it.
pub fn check_control_plane_edges(snapshot: &CitySnapshot) -> Vec<ValidationError> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut errors = Vec::new();
    for link in snapshot.links_of_type(LinkType::Data) {
        if link.from == CONTROL_PLANE_ID {
            errors.push(error(
                "links",
                format!("Control plane has an outgoing data edge to {}", link.to),
            ));
        }
        if link.to == CONTROL_PLANE_ID {
            *counts.entry(link.from.as_str()).or_default() += 1;
        }
    }
    for t in snapshot.tenants.iter().filter(|t| t.id != CONTROL_PLANE_ID) {
        let n = counts.get(t.id.as_str()).copied().unwrap_or(0);
        if n != 1 {
            errors.push(error(
                "links",
                format!("Tenant {} has {} data edges to the control plane", t.id, n),
            ));
        }
    }
    errors
}

/// Sync and backup edges follow the environment chain dev → qa → prod → dr.
pub fn check_link_routing(snapshot: &CitySnapshot) -> Vec<ValidationError> {
    let env_of: HashMap<&str, Env> = snapshot
        .tenants
        .iter()
        .map(|t| (t.id.as_str(), t.env))
        .collect();
    let mut errors = Vec::new();
    for link in &snapshot.links {
        let (Some(from), Some(to)) = (env_of.get(link.from.as_str()), env_of.get(link.to.as_str()))
        else {
            continue; // caught by endpoint check
        };
        let ok = match link.link_type {
            LinkType::Data => link.to == CONTROL_PLANE_ID,
            LinkType::Sync => matches!((from, to), (Env::Dev, Env::Qa) | (Env::Qa, Env::Prod)),
            LinkType::Backup => matches!((from, to), (Env::Prod, Env::Dr)),
        };
        if !ok || link.from == link.to {
            errors.push(error(
                "links",
                format!(
                    "{:?} link {} ({}) → {} ({}) breaks routing rules",
                    link.link_type, link.from, from, link.to, to
                ),
            ));
        }
    }
    errors
}

// ── Aggregate ───────────────────────────────────────────────────────────

/// Run every check.
pub fn validate_city(snapshot: &CitySnapshot, config: &CityConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    errors.extend(check_unique_ids(&snapshot.tenants));
    errors.extend(check_positions_in_zones(&snapshot.tenants));
    errors.extend(check_index_alignment(&snapshot.tenants));
    errors.extend(check_catalog_membership(&snapshot.tenants));
    errors.extend(check_tier_resource_counts(&snapshot.tenants));
    errors.extend(check_landmark_spacing(snapshot, config));
    errors.extend(check_link_endpoints(snapshot));
    errors.extend(check_control_plane_edges(snapshot));
    errors.extend(check_link_routing(snapshot));
    errors
}

/// Only the `Error`-severity entries.
pub fn hard_errors(errors: &[ValidationError]) -> Vec<&ValidationError> {
    errors
        .iter()
        .filter(|e| e.severity == Severity::Error)
        .collect()
}
