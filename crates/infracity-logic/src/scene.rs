//! Read-only projections of a city for the rendering layer.
//!
//! Colors, building heights, floor offsets, link flow segments, legend
//! counts, and building/link filtering. Nothing here mutates a snapshot.

use crate::model::{CitySnapshot, Env, Link, LinkType, Position, Tenant, Tier, LANDMARK_ID};
use std::collections::HashSet;

/// Height of one resource's worth of building.
pub const FLOOR_HEIGHT: f32 = 0.5;
/// Vertical gap between floors of an exploded building.
pub const EXPLODED_FLOOR_SPACING: f32 = 1.2;

/// Fill color for an environment's buildings.
pub fn env_color(env: Env) -> &'static str {
    match env {
        Env::Dev => "#22c55e",
        Env::Qa => "#eab308",
        Env::Prod => "#3b82f6",
        Env::Dr => "#f97316",
        Env::Central => "#6b7280",
    }
}

/// Legend label for an environment.
pub fn env_label(env: Env) -> &'static str {
    match env {
        Env::Prod => "Production",
        Env::Dev => "Development",
        Env::Qa => "QA/Staging",
        Env::Dr => "Disaster Recovery",
        Env::Central => "Central/Control",
    }
}

/// Particle color for a link type.
pub fn link_color(link_type: LinkType) -> &'static str {
    match link_type {
        LinkType::Data => "#3b82f6",
        LinkType::Sync => "#10b981",
        LinkType::Backup => "#f59e0b",
    }
}

/// Building height: half a unit per resource plus a half-unit base.
pub fn building_height(tenant: &Tenant) -> f32 {
    tenant.resources.len() as f32 * FLOOR_HEIGHT + FLOOR_HEIGHT
}

/// Elevation of floor `index` (0-based) when a building is exploded.
pub fn exploded_floor_height(index: usize) -> f32 {
    index as f32 * EXPLODED_FLOOR_SPACING + FLOOR_HEIGHT
}

/// Only the landmark can be opened floor by floor.
pub fn is_explorable(tenant: &Tenant) -> bool {
    tenant.id == LANDMARK_ID
}

/// A link resolved to ground coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowSegment {
    pub from: String,
    pub to: String,
    pub link_type: LinkType,
    pub start: Position,
    pub end: Position,
}

impl FlowSegment {
    pub fn length(&self) -> f32 {
        self.start.distance(&self.end)
    }

    /// Point at `progress` (0..=1) along the segment.
    pub fn point_at(&self, progress: f32) -> Position {
        let t = progress.clamp(0.0, 1.0);
        Position::new(
            self.start.x + (self.end.x - self.start.x) * t,
            self.start.z + (self.end.z - self.start.z) * t,
        )
    }
}

/// Resolve every link whose endpoints exist; dangling links are skipped.
pub fn resolve_flows(tenants: &[Tenant], links: &[Link]) -> Vec<FlowSegment> {
    links
        .iter()
        .filter_map(|link| {
            let from = tenants.iter().find(|t| t.id == link.from)?;
            let to = tenants.iter().find(|t| t.id == link.to)?;
            Some(FlowSegment {
                from: link.from.clone(),
                to: link.to.clone(),
                link_type: link.link_type,
                start: from.position,
                end: to.position,
            })
        })
        .collect()
}

/// Tenant counts per environment, in legend order.
pub fn env_legend(snapshot: &CitySnapshot) -> Vec<(Env, usize)> {
    Env::ALL
        .into_iter()
        .map(|env| (env, snapshot.tenants_in(env).count()))
        .collect()
}

/// Building and link filter. Empty sets mean "everything".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CityFilter {
    pub envs: HashSet<Env>,
    pub tiers: HashSet<Tier>,
    pub link_types: HashSet<LinkType>,
    /// Case-insensitive substring of tenant name or id.
    pub query: String,
}

impl CityFilter {
    pub fn with_envs(mut self, envs: impl IntoIterator<Item = Env>) -> Self {
        self.envs.extend(envs);
        self
    }

    pub fn with_tiers(mut self, tiers: impl IntoIterator<Item = Tier>) -> Self {
        self.tiers.extend(tiers);
        self
    }

    pub fn with_link_types(mut self, types: impl IntoIterator<Item = LinkType>) -> Self {
        self.link_types.extend(types);
        self
    }

    pub fn with_query(mut self, query: &str) -> Self {
        self.query = query.to_string();
        self
    }

    pub fn matches_tenant(&self, tenant: &Tenant) -> bool {
        if !self.envs.is_empty() && !self.envs.contains(&tenant.env) {
            return false;
        }
        if !self.tiers.is_empty() && !tenant.tier.is_some_and(|t| self.tiers.contains(&t)) {
            return false;
        }
        let query = self.query.trim().to_lowercase();
        query.is_empty()
            || tenant.name.to_lowercase().contains(&query)
            || tenant.id.to_lowercase().contains(&query)
    }

    /// Filtered view: kept tenants, and links whose type is selected and
    /// whose endpoints are both kept.
    pub fn apply(&self, snapshot: &CitySnapshot) -> CitySnapshot {
        let tenants: Vec<Tenant> = snapshot
            .tenants
            .iter()
            .filter(|t| self.matches_tenant(t))
            .cloned()
            .collect();
        let kept: HashSet<&str> = tenants.iter().map(|t| t.id.as_str()).collect();
        let links = snapshot
            .links
            .iter()
            .filter(|l| self.link_types.is_empty() || self.link_types.contains(&l.link_type))
            .filter(|l| kept.contains(l.from.as_str()) && kept.contains(l.to.as_str()))
            .cloned()
            .collect();
        CitySnapshot {
            tenants,
            links,
            stats: snapshot.stats,
        }
    }
}
