//! Core data model: tenants, their component floors, and the links between them.
//!
//! Everything here is plain data. Generation fills it in once; after that the
//! only mutation is appending a component to one tenant (see [`crate::mutation`]).

use serde::{Deserialize, Serialize};

/// Id of the central control plane singleton.
pub const CONTROL_PLANE_ID: &str = "control-plane";

/// Id of the explorable landmark tenant.
pub const LANDMARK_ID: &str = "time-portal";

/// Deployment environment of a tenant. Decides its zone and its color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Env {
    Dev,
    Qa,
    Prod,
    Dr,
    Central,
}

impl Env {
    /// All environments in legend order.
    pub const ALL: [Env; 5] = [Env::Prod, Env::Dev, Env::Qa, Env::Dr, Env::Central];

    /// Lowercase tag used in ids and synthetic resource names.
    pub fn tag(self) -> &'static str {
        match self {
            Env::Dev => "dev",
            Env::Qa => "qa",
            Env::Prod => "prod",
            Env::Dr => "dr",
            Env::Central => "central",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Env> {
        Env::ALL.into_iter().find(|env| env.tag() == tag)
    }
}

impl std::fmt::Display for Env {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// Building size class. Only influences how many resources a tenant gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tier {
    Skyscraper,
    MidRise,
}

impl Tier {
    /// Inclusive resource-count range for this tier.
    pub fn resource_range(self) -> std::ops::RangeInclusive<usize> {
        match self {
            Tier::Skyscraper => 8..=12,
            Tier::MidRise => 3..=6,
        }
    }
}

/// Semantic kind of a relationship edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkType {
    Data,
    Sync,
    Backup,
}

impl LinkType {
    pub const ALL: [LinkType; 3] = [LinkType::Data, LinkType::Sync, LinkType::Backup];
}

/// Ground-plane coordinate in city space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub z: f32,
}

impl Position {
    pub fn new(x: f32, z: f32) -> Self {
        Self { x, z }
    }

    /// Euclidean distance on the ground plane.
    pub fn distance(&self, other: &Position) -> f32 {
        (self.x - other.x).hypot(self.z - other.z)
    }
}

/// One provisioned resource inside a tenant, rendered as a floor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Component {
    #[serde(rename = "type")]
    pub resource_type: String,
    pub description: String,
    pub code: String,
    pub display_type: String,
    pub resource_group: String,
    pub resource_name: String,
}

/// One infrastructure account/environment instance, rendered as a building.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tenant {
    pub id: String,
    pub name: String,
    pub env: Env,
    pub position: Position,
    pub resources: Vec<String>,
    /// Index-aligned with `resources`. Empty for tenants without floors.
    pub components: Vec<Component>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tier: Option<Tier>,
}

impl Tenant {
    /// Whether this tenant exposes per-resource floors.
    pub fn has_floors(&self) -> bool {
        !self.components.is_empty()
    }

    /// Append one component, keeping `resources` aligned.
    pub(crate) fn push_component(&mut self, component: Component) {
        self.resources.push(component.resource_type.clone());
        self.components.push(component);
    }
}

/// Directed, typed edge between two tenant ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub from: String,
    pub to: String,
    #[serde(rename = "type")]
    pub link_type: LinkType,
}

impl Link {
    pub fn new(from: &str, to: &str, link_type: LinkType) -> Self {
        Self {
            from: from.to_string(),
            to: to.to_string(),
            link_type,
        }
    }
}

/// Bookkeeping from a generation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GenerationStats {
    /// Placement attempts spent on the landmark (1..=cap).
    pub landmark_attempts: u32,
    /// Whether the accepted landmark position met the spacing constraint.
    pub landmark_spaced: bool,
}

/// Complete output of one generation pass.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CitySnapshot {
    pub tenants: Vec<Tenant>,
    pub links: Vec<Link>,
    #[serde(default)]
    pub stats: GenerationStats,
}

impl CitySnapshot {
    pub fn tenant(&self, id: &str) -> Option<&Tenant> {
        self.tenants.iter().find(|t| t.id == id)
    }

    pub fn tenants_in(&self, env: Env) -> impl Iterator<Item = &Tenant> {
        self.tenants.iter().filter(move |t| t.env == env)
    }

    pub fn links_of_type(&self, link_type: LinkType) -> impl Iterator<Item = &Link> {
        self.links.iter().filter(move |l| l.link_type == link_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_tags_round_trip() {
        for env in Env::ALL {
            assert_eq!(Env::from_tag(env.tag()), Some(env));
        }
        assert_eq!(Env::from_tag("staging"), None);
    }

    #[test]
    fn tier_ranges() {
        assert_eq!(Tier::Skyscraper.resource_range(), 8..=12);
        assert_eq!(Tier::MidRise.resource_range(), 3..=6);
    }

    #[test]
    fn wire_names_match_data_model() {
        assert_eq!(serde_json::to_string(&Env::Central).unwrap(), "\"central\"");
        assert_eq!(serde_json::to_string(&Tier::MidRise).unwrap(), "\"mid-rise\"");
        assert_eq!(serde_json::to_string(&LinkType::Backup).unwrap(), "\"backup\"");

        let link = Link::new("a", "b", LinkType::Sync);
        let json = serde_json::to_value(&link).unwrap();
        assert_eq!(json["type"], "sync");
    }

    #[test]
    fn component_fields_are_camel_case() {
        let component = Component {
            resource_type: "cache".into(),
            description: "d".into(),
            code: "c".into(),
            display_type: "Cache Layer".into(),
            resource_group: "rg".into(),
            resource_name: "rn".into(),
        };
        let json = serde_json::to_value(&component).unwrap();
        assert_eq!(json["type"], "cache");
        assert_eq!(json["displayType"], "Cache Layer");
        assert_eq!(json["resourceGroup"], "rg");
        assert_eq!(json["resourceName"], "rn");
    }

    #[test]
    fn distance_is_euclidean() {
        let a = Position::new(0.0, 0.0);
        let b = Position::new(3.0, 4.0);
        assert!((a.distance(&b) - 5.0).abs() < 1e-6);
    }
}
