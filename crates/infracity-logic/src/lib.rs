//! Pure city generation logic for InfraCity.
//!
//! This crate turns a handful of environment/tier parameters into a mock
//! infrastructure inventory laid out as a city: tenants become buildings in
//! per-environment zones, their resources become floors, and data/sync/backup
//! relationships become links. Functions take plain data and return results,
//! so the renderer, the headless harness, and tests all share one code path.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`catalog`] | Resource type → description, config snippet, display label |
//! | [`config`] | Population targets, landmark spacing, naming style, validation |
//! | [`generator`] | Tiered tenants, singletons, placement, link graph |
//! | [`model`] | Tenant, Component, Link, CitySnapshot |
//! | [`mutation`] | Interactive resource addition with silent-no-op validation |
//! | [`names`] | Tenant names and synthetic resource-group/resource-name strings |
//! | [`placement`] | Zone sampling and capped rejection sampling |
//! | [`scene`] | Colors, heights, flow segments, legend, filtering for renderers |
//! | [`store`] | Per-tenant locking for concurrent additions |
//! | [`validation`] | Invariant checks over generated snapshots |
//! | [`zones`] | Per-environment bounding boxes |
//!
//! ```
//! use infracity_logic::config::CityConfig;
//! use infracity_logic::generator::generate_city;
//! use infracity_logic::mutation::add_resource;
//!
//! let city = generate_city(&CityConfig::default());
//! assert_eq!(city.tenants.len(), 104);
//!
//! let tenants = add_resource(city.tenants, "qa-midrise-1", "cache", "Session cache", "rg-qa-demo");
//! let qa = tenants.iter().find(|t| t.id == "qa-midrise-1").unwrap();
//! assert_eq!(qa.components.last().unwrap().resource_type, "cache");
//! ```

pub mod catalog;
pub mod config;
pub mod generator;
pub mod model;
pub mod mutation;
pub mod names;
pub mod placement;
pub mod scene;
pub mod store;
pub mod validation;
pub mod zones;

pub use generator::{city, generate_city};
pub use model::{CitySnapshot, Component, Env, Link, LinkType, Position, Tenant, Tier};
pub use mutation::add_resource;
