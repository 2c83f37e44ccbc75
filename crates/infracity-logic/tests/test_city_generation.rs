//! Integration tests for the full city generation pipeline.
//!
//! Exercises: CityConfig → generate_city → validation → add_resource
//!
//! All tests are pure logic, with no rendering.

use infracity_logic::catalog;
use infracity_logic::config::{CityConfig, NamingStyle, TierCounts};
use infracity_logic::generator::{generate_city, generate_city_with_rng};
use infracity_logic::model::{
    CitySnapshot, Env, LinkType, Tier, CONTROL_PLANE_ID, LANDMARK_ID,
};
use infracity_logic::mutation::{add_resource, AddResourceRequest};
use infracity_logic::placement::nearest_distance;
use infracity_logic::store::CityStore;
use infracity_logic::validation::{hard_errors, validate_city};
use infracity_logic::zones::zone_for;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::HashSet;

// ── Helpers ────────────────────────────────────────────────────────────

fn seeded_config(seed: u64) -> CityConfig {
    CityConfig {
        seed: Some(seed),
        ..CityConfig::default()
    }
}

fn default_city() -> CitySnapshot {
    generate_city(&seeded_config(42))
}

// ── Shape ──────────────────────────────────────────────────────────────

#[test]
fn default_population_has_104_tenants() {
    let city = default_city();
    assert_eq!(city.tenants.len(), (10 + 40) + (10 + 25) + (5 + 10) + 2 + 2);
}

#[test]
fn tenant_ids_are_unique() {
    let city = default_city();
    let ids: HashSet<_> = city.tenants.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids.len(), city.tenants.len());
}

#[test]
fn singletons_are_present() {
    let city = default_city();
    let cp = city.tenant(CONTROL_PLANE_ID).expect("control plane");
    assert_eq!(cp.env, Env::Central);
    assert_eq!(cp.position.x, 0.0);
    assert_eq!(cp.position.z, 0.0);
    assert!(cp.components.is_empty());
    assert_eq!(cp.resources.len(), 5);

    let landmark = city.tenant(LANDMARK_ID).expect("landmark");
    assert_eq!(landmark.env, Env::Prod);
    assert_eq!(landmark.resources.len(), 6);
    assert_eq!(landmark.components.len(), 6);
}

// ── Placement ──────────────────────────────────────────────────────────

#[test]
fn every_tenant_is_inside_its_zone() {
    for seed in 0..5 {
        let city = generate_city(&seeded_config(seed));
        for t in &city.tenants {
            assert!(
                zone_for(t.env).contains(t.position),
                "seed {seed}: {} at {:?} outside {} zone",
                t.id,
                t.position,
                t.env
            );
        }
    }
}

#[test]
fn landmark_is_spaced_or_used_every_attempt() {
    for seed in 0..20 {
        let config = seeded_config(seed);
        let city = generate_city(&config);
        let index = city.tenants.iter().position(|t| t.id == LANDMARK_ID).unwrap();
        let earlier: Vec<_> = city.tenants[..index].iter().map(|t| t.position).collect();
        let nearest = nearest_distance(city.tenants[index].position, &earlier).unwrap();

        assert!(city.stats.landmark_attempts >= 1);
        assert!(city.stats.landmark_attempts <= 100);
        assert!(
            nearest >= 15.0 || city.stats.landmark_attempts == 100,
            "seed {seed}: nearest {nearest} after {} attempts",
            city.stats.landmark_attempts
        );
    }
}

#[test]
fn sparse_prod_zone_lets_landmark_keep_its_distance() {
    let mut config = seeded_config(8);
    config.population.prod = TierCounts::new(1, 1);
    for seed in 0..20 {
        config.seed = Some(seed);
        let city = generate_city(&config);
        assert!(city.stats.landmark_spaced, "seed {seed}");
        assert!(city.stats.landmark_attempts < 100);
    }
}

// ── Components ─────────────────────────────────────────────────────────

#[test]
fn components_align_with_resources() {
    let city = default_city();
    for t in city.tenants.iter().filter(|t| t.id != CONTROL_PLANE_ID) {
        assert_eq!(t.resources.len(), t.components.len(), "{}", t.id);
        for (r, c) in t.resources.iter().zip(&t.components) {
            assert_eq!(r, &c.resource_type);
            let template = catalog::template(r).expect("catalog type");
            assert_eq!(c.description, template.description);
            assert_eq!(c.code, template.code);
            assert_eq!(c.display_type, template.label);
        }
    }
}

#[test]
fn tier_resource_counts_are_in_range() {
    let city = default_city();
    for t in &city.tenants {
        match t.tier {
            Some(Tier::Skyscraper) => assert!((8..=12).contains(&t.resources.len()), "{}", t.id),
            Some(Tier::MidRise) => assert!((3..=6).contains(&t.resources.len()), "{}", t.id),
            None => assert!(t.id == CONTROL_PLANE_ID || t.id == LANDMARK_ID),
        }
    }
}

#[test]
fn resources_within_a_tenant_are_distinct() {
    let city = default_city();
    for t in city.tenants.iter().filter(|t| t.tier.is_some()) {
        let unique: HashSet<_> = t.resources.iter().collect();
        assert_eq!(unique.len(), t.resources.len(), "{}", t.id);
    }
}

#[test]
fn synthetic_identifiers_carry_environment() {
    let city = default_city();
    for t in city.tenants.iter().filter(|t| t.has_floors()) {
        for c in &t.components {
            assert!(c.resource_group.starts_with(&format!("rg-{}-", t.env)), "{}", c.resource_group);
            assert!(c.resource_name.starts_with(&format!("{}-", t.env)), "{}", c.resource_name);
        }
    }
}

// ── Links ──────────────────────────────────────────────────────────────

#[test]
fn every_link_endpoint_exists() {
    let city = default_city();
    let ids: HashSet<_> = city.tenants.iter().map(|t| t.id.as_str()).collect();
    for l in &city.links {
        assert!(ids.contains(l.from.as_str()), "dangling from {}", l.from);
        assert!(ids.contains(l.to.as_str()), "dangling to {}", l.to);
        assert_ne!(l.from, l.to);
    }
}

#[test]
fn one_data_edge_per_tenant_into_control_plane() {
    let city = default_city();
    for t in &city.tenants {
        let n = city
            .links
            .iter()
            .filter(|l| l.link_type == LinkType::Data && l.from == t.id && l.to == CONTROL_PLANE_ID)
            .count();
        let expected = if t.id == CONTROL_PLANE_ID { 0 } else { 1 };
        assert_eq!(n, expected, "{}", t.id);
    }
    assert!(city.links.iter().all(|l| l.from != CONTROL_PLANE_ID));
}

#[test]
fn link_counts_follow_environment_chain() {
    let city = default_city();
    let count = |t: LinkType| city.links_of_type(t).count();
    assert_eq!(count(LinkType::Data), 103);
    // dev → qa (35) + qa → prod (15)
    assert_eq!(count(LinkType::Sync), 50);
    // prod (50 + landmark) → dr
    assert_eq!(count(LinkType::Backup), 51);
    assert_eq!(city.links.len(), 204);
}

#[test]
fn sync_and_backup_routes() {
    let city = default_city();
    let env_of = |id: &str| city.tenant(id).map(|t| t.env);
    for l in &city.links {
        let pair = (env_of(&l.from), env_of(&l.to));
        match l.link_type {
            LinkType::Data => assert_eq!(l.to, CONTROL_PLANE_ID),
            LinkType::Sync => assert!(
                pair == (Some(Env::Dev), Some(Env::Qa)) || pair == (Some(Env::Qa), Some(Env::Prod))
            ),
            LinkType::Backup => assert_eq!(pair, (Some(Env::Prod), Some(Env::Dr))),
        }
    }
}

#[test]
fn missing_qa_skips_dev_sync() {
    let mut config = seeded_config(3);
    config.population.qa = TierCounts::default();
    let city = generate_city(&config);
    assert_eq!(city.tenants_in(Env::Qa).count(), 0);
    assert_eq!(city.links_of_type(LinkType::Sync).count(), 0);
    assert!(hard_errors(&validate_city(&city, &config)).is_empty());
}

// ── Randomness ─────────────────────────────────────────────────────────

#[test]
fn unseeded_cities_are_independently_valid() {
    let config = CityConfig::default();
    let a = generate_city(&config);
    let b = generate_city(&config);
    assert!(hard_errors(&validate_city(&a, &config)).is_empty());
    assert!(hard_errors(&validate_city(&b, &config)).is_empty());
    assert_eq!(a.tenants.len(), b.tenants.len());
}

#[test]
fn different_seeds_produce_variation() {
    let positions: HashSet<String> = (0..10)
        .map(|seed| {
            let city = generate_city(&seeded_config(seed));
            format!("{:?}", city.tenants[0].position)
        })
        .collect();
    assert!(positions.len() > 1);
}

#[test]
fn caller_supplied_rng_is_used() {
    let config = CityConfig::default();
    let a = generate_city_with_rng(&config, &mut ChaCha8Rng::seed_from_u64(77));
    let b = generate_city_with_rng(&config, &mut ChaCha8Rng::seed_from_u64(77));
    assert_eq!(a, b);
}

#[test]
fn descriptive_naming_keeps_ids_stable() {
    let mut config = seeded_config(12);
    config.naming = NamingStyle::Descriptive;
    let city = generate_city(&config);
    assert!(city.tenant("prod-skyscraper-1").is_some());
    assert!(city.tenant("dr-site-2").is_some());
    let qa = city.tenant("qa-midrise-4").unwrap();
    assert!(qa.name.ends_with(" 4"));
    assert!(!qa.name.starts_with("QA Building"));
}

// ── Resource addition ──────────────────────────────────────────────────

#[test]
fn add_resource_grows_target_tenant_by_one() {
    let city = default_city();
    let before = city.tenant("dev-skyscraper-2").unwrap().clone();
    let tenants = add_resource(
        city.tenants.clone(),
        "dev-skyscraper-2",
        "message-queue",
        "Order events",
        "rg-dev-events",
    );
    let after = tenants.iter().find(|t| t.id == "dev-skyscraper-2").unwrap();
    assert_eq!(after.resources.len(), before.resources.len() + 1);
    assert_eq!(after.components.len(), before.components.len() + 1);
    assert_eq!(after.components.last().unwrap().resource_type, "message-queue");
    assert_eq!(after.resources.last().unwrap(), "message-queue");

    let changed = tenants
        .iter()
        .zip(&city.tenants)
        .filter(|(a, b)| a != b)
        .count();
    assert_eq!(changed, 1);
}

#[test]
fn add_resource_with_empty_fields_changes_nothing() {
    let city = default_city();
    let unchanged = add_resource(city.tenants.clone(), "qa-midrise-2", "cache", "", "rg-qa");
    assert_eq!(unchanged, city.tenants);
    let unchanged = add_resource(city.tenants.clone(), "qa-midrise-2", "cache", "desc", "");
    assert_eq!(unchanged, city.tenants);
    let unchanged = add_resource(city.tenants.clone(), "missing", "cache", "desc", "rg");
    assert_eq!(unchanged, city.tenants);
}

#[test]
fn grown_city_still_validates() {
    let config = seeded_config(42);
    let store = CityStore::from_snapshot(generate_city(&config));
    for _ in 0..8 {
        let request = AddResourceRequest::new("prod-midrise-1", "cache", "Hot keys", "rg-prod-cache");
        store.add_resource(&request).unwrap();
    }
    let grown = store.snapshot();
    assert!(grown.tenant("prod-midrise-1").unwrap().resources.len() > 6);
    let errors = validate_city(&grown, &config);
    assert!(hard_errors(&errors).is_empty(), "{errors:?}");
}

#[test]
fn snapshot_serializes_with_wire_names() {
    let city = default_city();
    let json = serde_json::to_value(&city).unwrap();
    let landmark = json["tenants"]
        .as_array()
        .unwrap()
        .iter()
        .find(|t| t["id"] == LANDMARK_ID)
        .unwrap();
    assert_eq!(landmark["env"], "prod");
    assert_eq!(landmark["components"][0]["type"], "time-api");
    assert_eq!(landmark["components"][0]["displayType"], "Time API");
    assert!(landmark.get("tier").is_none());
    assert_eq!(json["links"][0]["type"], "data");

    let back: CitySnapshot = serde_json::from_value(json).unwrap();
    assert_eq!(back.links, city.links);
    assert_eq!(back.stats, city.stats);
    for (a, b) in back.tenants.iter().zip(&city.tenants) {
        assert_eq!(a.id, b.id);
        assert_eq!(a.components, b.components);
        assert!((a.position.x - b.position.x).abs() < 1e-4);
    }
}
