//! City generation: tiered tenants, singletons, placement, and the link graph.
//!
//! Pipeline, in order:
//!   1. tiered tenants for prod, dev, qa (skyscrapers then mid-rises)
//!   2. control plane at the origin
//!   3. landmark in the prod zone, rejection-sampled away from stages 1–2
//!   4. DR sites
//!   5. links: data → control plane, dev → qa sync, qa → prod sync, prod → dr backup
//!
//! Shape is fixed by the config; content (resource picks, positions, names,
//! link targets) comes from the RNG.

use crate::catalog::{self, ComponentTemplate, GENERIC_RESOURCE_TYPES, LANDMARK_RESOURCE_TYPES};
use crate::config::{CityConfig, NamingStyle, TierCounts};
use crate::model::{
    CitySnapshot, Component, Env, GenerationStats, Link, LinkType, Position, Tenant, Tier,
    CONTROL_PLANE_ID, LANDMARK_ID,
};
use crate::names;
use crate::placement::place_apart;
use crate::zones::zone_for;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::sync::OnceLock;

/// Environments that get tiered populations, in generation order.
const TIERED_ENVS: [Env; 3] = [Env::Prod, Env::Dev, Env::Qa];

/// Generate a city from `config`, seeding from `config.seed` or OS entropy.
pub fn generate_city(config: &CityConfig) -> CitySnapshot {
    let mut rng = match config.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };
    generate_city_with_rng(config, &mut rng)
}

/// The process-wide city, generated on first use with the default config.
pub fn city() -> &'static CitySnapshot {
    static CITY: OnceLock<CitySnapshot> = OnceLock::new();
    CITY.get_or_init(|| generate_city(&CityConfig::default()))
}

/// Generate a city drawing all randomness from `rng`.
pub fn generate_city_with_rng(config: &CityConfig, rng: &mut impl Rng) -> CitySnapshot {
    log::info!(
        "Generating city: {} tiered tenants, landmark spacing {}",
        config.population.generated_total(),
        config.landmark_spacing
    );

    let mut tenants = Vec::with_capacity(config.expected_tenant_count());

    for env in TIERED_ENVS {
        let counts = config.population.for_env(env);
        tenants.extend(generate_tiered(env, counts, config.naming, rng));
        log::debug!("{}: {} skyscrapers, {} mid-rises", env, counts.skyscrapers, counts.mid_rises);
    }

    tenants.push(control_plane());

    let occupied: Vec<Position> = tenants.iter().map(|t| t.position).collect();
    let placement = place_apart(
        &zone_for(Env::Prod),
        config.landmark_spacing,
        &occupied,
        config.max_placement_attempts,
        rng,
    );
    if placement.spaced {
        log::debug!("Landmark placed after {} attempt(s)", placement.attempts);
    } else {
        log::warn!(
            "Landmark spacing {} not met after {} attempts, keeping last sample",
            config.landmark_spacing,
            placement.attempts
        );
    }
    tenants.push(landmark(placement.position, rng));

    tenants.extend(generate_dr_sites(config.population.dr.mid_rises, config.naming, rng));

    let links = build_links(&tenants, rng);

    log::info!(
        "City generated: {} tenants, {} links",
        tenants.len(),
        links.len()
    );

    CitySnapshot {
        tenants,
        links,
        stats: GenerationStats {
            landmark_attempts: placement.attempts,
            landmark_spaced: placement.spaced,
        },
    }
}

// ── Tenants ─────────────────────────────────────────────────────────────

/// Skyscrapers then mid-rises for one environment, placed uniformly in its zone.
pub fn generate_tiered(
    env: Env,
    counts: TierCounts,
    naming: NamingStyle,
    rng: &mut impl Rng,
) -> Vec<Tenant> {
    let mut tenants = Vec::with_capacity(counts.total() as usize);
    for tier in [Tier::Skyscraper, Tier::MidRise] {
        for n in 1..=counts.get(tier) as usize {
            let name = match naming {
                NamingStyle::Numbered => names::numbered_name(env, tier, n),
                NamingStyle::Descriptive => names::descriptive_name(env, n, rng),
            };
            let templates = select_templates(tier, rng);
            tenants.push(build_tenant(
                names::tenant_id(env, tier, n),
                name,
                env,
                Some(tier),
                &templates,
                rng,
            ));
        }
    }
    tenants
}

/// Mid-rise DR sites in the DR zone.
pub fn generate_dr_sites(count: u32, naming: NamingStyle, rng: &mut impl Rng) -> Vec<Tenant> {
    (1..=count as usize)
        .map(|n| {
            let name = match naming {
                NamingStyle::Numbered => format!("DR Site {n}"),
                NamingStyle::Descriptive => names::descriptive_name(Env::Dr, n, rng),
            };
            let templates = select_templates(Tier::MidRise, rng);
            build_tenant(
                format!("dr-site-{n}"),
                name,
                Env::Dr,
                Some(Tier::MidRise),
                &templates,
                rng,
            )
        })
        .collect()
}

/// Pick a tier-sized set of distinct generic templates, in shuffled order.
pub fn select_templates(tier: Tier, rng: &mut impl Rng) -> Vec<&'static ComponentTemplate> {
    let mut pool = templates_for(&GENERIC_RESOURCE_TYPES);
    pool.shuffle(rng);
    let count = rng.gen_range(tier.resource_range()).min(pool.len());
    pool.truncate(count);
    pool
}

fn templates_for(types: &[&str]) -> Vec<&'static ComponentTemplate> {
    types.iter().filter_map(|t| catalog::template(t)).collect()
}

/// Instantiate one component from its template with fresh synthetic identifiers.
pub fn instantiate(template: &ComponentTemplate, env: Env, rng: &mut impl Rng) -> Component {
    Component {
        resource_type: template.resource_type.to_string(),
        description: template.description.to_string(),
        code: template.code.to_string(),
        display_type: template.label.to_string(),
        resource_group: names::resource_group(env, rng),
        resource_name: names::resource_name(env, template.resource_type, rng),
    }
}

fn build_tenant(
    id: String,
    name: String,
    env: Env,
    tier: Option<Tier>,
    templates: &[&'static ComponentTemplate],
    rng: &mut impl Rng,
) -> Tenant {
    let position = zone_for(env).sample(rng);
    let components: Vec<Component> = templates
        .iter()
        .map(|template| instantiate(template, env, rng))
        .collect();
    Tenant {
        id,
        name,
        env,
        position,
        resources: components.iter().map(|c| c.resource_type.clone()).collect(),
        components,
        tier,
    }
}

/// The central control plane. Lists platform services but has no floors.
pub fn control_plane() -> Tenant {
    Tenant {
        id: CONTROL_PLANE_ID.to_string(),
        name: "Central Control Plane".to_string(),
        env: Env::Central,
        position: Position::new(0.0, 0.0),
        resources: catalog::CONTROL_PLANE_SERVICES
            .iter()
            .map(|s| s.to_string())
            .collect(),
        components: Vec::new(),
        tier: None,
    }
}

/// The explorable landmark at an already-chosen position.
pub fn landmark(position: Position, rng: &mut impl Rng) -> Tenant {
    let templates = templates_for(&LANDMARK_RESOURCE_TYPES);
    let mut tenant = build_tenant(
        LANDMARK_ID.to_string(),
        "Time Portal Services".to_string(),
        Env::Prod,
        None,
        &templates,
        rng,
    );
    tenant.position = position;
    tenant
}

// ── Links ───────────────────────────────────────────────────────────────

/// Build the relationship graph. Rules are additive; duplicates are kept.
pub fn build_links(tenants: &[Tenant], rng: &mut impl Rng) -> Vec<Link> {
    let mut links = Vec::new();

    if tenants.iter().any(|t| t.id == CONTROL_PLANE_ID) {
        links.extend(
            tenants
                .iter()
                .filter(|t| t.id != CONTROL_PLANE_ID)
                .map(|t| Link::new(&t.id, CONTROL_PLANE_ID, LinkType::Data)),
        );
    }

    let dev = in_env(tenants, Env::Dev);
    let qa = in_env(tenants, Env::Qa);
    let prod = in_env(tenants, Env::Prod);
    let dr = in_env(tenants, Env::Dr);

    connect_each(&dev, &qa, LinkType::Sync, &mut links, rng);
    connect_each(&qa, &prod, LinkType::Sync, &mut links, rng);
    connect_each(&prod, &dr, LinkType::Backup, &mut links, rng);

    log::debug!("Built {} links", links.len());
    links
}

fn in_env(tenants: &[Tenant], env: Env) -> Vec<&Tenant> {
    tenants.iter().filter(|t| t.env == env).collect()
}

/// One edge from every source to a uniformly chosen target. No-op without targets.
fn connect_each(
    sources: &[&Tenant],
    targets: &[&Tenant],
    link_type: LinkType,
    links: &mut Vec<Link>,
    rng: &mut impl Rng,
) {
    for source in sources {
        if let Some(target) = targets.choose(rng) {
            links.push(Link::new(&source.id, &target.id, link_type));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn seeded(seed: u64) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(seed)
    }

    #[test]
    fn select_templates_respects_tier_range_and_distinctness() {
        let mut rng = seeded(1);
        for tier in [Tier::Skyscraper, Tier::MidRise] {
            for _ in 0..200 {
                let picked = select_templates(tier, &mut rng);
                assert!(tier.resource_range().contains(&picked.len()));
                let unique: HashSet<_> = picked.iter().map(|t| t.resource_type).collect();
                assert_eq!(unique.len(), picked.len());
                assert!(picked.iter().all(|t| catalog::is_generic(t.resource_type)));
            }
        }
    }

    #[test]
    fn resource_counts_per_tier() {
        let mut rng = seeded(2);
        let seen: HashSet<usize> = (0..500)
            .map(|_| select_templates(Tier::Skyscraper, &mut rng).len())
            .collect();
        // The generic catalog only has 8 types, so larger draws are capped.
        assert_eq!(seen, HashSet::from([8]));
        let seen: HashSet<usize> = (0..500)
            .map(|_| select_templates(Tier::MidRise, &mut rng).len())
            .collect();
        assert_eq!(seen, HashSet::from([3, 4, 5, 6]));
    }

    #[test]
    fn tiered_ids_and_names() {
        let mut rng = seeded(3);
        let tenants = generate_tiered(Env::Qa, TierCounts::new(2, 3), NamingStyle::Numbered, &mut rng);
        let ids: Vec<_> = tenants.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(
            ids,
            ["qa-skyscraper-1", "qa-skyscraper-2", "qa-midrise-1", "qa-midrise-2", "qa-midrise-3"]
        );
        assert_eq!(tenants[0].name, "QA Skyscraper 1");
        assert_eq!(tenants[4].name, "QA Building 3");
        assert_eq!(tenants[0].tier, Some(Tier::Skyscraper));
        assert_eq!(tenants[2].tier, Some(Tier::MidRise));
    }

    #[test]
    fn components_align_with_resources() {
        let mut rng = seeded(4);
        for t in generate_tiered(Env::Dev, TierCounts::new(3, 3), NamingStyle::Numbered, &mut rng) {
            assert_eq!(t.resources.len(), t.components.len());
            for (r, c) in t.resources.iter().zip(&t.components) {
                assert_eq!(r, &c.resource_type);
                assert!(c.resource_group.starts_with("rg-dev-"));
                assert!(c.resource_name.starts_with("dev-"));
            }
        }
    }

    #[test]
    fn landmark_has_six_catalog_floors() {
        let mut rng = seeded(5);
        let tenant = landmark(Position::new(30.0, 0.0), &mut rng);
        assert_eq!(tenant.id, LANDMARK_ID);
        assert_eq!(tenant.env, Env::Prod);
        assert_eq!(tenant.tier, None);
        assert_eq!(tenant.position, Position::new(30.0, 0.0));
        assert_eq!(tenant.resources, LANDMARK_RESOURCE_TYPES.to_vec());
        assert_eq!(tenant.components[0].display_type, "Time API");
    }

    #[test]
    fn control_plane_has_services_but_no_floors() {
        let cp = control_plane();
        assert_eq!(cp.position, Position::new(0.0, 0.0));
        assert_eq!(cp.resources.len(), 5);
        assert!(cp.components.is_empty());
        assert!(cp.tier.is_none());
    }

    #[test]
    fn dr_sites_are_mid_rises_in_dr_zone() {
        let mut rng = seeded(6);
        let sites = generate_dr_sites(2, NamingStyle::Numbered, &mut rng);
        assert_eq!(sites.len(), 2);
        assert_eq!(sites[1].id, "dr-site-2");
        assert_eq!(sites[1].name, "DR Site 2");
        for s in &sites {
            assert_eq!(s.tier, Some(Tier::MidRise));
            assert!(zone_for(Env::Dr).contains(s.position));
        }
    }

    #[test]
    fn links_skip_missing_target_envs() {
        let mut rng = seeded(7);
        let mut tenants = generate_tiered(Env::Dev, TierCounts::new(0, 3), NamingStyle::Numbered, &mut rng);
        tenants.push(control_plane());
        let links = build_links(&tenants, &mut rng);
        assert_eq!(links.len(), 3);
        assert!(links.iter().all(|l| l.link_type == LinkType::Data));
    }

    #[test]
    fn seeded_generation_is_reproducible() {
        let mut config = CityConfig::default();
        config.seed = Some(99);
        assert_eq!(generate_city(&config), generate_city(&config));
    }

    #[test]
    fn memoized_city_is_shared() {
        let a = city() as *const CitySnapshot;
        let b = city() as *const CitySnapshot;
        assert_eq!(a, b);
        assert_eq!(city().tenants.len(), 104);
    }
}
