//! InfraCity Headless Generation Harness
//!
//! Generates a city and checks every layout and graph invariant.
//! Runs entirely in-process, with no renderer or networking.
//!
//! Usage:
//!   cargo run -p infracity-simtest
//!   cargo run -p infracity-simtest -- --verbose --seed 42
//!   cargo run -p infracity-simtest -- --config city.json --dump city_snapshot.json

use clap::Parser;
use infracity_logic::catalog;
use infracity_logic::config::{validate_config, CityConfig};
use infracity_logic::generator::generate_city;
use infracity_logic::model::{CitySnapshot, Env, LinkType, Tier, CONTROL_PLANE_ID, LANDMARK_ID};
use infracity_logic::mutation::{add_resource, try_add_resource, AddResourceRequest};
use infracity_logic::scene::{self, CityFilter};
use infracity_logic::store::CityStore;
use infracity_logic::validation::{self, Severity, ValidationError};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "infracity-simtest", about = "Validate generated InfraCity layouts")]
struct Args {
    /// Print every check, not just failures.
    #[arg(short, long)]
    verbose: bool,

    /// Seed for reproducible generation (overrides the config file).
    #[arg(long)]
    seed: Option<u64>,

    /// JSON file with a CityConfig. Missing fields take defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the generated snapshot as JSON to this path ("-" for stdout).
    #[arg(long)]
    dump: Option<PathBuf>,

    /// Number of independent cities to generate and check.
    #[arg(long, default_value_t = 1)]
    runs: u32,
}

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

impl TestResult {
    fn new(name: &str, passed: bool, detail: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            passed,
            detail: detail.into(),
        }
    }
}

fn main() {
    env_logger::init();
    let args = Args::parse();
    println!("=== InfraCity Generation Harness ===\n");

    let mut config = match load_config(args.config.as_ref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("config error: {e}");
            std::process::exit(2);
        }
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    let config_errors = validate_config(&config);
    if !config_errors.is_empty() {
        for e in &config_errors {
            eprintln!("config error: {e}");
        }
        std::process::exit(2);
    }

    let mut results = Vec::new();
    let mut last_city = None;

    for run in 0..args.runs.max(1) {
        let mut run_config = config.clone();
        if let Some(seed) = config.seed {
            run_config.seed = Some(seed.wrapping_add(run as u64));
        }
        if args.runs > 1 {
            println!("--- Run {} (seed {:?}) ---", run + 1, run_config.seed);
        }
        let city = generate_city(&run_config);

        // 1. Population shape
        results.extend(validate_population(&city, &run_config));

        // 2. Zone placement
        results.extend(validate_placement(&city, &run_config));

        // 3. Components & catalog
        results.extend(validate_components(&city));

        // 4. Link graph
        results.extend(validate_links(&city));

        // 5. Resource addition
        results.extend(validate_resource_addition(&city));

        // 6. Renderer projections
        results.extend(validate_scene(&city));

        last_city = Some(city);
    }

    if let (Some(path), Some(city)) = (&args.dump, &last_city) {
        if let Err(e) = dump_snapshot(path, city) {
            eprintln!("failed to write snapshot: {e}");
            std::process::exit(2);
        }
    }

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || args.verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<CityConfig, String> {
    let Some(path) = path else {
        return Ok(CityConfig::default());
    };
    let text = std::fs::read_to_string(path).map_err(|e| format!("{}: {}", path.display(), e))?;
    serde_json::from_str(&text).map_err(|e| format!("{}: {}", path.display(), e))
}

fn dump_snapshot(path: &PathBuf, city: &CitySnapshot) -> Result<(), String> {
    let json = serde_json::to_string_pretty(city).map_err(|e| e.to_string())?;
    if path.as_os_str() == "-" {
        println!("{json}");
        Ok(())
    } else {
        std::fs::write(path, json).map_err(|e| format!("{}: {}", path.display(), e))?;
        log::info!("Snapshot written to {}", path.display());
        Ok(())
    }
}

fn from_checks(name: &str, errors: Vec<ValidationError>, ok_detail: &str) -> TestResult {
    let hard: Vec<_> = errors
        .iter()
        .filter(|e| e.severity == Severity::Error)
        .collect();
    if hard.is_empty() {
        let warnings: Vec<_> = errors.iter().map(|e| e.message.as_str()).collect();
        let detail = if warnings.is_empty() {
            ok_detail.to_string()
        } else {
            format!("{ok_detail} (warning: {})", warnings.join("; "))
        };
        TestResult::new(name, true, detail)
    } else {
        let first: Vec<_> = hard.iter().take(3).map(|e| e.message.as_str()).collect();
        TestResult::new(
            name,
            false,
            format!("{} error(s): {}", hard.len(), first.join("; ")),
        )
    }
}

// ── 1. Population ───────────────────────────────────────────────────────

fn validate_population(city: &CitySnapshot, config: &CityConfig) -> Vec<TestResult> {
    println!("--- Population ---");
    let mut results = Vec::new();

    let expected = config.expected_tenant_count();
    results.push(TestResult::new(
        "tenant_count",
        city.tenants.len() == expected,
        format!("{} tenants (expected {})", city.tenants.len(), expected),
    ));

    for env in [Env::Prod, Env::Dev, Env::Qa, Env::Dr] {
        let counts = config.population.for_env(env);
        let sky = city
            .tenants_in(env)
            .filter(|t| t.tier == Some(Tier::Skyscraper))
            .count() as u32;
        let mid = city
            .tenants_in(env)
            .filter(|t| t.tier == Some(Tier::MidRise))
            .count() as u32;
        results.push(TestResult::new(
            &format!("population_{}", env),
            sky == counts.skyscrapers && mid == counts.mid_rises,
            format!("{sky} skyscrapers, {mid} mid-rises"),
        ));
    }

    results.push(TestResult::new(
        "control_plane_present",
        city.tenant(CONTROL_PLANE_ID).is_some(),
        "central control plane at origin",
    ));
    results.push(TestResult::new(
        "landmark_present",
        city.tenant(LANDMARK_ID).is_some(),
        "explorable landmark in prod zone",
    ));

    results.push(from_checks(
        "unique_ids",
        validation::check_unique_ids(&city.tenants),
        "all tenant ids unique",
    ));
    results.push(from_checks(
        "tier_resource_counts",
        validation::check_tier_resource_counts(&city.tenants),
        "skyscrapers 8–12, mid-rises 3–6",
    ));

    results
}

// ── 2. Placement ────────────────────────────────────────────────────────

fn validate_placement(city: &CitySnapshot, config: &CityConfig) -> Vec<TestResult> {
    println!("--- Placement ---");
    vec![
        from_checks(
            "positions_in_zones",
            validation::check_positions_in_zones(&city.tenants),
            "every tenant inside its environment zone",
        ),
        from_checks(
            "landmark_spacing",
            validation::check_landmark_spacing(city, config),
            &format!(
                "landmark placed in {} attempt(s), spaced: {}",
                city.stats.landmark_attempts, city.stats.landmark_spaced
            ),
        ),
    ]
}

// ── 3. Components ───────────────────────────────────────────────────────

fn validate_components(city: &CitySnapshot) -> Vec<TestResult> {
    println!("--- Components ---");
    let floors: usize = city.tenants.iter().map(|t| t.components.len()).sum();
    let generic_covered = catalog::GENERIC_RESOURCE_TYPES
        .iter()
        .filter(|ty| {
            city.tenants
                .iter()
                .any(|t| t.resources.iter().any(|r| r == *ty))
        })
        .count();
    vec![
        from_checks(
            "index_alignment",
            validation::check_index_alignment(&city.tenants),
            &format!("{floors} floors aligned with resources"),
        ),
        from_checks(
            "catalog_membership",
            validation::check_catalog_membership(&city.tenants),
            "every component comes from the catalog",
        ),
        TestResult::new(
            "catalog_coverage",
            generic_covered == catalog::GENERIC_RESOURCE_TYPES.len(),
            format!(
                "{}/{} generic types in use",
                generic_covered,
                catalog::GENERIC_RESOURCE_TYPES.len()
            ),
        ),
    ]
}

// ── 4. Links ────────────────────────────────────────────────────────────

fn validate_links(city: &CitySnapshot) -> Vec<TestResult> {
    println!("--- Links ---");
    let count = |t: LinkType| city.links_of_type(t).count();
    vec![
        from_checks(
            "link_endpoints",
            validation::check_link_endpoints(city),
            &format!("{} links, all endpoints exist", city.links.len()),
        ),
        from_checks(
            "control_plane_edges",
            validation::check_control_plane_edges(city),
            &format!("{} data edges into the control plane", count(LinkType::Data)),
        ),
        from_checks(
            "link_routing",
            validation::check_link_routing(city),
            &format!(
                "{} sync, {} backup edges follow dev → qa → prod → dr",
                count(LinkType::Sync),
                count(LinkType::Backup)
            ),
        ),
    ]
}

// ── 5. Resource addition ────────────────────────────────────────────────

fn validate_resource_addition(city: &CitySnapshot) -> Vec<TestResult> {
    println!("--- Resource Addition ---");
    let mut results = Vec::new();

    let Some(target) = city.tenants.iter().find(|t| t.has_floors()) else {
        results.push(TestResult::new("add_target", false, "no tenant with floors"));
        return results;
    };

    let after = add_resource(
        city.tenants.clone(),
        &target.id,
        "analytics",
        "Harness analytics",
        "rg-harness",
    );
    let grown = after.iter().find(|t| t.id == target.id);
    let ok = grown.is_some_and(|t| {
        t.resources.len() == target.resources.len() + 1
            && t.components.len() == target.components.len() + 1
            && t.components.last().map(|c| c.resource_type.as_str()) == Some("analytics")
    });
    results.push(TestResult::new(
        "add_resource_appends",
        ok,
        format!("{} grew by one analytics floor", target.id),
    ));

    let unchanged = add_resource(city.tenants.clone(), &target.id, "cache", "", "rg-harness");
    results.push(TestResult::new(
        "add_resource_empty_description",
        unchanged == city.tenants,
        "empty description is a no-op",
    ));
    let unchanged = add_resource(city.tenants.clone(), &target.id, "cache", "desc", "");
    results.push(TestResult::new(
        "add_resource_empty_group",
        unchanged == city.tenants,
        "empty resource group is a no-op",
    ));

    let mut tenants = city.tenants.clone();
    let rejected = try_add_resource(
        &mut tenants,
        &AddResourceRequest::new(CONTROL_PLANE_ID, "cache", "desc", "rg"),
    );
    results.push(TestResult::new(
        "add_resource_control_plane",
        rejected.is_err() && tenants == city.tenants,
        match rejected {
            Err(e) => e.to_string(),
            Ok(_) => "control plane unexpectedly accepted a floor".to_string(),
        },
    ));

    let store = CityStore::from_snapshot(city.clone());
    let stored = store.add_resource(&AddResourceRequest::new(
        &target.id,
        "cache",
        "Store cache",
        "rg-harness",
    ));
    let aligned = store
        .tenant(&target.id)
        .is_some_and(|t| t.resources.len() == t.components.len());
    results.push(TestResult::new(
        "store_add_resource",
        stored.is_ok() && aligned,
        "shared store appends under the tenant lock",
    ));

    results
}

// ── 6. Scene ────────────────────────────────────────────────────────────

fn validate_scene(city: &CitySnapshot) -> Vec<TestResult> {
    println!("--- Scene ---");
    let flows = scene::resolve_flows(&city.tenants, &city.links);
    let legend = scene::env_legend(city);
    let legend_total: usize = legend.iter().map(|(_, n)| n).sum();
    let explorable = city.tenants.iter().filter(|t| scene::is_explorable(t)).count();
    let prod_only = CityFilter::default().with_envs([Env::Prod]).apply(city);
    let tallest = city
        .tenants
        .iter()
        .map(scene::building_height)
        .fold(0.0_f32, f32::max);

    vec![
        TestResult::new(
            "flows_resolve",
            flows.len() == city.links.len(),
            format!("{} flow segments", flows.len()),
        ),
        TestResult::new(
            "legend_total",
            legend_total == city.tenants.len(),
            legend
                .iter()
                .map(|(env, n)| format!("{} {}", scene::env_label(*env), n))
                .collect::<Vec<_>>()
                .join(", "),
        ),
        TestResult::new(
            "single_explorable",
            explorable == 1,
            format!("{explorable} explorable building(s)"),
        ),
        TestResult::new(
            "prod_filter",
            prod_only.tenants.iter().all(|t| t.env == Env::Prod),
            format!(
                "{} prod buildings, {} internal links",
                prod_only.tenants.len(),
                prod_only.links.len()
            ),
        ),
        TestResult::new(
            "building_heights",
            tallest > 0.0,
            format!("tallest building {tallest:.1} units"),
        ),
    ]
}
