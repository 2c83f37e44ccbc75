//! Name generation utilities: tenant names and synthetic cloud identifiers.

use crate::model::{Env, Tier};
use rand::seq::SliceRandom;
use rand::Rng;

/// Generic suffixes for descriptive tenant names.
pub static SUFFIXES: &[&str] = &[
    "Services",
    "Cluster",
    "Environment",
    "System",
    "Platform",
    "API",
    "Gateway",
];

pub static REGIONS: &[&str] = &[
    "eastus",
    "westus",
    "northeurope",
    "westeurope",
    "ap-southeast-1",
    "us-central1",
    "eu-west-1",
];

pub static APP_NAMES: &[&str] = &[
    "orders",
    "payments",
    "users",
    "inventory",
    "portal",
    "analytics",
    "api",
    "web",
    "core",
    "sync",
];

/// Per-environment prefixes for descriptive tenant names.
pub fn env_prefixes(env: Env) -> &'static [&'static str] {
    match env {
        Env::Prod => &["Production", "Live", "Main", "Core", "Primary"],
        Env::Dev => &["Development", "Dev", "Sandbox", "Test", "Experimental"],
        Env::Qa => &["QA", "Staging", "Testing", "Validation", "Pre-prod"],
        Env::Dr => &["Disaster Recovery", "Backup", "Failover", "Recovery", "DR"],
        Env::Central => &["Central", "Control", "Platform"],
    }
}

fn pick<'a>(pool: &[&'a str], rng: &mut impl Rng) -> &'a str {
    pool.choose(rng).copied().unwrap_or_default()
}

/// Two-digit suffix, 10–99 inclusive.
fn two_digits(rng: &mut impl Rng) -> u32 {
    rng.gen_range(10..=99)
}

/// Stable id for a tiered tenant, `n` is 1-indexed.
pub fn tenant_id(env: Env, tier: Tier, n: usize) -> String {
    match tier {
        Tier::Skyscraper => format!("{}-skyscraper-{}", env.tag(), n),
        Tier::MidRise => format!("{}-midrise-{}", env.tag(), n),
    }
}

/// `"PROD Skyscraper 3"` / `"DEV Building 12"`.
pub fn numbered_name(env: Env, tier: Tier, n: usize) -> String {
    let kind = match tier {
        Tier::Skyscraper => "Skyscraper",
        Tier::MidRise => "Building",
    };
    format!("{} {} {}", env.tag().to_uppercase(), kind, n)
}

/// `"<prefix> <suffix> <n>"`, e.g. `"Staging Cluster 4"`.
pub fn descriptive_name(env: Env, n: usize, rng: &mut impl Rng) -> String {
    let prefix = pick(env_prefixes(env), rng);
    let suffix = pick(SUFFIXES, rng);
    format!("{prefix} {suffix} {n}")
}

/// `rg-<env>-<region>-<app><NN>`.
pub fn resource_group(env: Env, rng: &mut impl Rng) -> String {
    let region = pick(REGIONS, rng);
    let app = pick(APP_NAMES, rng);
    format!("rg-{}-{}-{}{}", env.tag(), region, app, two_digits(rng))
}

/// `<env>-<app>-<shorttype>-<region>-<NN>`.
pub fn resource_name(env: Env, resource_type: &str, rng: &mut impl Rng) -> String {
    let region = pick(REGIONS, rng);
    let app = pick(APP_NAMES, rng);
    format!(
        "{}-{}-{}-{}-{}",
        env.tag(),
        app,
        short_type(resource_type),
        region,
        two_digits(rng)
    )
}

/// Type with non-alphanumerics stripped, lowercased: `"primary-db"` → `"primarydb"`.
pub fn short_type(resource_type: &str) -> String {
    resource_type
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Lowercase, hyphen-separated slug: `"DEV Building 4"` → `"dev-building-4"`.
pub fn slug(text: &str) -> String {
    text.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(|part| part.to_ascii_lowercase())
        .collect::<Vec<_>>()
        .join("-")
}
