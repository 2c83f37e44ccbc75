//! Resource catalog: resource type → component template.
//!
//! Adding a resource type means adding one entry to [`CATALOG`]; nothing else
//! needs to change. The generic types are eligible for random selection during
//! generation, the special types only ever appear on the landmark tenant.

/// Static description of a resource type. Instances copy these fields verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComponentTemplate {
    pub resource_type: &'static str,
    pub description: &'static str,
    /// Illustrative configuration snippet. Never executed.
    pub code: &'static str,
    pub label: &'static str,
}

/// Types eligible for random selection during generation.
pub const GENERIC_RESOURCE_TYPES: [&str; 8] = [
    "load-balancer",
    "web-server",
    "app-server",
    "primary-db",
    "replica-db",
    "cache",
    "message-queue",
    "analytics",
];

/// Resource list of the landmark tenant, in floor order.
pub const LANDMARK_RESOURCE_TYPES: [&str; 6] = [
    "time-api",
    "temporal-db",
    "sync-engine",
    "cache-layer",
    "scheduler",
    "analytics",
];

/// Platform services listed on the control plane. These have no floors.
pub const CONTROL_PLANE_SERVICES: [&str; 5] = [
    "api-gateway",
    "auth-service",
    "monitoring",
    "logging",
    "config-manager",
];

/// Types a user may add interactively.
pub const ADDABLE_RESOURCE_TYPES: [&str; 8] = GENERIC_RESOURCE_TYPES;

pub fn is_generic(resource_type: &str) -> bool {
    GENERIC_RESOURCE_TYPES.contains(&resource_type)
}

/// Landmark-only types (the landmark also carries the generic `analytics`).
pub fn is_special(resource_type: &str) -> bool {
    LANDMARK_RESOURCE_TYPES.contains(&resource_type) && !is_generic(resource_type)
}

pub fn is_addable(resource_type: &str) -> bool {
    ADDABLE_RESOURCE_TYPES.contains(&resource_type)
}

/// Look up the template for a resource type.
pub fn template(resource_type: &str) -> Option<&'static ComponentTemplate> {
    CATALOG.iter().find(|t| t.resource_type == resource_type)
}

/// Friendly label for a type, falling back to [`format_type`] for unknown types.
pub fn display_type(resource_type: &str) -> String {
    match template(resource_type) {
        Some(t) => t.label.to_string(),
        None => format_type(resource_type),
    }
}

/// `"message-queue"` → `"Message Queue"`.
pub fn format_type(resource_type: &str) -> String {
    resource_type
        .split('-')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub static CATALOG: &[ComponentTemplate] = &[
    // ── Generic ─────────────────────────────────────────────────────────
    ComponentTemplate {
        resource_type: "load-balancer",
        description: "Traffic distribution and load balancing",
        label: "Load Balancer",
        code: r#"resource "lb" "public" {
  listener {
    port     = 443
    protocol = "HTTPS"
  }

  target_group "web" {
    port              = 8080
    health_check_path = "/health"
    algorithm         = "least_connections"
  }

  targets = ["10.0.1.10", "10.0.1.11", "10.0.1.12"]
}"#,
    },
    ComponentTemplate {
        resource_type: "web-server",
        description: "HTTP request handling and static content serving",
        label: "Web Server",
        code: r#"server:
  listen: 0.0.0.0:8080
  static_root: /srv/public
  gzip: true
  headers:
    strict_transport_security: max-age=31536000
    x_frame_options: DENY
routes:
  - path: /api/*
    upstream: app-server:9000
  - path: /*
    serve: index.html"#,
    },
    ComponentTemplate {
        resource_type: "app-server",
        description: "Application logic and business processing",
        label: "Application Server",
        code: r#"service "app" {
  replicas = 4
  image    = "registry.internal/app:stable"

  env = {
    DATABASE_URL = "postgres://primary-db:5432/app"
    CACHE_URL    = "redis://cache:6379"
  }

  rate_limit {
    window   = "15m"
    requests = 100
  }
}"#,
    },
    ComponentTemplate {
        resource_type: "primary-db",
        description: "Primary database for read/write operations",
        label: "Primary Database",
        code: r#"CREATE TABLE accounts (
    id          BIGSERIAL PRIMARY KEY,
    email       TEXT UNIQUE NOT NULL,
    created_at  TIMESTAMPTZ DEFAULT now()
);

CREATE TABLE orders (
    id          BIGSERIAL PRIMARY KEY,
    account_id  BIGINT REFERENCES accounts(id),
    total       NUMERIC(12,2) NOT NULL,
    status      TEXT DEFAULT 'pending'
);

CREATE INDEX idx_orders_account ON orders(account_id);
-- replication: 1 primary, 2 streaming replicas"#,
    },
    ComponentTemplate {
        resource_type: "replica-db",
        description: "Database replica for read operations",
        label: "Read Replica Database",
        code: r#"# postgresql.conf (standby)
hot_standby = on
max_connections = 200
shared_buffers = 256MB
effective_cache_size = 1GB

primary_conninfo = 'host=primary-db port=5432 user=replicator'
restore_command = 'cp /var/lib/pg/archive/%f %p'
# read-only: writes are rejected, failover promotes this node"#,
    },
    ComponentTemplate {
        resource_type: "cache",
        description: "In-memory caching layer for performance",
        label: "Cache Layer",
        code: r#"cache "sessions" {
  engine         = "redis"
  node_type      = "cache.m6g.large"
  nodes          = 3
  default_ttl    = 3600
  eviction       = "allkeys-lru"
  tls            = true
}"#,
    },
    ComponentTemplate {
        resource_type: "message-queue",
        description: "Asynchronous message processing system",
        label: "Message Queue",
        code: r#"queues:
  - name: email
    durable: true
    dead_letter: email.dlq
  - name: orders
    durable: true
    max_retries: 5
  - name: notifications
    durable: true
consumers:
  orders: { prefetch: 20, ack: manual }"#,
    },
    ComponentTemplate {
        resource_type: "analytics",
        description: "Data analytics and reporting engine",
        label: "Analytics Engine",
        code: r#"pipeline "user_events" {
  source  = "topic://user-events"
  window  = "60s"

  aggregate {
    group_by = ["user_id"]
    metrics  = ["count", "distinct(session_id)"]
  }

  sink = "warehouse://analytics.user_metrics"
}"#,
    },
    // ── Landmark ────────────────────────────────────────────────────────
    ComponentTemplate {
        resource_type: "time-api",
        description: "Public API serving time-travel queries",
        label: "Time API",
        code: r#"api "time" {
  base_path = "/v1/time"

  route "GET /snapshots/{at}" { handler = "snapshot_at" }
  route "GET /diff"            { handler = "diff_range" }

  auth    = "oauth2"
  timeout = "5s"
}"#,
    },
    ComponentTemplate {
        resource_type: "temporal-db",
        description: "Bitemporal store keeping every historical version",
        label: "Temporal Database",
        code: r#"CREATE TABLE entity_versions (
    entity_id   UUID NOT NULL,
    valid_from  TIMESTAMPTZ NOT NULL,
    valid_to    TIMESTAMPTZ,
    recorded_at TIMESTAMPTZ DEFAULT now(),
    payload     JSONB NOT NULL,
    PRIMARY KEY (entity_id, valid_from)
);"#,
    },
    ComponentTemplate {
        resource_type: "sync-engine",
        description: "Change-data-capture replication across environments",
        label: "Sync Engine",
        code: r#"sync:
  source: temporal-db
  mode: cdc
  batch_size: 500
  targets:
    - qa
    - dr
  conflict_policy: last_writer_wins"#,
    },
    ComponentTemplate {
        resource_type: "cache-layer",
        description: "Read-through cache for hot snapshots",
        label: "Cache Layer",
        code: r#"cache "snapshots" {
  engine      = "redis"
  mode        = "read-through"
  default_ttl = 300
  max_memory  = "2gb"
}"#,
    },
    ComponentTemplate {
        resource_type: "scheduler",
        description: "Cron-style scheduler for snapshot and compaction jobs",
        label: "Scheduler",
        code: r#"jobs:
  - name: hourly-snapshot
    cron: "0 * * * *"
    run: snapshot --all
  - name: nightly-compaction
    cron: "30 2 * * *"
    run: compact --older-than 30d"#,
    },
];
