//! smallmap — smallest example for the hyperlane routing framework.
//!
//! Builds a synthetic six-system map, seeds the link store from a canned
//! in-process feed, asserts one local wormhole, and answers a handful of
//! route queries under different jump policies.  Swap `build_starmap` for
//! `hl_map::load_starmap_csv` over the real dump files to run at full scale.

mod starmap;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use chrono::Utc;

use hl_feed::{FeedClient, FeedError, FeedRefresher, FeedSignature};
use hl_links::{LinkMetadata, LinkStore};
use hl_route::{DEFAULT_MAX_JUMPS, JumpPolicy, Route, RouteEngine, RouteStep};

use starmap::build_starmap;

const SNAPSHOT_FILE: &str = "smallmap-links.json";
const REFRESH_PERIOD: Duration = Duration::from_millis(200);

// ── Canned feed ───────────────────────────────────────────────────────────────

/// Serves one scouted wormhole between the gate network and the fringe pair.
struct DemoFeed;

impl FeedClient for DemoFeed {
    async fn fetch(&self) -> Result<Vec<FeedSignature>, FeedError> {
        let now = Utc::now();
        Ok(vec![FeedSignature {
            in_system_name: Some("Covryn".into()),
            out_system_name: Some("Ennar".into()),
            in_signature: Some("VQD-512".into()),
            out_signature: Some("KXP-904".into()),
            wh_type: Some("K162".into()),
            max_ship_size: Some("large".into()),
            created_by_name: Some("demo-scout".into()),
            created_at: now,
            expires_at: now + chrono::Duration::hours(16),
        }])
    }
}

// ── Output ────────────────────────────────────────────────────────────────────

fn print_route(label: &str, result: Result<Route, hl_route::RouteError>) {
    match result {
        Ok(route) => {
            let legs: Vec<String> = route
                .steps
                .iter()
                .map(|step| match step {
                    RouteStep::Start { system } => system.clone(),
                    RouteStep::Gate { system } => format!("={system}"),
                    RouteStep::Wormhole { system, link } => format!(
                        "~{system} [{}]",
                        link.link_type.as_deref().unwrap_or("?")
                    ),
                    RouteStep::Jump { system } => format!(">{system}"),
                })
                .collect();
            println!(
                "{label}: {} ({} hops, {} jumps)",
                legs.join(" "),
                route.total_hops(),
                route.jumps_used()
            );
        }
        Err(e) => println!("{label}: {e}"),
    }
}

// ── Main ──────────────────────────────────────────────────────────────────────

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().compact().init();

    let map = Arc::new(build_starmap());
    let store = Arc::new(LinkStore::open(Arc::clone(&map), SNAPSHOT_FILE.into()));
    let engine = RouteEngine::new(Arc::clone(&map), Arc::clone(&store));

    // Reconcile once before serving queries, then keep refreshing.
    let refresher = FeedRefresher::with_period(Arc::clone(&store), DemoFeed, REFRESH_PERIOD);
    refresher.run_once().await?;
    let (task, shutdown) = refresher.spawn();

    store.assert_local(
        "Aulbres",
        "Ferrat",
        LinkMetadata {
            sig_a: Some("RQT-731".into()),
            sig_b: Some("OWZ-118".into()),
            link_type: Some("C3".into()),
            private: true,
            ..LinkMetadata::default()
        },
    )?;

    println!("systems: {}, dynamic links: {}\n", map.system_count(), store.len());

    print_route(
        "gates only     Aulbres→Defori",
        engine.find_route("Aulbres", "Defori", JumpPolicy::Disabled, 0),
    );
    print_route(
        "titan bridge   Aulbres→Defori",
        engine.find_route("Aulbres", "Defori", JumpPolicy::Titan, 1),
    );
    print_route(
        "via feed link  Aulbres→Ennar",
        engine.find_route("Aulbres", "Ennar", JumpPolicy::Disabled, 0),
    );
    print_route(
        "via local link Brelin→Ennar",
        engine.find_route("Brelin", "Ennar", JumpPolicy::Disabled, 0),
    );
    print_route(
        "combined       Ennar→Aulbres",
        engine.find_route("Ennar", "Aulbres", JumpPolicy::TitanOrBlops, DEFAULT_MAX_JUMPS),
    );

    // Let the background refresher run a few cycles, then stop it cleanly.
    tokio::time::sleep(REFRESH_PERIOD * 3).await;
    let _ = shutdown.send(true);
    task.await?;

    Ok(())
}
