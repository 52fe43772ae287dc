//! Walk a few synthetic loops through a claiming session and print the outcome.
//!
//! Usage:
//!   cargo run -p territory --example walk_claim -- square
//!   cargo run -p territory --example walk_claim -- eight
//!
//! - square: 60 m square with 1 m jitter, expect an accepted territory
//! - eight: 80 m figure-eight (lobes of about 3200 m² each), expect one lobe
//!   to be claimed

use chrono::Utc;
use territory::prelude::*;

fn main() {
    let mode = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "square".to_string());
    let shape = match mode.as_str() {
        "square" => WalkShape::Square { side_m: 60.0 },
        "eight" => WalkShape::FigureEight { radius_m: 80.0 },
        _ => {
            eprintln!("usage: walk_claim [square|eight]");
            return;
        }
    };
    let origin = GeoPoint::new(47.3769, 8.5417);
    for seed in 0..3 {
        let cfg = WalkCfg {
            shape,
            jitter_m: 1.0,
            ..WalkCfg::default()
        };
        let walk = draw_walk(cfg, origin, Utc::now(), ReplayToken { seed, index: 0 });
        let mut session = ClaimSession::new(Claimant::new("demo", "Demo"), ClaimCfg::default());
        session.start();
        for s in &walk {
            session.push_sample(*s);
        }
        if matches!(session.state(), ClaimState::Tracking) {
            if let Err(e) = session.force_claim() {
                println!("seed {seed}: walk never closed ({e})");
                continue;
            }
        }
        match session.state() {
            ClaimState::Accepted(t) => println!(
                "seed {seed}: claimed {:.0} m² with {} vertices ({} samples)",
                t.area(),
                t.polygon.vertex_count(),
                walk.len()
            ),
            other => println!("seed {seed}: {} ({other:?})", session.status_message()),
        }
    }
}
