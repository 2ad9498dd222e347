//! Archer Evolution entry point
//!
//! The browser build is driven from JS through `platform::web`. Natively
//! there is no window; the binary plays one headless run on autopilot and
//! logs the result, which is handy for balance checks.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use archer_evolution::persistence::FileStore;
    use archer_evolution::sim::{GameEvent, Mode, TargetKind};
    use archer_evolution::{DailyChallenge, Session, Tuning, platform};

    const FRAME_DT: f32 = 1.0 / 60.0;
    const MAX_SECONDS: f32 = 180.0;

    env_logger::init();
    log::info!("Archer Evolution (native) starting...");

    let data_dir = std::env::var("ARCHER_EVO_DATA").unwrap_or_else(|_| ".".to_string());
    let tuning = match std::env::var("ARCHER_EVO_TUNING") {
        Ok(path) => match std::fs::read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|json| Tuning::from_json(&json).map_err(|e| e.to_string()))
        {
            Ok(tuning) => {
                log::info!("Tuning loaded from {}", path);
                tuning
            }
            Err(e) => {
                log::warn!("Tuning {} unusable ({}), using defaults", path, e);
                Tuning::default()
            }
        },
        Err(_) => Tuning::default(),
    };

    let seed = platform::entropy_seed();
    let mut session = Session::new(
        FileStore::new(data_dir),
        DailyChallenge::today(),
        seed,
        tuning,
    );
    log::info!("Seed: {}", seed);
    session.start_run();

    let mut elapsed = 0.0;
    let mut shots = 0usize;
    while session.mode() == Mode::Game && elapsed < MAX_SECONDS {
        // Autopilot: track the nearest bird that is safe to shoot
        let state = session.state();
        let center = state.player.pos.x + state.player.size.x / 2.0;
        let aim = state
            .targets
            .iter()
            .filter(|t| t.kind != TargetKind::Forbidden)
            .map(|t| t.pos.x + t.size.x / 2.0)
            .min_by(|a, b| (a - center).abs().total_cmp(&(b - center).abs()));
        session.input.left = aim.is_some_and(|x| x < center - 5.0);
        session.input.right = aim.is_some_and(|x| x > center + 5.0);
        session.input.shoot = true;

        for event in session.frame(FRAME_DT) {
            match event {
                GameEvent::Fired { arrows } => shots += arrows,
                GameEvent::PenaltyHit { points } => {
                    log::info!("Forbidden bird hit ({:.0})", points)
                }
                GameEvent::RunEnded { score, kills } => {
                    log::info!("Run over: score {:.0}, kills {}", score, kills)
                }
                _ => {}
            }
        }
        elapsed += FRAME_DT;
    }

    let hud = session.hud();
    let profile = &session.meta().profile;
    println!(
        "{}: score {} lives {} after {:.1}s ({} arrows) | best {:.0} over {} runs",
        hud.daily_id, hud.score, hud.lives, elapsed, shots, profile.best_score, profile.runs
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::start, this is just to satisfy the compiler
}
