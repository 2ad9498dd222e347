use archer_evolution::persistence::{MemoryStore, Store};
use archer_evolution::sim::{GameEvent, Mode, Modifier, Perk, Weapon};
use archer_evolution::{CivilDate, DailyChallenge, Profile, Session, Tuning};

fn daily() -> DailyChallenge {
    DailyChallenge::for_date(CivilDate::new(2024, 1, 1))
}

#[test]
fn daily_challenge_is_stable() {
    let c = daily();
    assert_eq!(c.seed, 20_240_101);
    assert_eq!(c.modifier, Modifier::HeavyAir);
    assert_eq!(c.id, "OP-240101-HEAVY_AIR");
    assert_eq!(c, DailyChallenge::for_date(CivilDate::new(2024, 1, 1)));
}

#[test]
fn menu_game_over_menu() {
    let mut session = Session::new(MemoryStore::new(), daily(), 5, Tuning::default());
    assert_eq!(session.mode(), Mode::Menu);
    assert!(!session.show_menu());
    assert!(session.select_weapon(Weapon::Heavy));
    assert!(session.select_perk(Perk::WindImmune));
    assert!(session.start_run());
    assert!(!session.start_run());
    assert_eq!(session.state().run.modifiers.arrow_speed_mult, 0.75);

    // Long frames are clamped, so this takes many frames
    let mut ended = None;
    for _ in 0..200_000 {
        session.input.shoot = true;
        for event in session.frame(1.0) {
            if let GameEvent::RunEnded { score, kills } = event {
                assert!(ended.is_none());
                ended = Some((score, kills));
            }
        }
        if session.mode() == Mode::Over {
            break;
        }
    }
    let (score, kills) = ended.expect("run should end with nobody aiming");
    assert_eq!(session.meta().profile.runs, 1);
    assert_eq!(session.meta().profile.total_kills, kills as u64);
    assert_eq!(session.meta().profile.best_score, (score as f64).max(0.0));

    assert!(session.show_menu());
    assert_eq!(session.mode(), Mode::Menu);
}

#[test]
fn profile_survives_corruption() {
    let mut store = MemoryStore::new();
    store.write(Profile::STORAGE_KEY, "{\"best_score\": \"lots\"").unwrap();
    let session = Session::new(store, daily(), 1, Tuning::default());
    assert_eq!(session.meta().profile, Profile::default());
}

#[test]
fn profile_persists_between_sessions() {
    let mut store = MemoryStore::new();
    let mut profile = Profile::default();
    profile.record_run(640.0, 31);
    profile.save(&mut store);

    let session = Session::new(store, daily(), 1, Tuning::default());
    assert_eq!(session.meta().profile.best_score, 640.0);
    assert_eq!(session.hud().best_score, 640.0);
}
