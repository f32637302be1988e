//! Headless integration tests for Tideline.
//!
//! These tests exercise the game's ECS logic without a window or GPU.
//! They use Bevy's `MinimalPlugins` to tick the app, register only the
//! pure-logic systems (skipping all rendering/UI), and verify the cast →
//! bite → reel loop and the day/debt economy end to end.
//!
//! Run with: `cargo test --test headless`

use std::thread;
use std::time::Duration;

use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use tideline::data::DataPlugin;
use tideline::economy::{
    apply_catch_to_ledger, evaluate_day_end, handle_buy_upgrade, handle_continue_game,
    handle_start_next_day, record_catch_stats, victory_bonus, EconomyPlugin,
};
use tideline::fishing::{
    cancel_session_on_exit, handle_cast_command, handle_catch_panel_closed,
    handle_retract_command, update_bite_window, FishingPhase, FishingPlugin, FishingSession,
};
use tideline::shared::*;

// ─────────────────────────────────────────────────────────────────────────────
// Test App Builder
// ─────────────────────────────────────────────────────────────────────────────

/// Builds a minimal Bevy app with all shared resources and events registered
/// but NO rendering, windowing, or asset loading. Systems must be added
/// per-test depending on what's being exercised.
fn build_test_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.add_plugins(StatesPlugin);

    // ── Game State ───────────────────────────────────────────────────────
    app.init_state::<GameState>();

    // ── Shared Resources (mirrors main.rs) ───────────────────────────────
    app.init_resource::<SpeciesCatalog>()
        .init_resource::<GameClock>()
        .init_resource::<PlayerEconomy>()
        .init_resource::<GearUpgrades>()
        .init_resource::<LifetimeStats>()
        .init_resource::<DailyStats>()
        .init_resource::<TrophyFlags>()
        .init_resource::<HighScore>()
        .init_resource::<FishingSession>();

    // ── Shared Events (mirrors main.rs) ──────────────────────────────────
    app.add_event::<CastCommandEvent>()
        .add_event::<ReelCommandEvent>()
        .add_event::<RetractCommandEvent>()
        .add_event::<BiteAlertEvent>()
        .add_event::<CatchLandedEvent>()
        .add_event::<CatchPanelClosedEvent>()
        .add_event::<DayEndEvent>()
        .add_event::<StartNextDayEvent>()
        .add_event::<ContinueGameEvent>()
        .add_event::<GameOutcomeEvent>()
        .add_event::<BuyUpgradeEvent>()
        .add_event::<SaveRequestEvent>()
        .add_event::<SaveCompleteEvent>();

    app
}

/// Transitions the test app to the given state and ticks once to process it.
fn enter_state(app: &mut App, state: GameState) {
    app.world_mut()
        .resource_mut::<NextState<GameState>>()
        .set(state);
    app.update();
}

/// Seeds the species catalog with a couple of deterministic fish so the
/// fishing tests don't need the full data plugin.
fn seed_catalog(app: &mut App) {
    let mut catalog = app.world_mut().resource_mut::<SpeciesCatalog>();
    catalog.species = vec![
        FishSpecies {
            id: SpeciesId(0),
            name: "Test Bass".to_string(),
            base_weight: 10.0,
            base_length: 5.0,
        },
        FishSpecies {
            id: SpeciesId(1),
            name: "Test Tuna".to_string(),
            base_weight: 50.0,
            base_length: 30.0,
        },
    ];
    let count = catalog.len();
    app.world_mut()
        .resource_mut::<LifetimeStats>()
        .per_species = SpeciesStatsTable::sized_to(count);
}

/// Puts the session into a biting state by hand, as if the bite timer had
/// just fired.
fn force_bite(app: &mut App, phase: FishingPhase, species: SpeciesId, reaction: f32) {
    let mut session = app.world_mut().resource_mut::<FishingSession>();
    session.phase = phase;
    session.hooked_species = Some(species);
    session.bite_timer = None;
    session.reaction_elapsed = reaction;
}

// ─────────────────────────────────────────────────────────────────────────────
// Boot smoke
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_headless_boot_smoke_transitions_and_ticks() {
    let mut app = build_test_app();
    app.add_plugins(DataPlugin);

    // First update enters Loading and populates the catalog; second applies NextState.
    app.update();
    app.update();

    let state = app.world().resource::<State<GameState>>();
    assert_eq!(
        state.get(),
        &GameState::MainMenu,
        "Expected to reach MainMenu after loading data"
    );

    let catalog_len = app.world().resource::<SpeciesCatalog>().len();
    assert_eq!(catalog_len, NUM_TROPHIES, "One species per trophy slot");

    let lifetime = app.world().resource::<LifetimeStats>();
    assert_eq!(
        lifetime.per_species.species_count(),
        catalog_len,
        "Stat tables should be sized to the catalog"
    );

    enter_state(&mut app, GameState::Playing);

    // Smoke: run a small frame budget in Playing without panic.
    for _ in 0..60 {
        app.update();
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Fishing session state machine
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_cast_arms_the_bite_loop() {
    let mut app = build_test_app();
    seed_catalog(&mut app);
    app.add_systems(
        Update,
        handle_cast_command.run_if(in_state(GameState::Playing)),
    );

    enter_state(&mut app, GameState::Playing);
    app.world_mut().send_event(CastCommandEvent);
    app.update();

    let session = app.world().resource::<FishingSession>();
    assert_eq!(session.phase, FishingPhase::WaitingForBite);
    assert!(session.hooked_species.is_some(), "A species is pre-picked");
    assert!(session.bite_timer.is_some(), "Bite delay is scheduled");
}

#[test]
fn test_cast_denied_without_permission() {
    let mut app = build_test_app();
    seed_catalog(&mut app);
    app.add_systems(
        Update,
        handle_cast_command.run_if(in_state(GameState::Playing)),
    );

    enter_state(&mut app, GameState::Playing);
    app.world_mut().resource_mut::<FishingSession>().can_cast = false;
    app.world_mut().send_event(CastCommandEvent);
    app.update();

    let session = app.world().resource::<FishingSession>();
    assert_eq!(
        session.phase,
        FishingPhase::Idle,
        "Cast without permission is a no-op"
    );
    assert!(session.hooked_species.is_none());
}

#[test]
fn test_retract_only_while_waiting() {
    let mut app = build_test_app();
    seed_catalog(&mut app);
    app.add_systems(
        Update,
        handle_retract_command.run_if(in_state(GameState::Playing)),
    );
    enter_state(&mut app, GameState::Playing);

    // Retract while waiting: back to an idle, castable rod.
    {
        let mut session = app.world_mut().resource_mut::<FishingSession>();
        session.phase = FishingPhase::WaitingForBite;
        session.hooked_species = Some(SpeciesId(0));
        session.can_cast = false;
    }
    app.world_mut().send_event(RetractCommandEvent);
    app.update();
    {
        let session = app.world().resource::<FishingSession>();
        assert_eq!(session.phase, FishingPhase::Idle);
        assert!(session.can_cast, "Retract restores casting immediately");
        assert!(session.hooked_species.is_none());
    }

    // Retract during a bite: ignored, the fish stays on.
    force_bite(&mut app, FishingPhase::BitePerfect, SpeciesId(0), 0.0);
    app.world_mut().send_event(RetractCommandEvent);
    app.update();
    let session = app.world().resource::<FishingSession>();
    assert_eq!(
        session.phase,
        FishingPhase::BitePerfect,
        "Retract is only valid before the bite"
    );
}

#[test]
fn test_reel_without_bite_is_ignored() {
    let mut app = build_test_app();
    seed_catalog(&mut app);
    app.add_systems(
        Update,
        (update_bite_window, apply_catch_to_ledger)
            .chain()
            .run_if(in_state(GameState::Playing)),
    );
    enter_state(&mut app, GameState::Playing);

    app.world_mut().send_event(ReelCommandEvent);
    app.update();

    let session = app.world().resource::<FishingSession>();
    let economy = app.world().resource::<PlayerEconomy>();
    assert_eq!(session.phase, FishingPhase::Idle);
    assert_eq!(economy.money, 0, "No catch from a reel with no bite");
    assert_eq!(economy.current_debt, STARTING_DEBT);
}

#[test]
fn test_escape_beats_a_same_tick_reel() {
    let mut app = build_test_app();
    seed_catalog(&mut app);
    app.add_systems(
        Update,
        (update_bite_window, apply_catch_to_ledger)
            .chain()
            .run_if(in_state(GameState::Playing)),
    );
    enter_state(&mut app, GameState::Playing);

    // The window has already expired when the reel arrives.
    force_bite(&mut app, FishingPhase::BiteLate, SpeciesId(0), 2.0);
    app.world_mut().send_event(ReelCommandEvent);
    app.update();

    let session = app.world().resource::<FishingSession>();
    let economy = app.world().resource::<PlayerEconomy>();
    assert_eq!(economy.money, 0, "The fish escaped; the reel pays nothing");
    assert_eq!(
        session.phase,
        FishingPhase::WaitingForBite,
        "Escape re-arms the waiting loop with a fresh bite"
    );
    assert!(session.bite_timer.is_some());
}

#[test]
fn test_reel_lands_catch_and_blocks_casting() {
    let mut app = build_test_app();
    seed_catalog(&mut app);
    app.add_systems(
        Update,
        (
            update_bite_window,
            apply_catch_to_ledger,
            record_catch_stats,
            handle_catch_panel_closed,
        )
            .chain()
            .run_if(in_state(GameState::Playing)),
    );
    enter_state(&mut app, GameState::Playing);

    force_bite(&mut app, FishingPhase::BitePerfect, SpeciesId(0), 0.0);
    app.world_mut().send_event(ReelCommandEvent);
    app.update();

    {
        let session = app.world().resource::<FishingSession>();
        let economy = app.world().resource::<PlayerEconomy>();
        let lifetime = app.world().resource::<LifetimeStats>();
        let daily = app.world().resource::<DailyStats>();

        assert_eq!(session.phase, FishingPhase::Idle);
        assert!(
            !session.can_cast,
            "Casting stays blocked until the catch panel closes"
        );
        assert!(economy.money > 0, "The catch paid out");
        assert_eq!(economy.total_money_earned, economy.money);
        assert_eq!(economy.current_debt, STARTING_DEBT - economy.money);
        assert_eq!(lifetime.num_all_caught, 1);
        assert_eq!(lifetime.per_species.num_caught[0], 1);
        assert_eq!(daily.fish_caught_today, 1);
    }

    // Dismissing the panel frees the rod.
    app.world_mut().send_event(CatchPanelClosedEvent);
    app.update();
    assert!(app.world().resource::<FishingSession>().can_cast);
}

#[test]
fn test_unknown_species_aborts_the_catch() {
    let mut app = build_test_app();
    seed_catalog(&mut app);
    app.add_systems(
        Update,
        (
            update_bite_window,
            apply_catch_to_ledger,
            record_catch_stats,
        )
            .chain()
            .run_if(in_state(GameState::Playing)),
    );
    enter_state(&mut app, GameState::Playing);

    force_bite(&mut app, FishingPhase::BitePerfect, SpeciesId(99), 0.0);
    app.world_mut().send_event(ReelCommandEvent);
    app.update();

    let session = app.world().resource::<FishingSession>();
    let economy = app.world().resource::<PlayerEconomy>();
    let lifetime = app.world().resource::<LifetimeStats>();

    assert_eq!(session.phase, FishingPhase::Idle);
    assert!(session.can_cast, "Aborted catch restores casting");
    assert_eq!(economy.money, 0, "Nothing is awarded for a broken catch");
    assert_eq!(lifetime.num_all_caught, 0, "Stats are untouched");
}

#[test]
fn test_multi_hook_catch_counts_every_slot() {
    let mut app = build_test_app();
    seed_catalog(&mut app);
    app.add_systems(
        Update,
        (
            update_bite_window,
            apply_catch_to_ledger,
            record_catch_stats,
        )
            .chain()
            .run_if(in_state(GameState::Playing)),
    );
    enter_state(&mut app, GameState::Playing);

    app.world_mut().resource_mut::<GearUpgrades>().hook_level = 3;
    force_bite(&mut app, FishingPhase::BitePerfect, SpeciesId(1), 0.0);
    app.world_mut().send_event(ReelCommandEvent);
    app.update();

    let economy = app.world().resource::<PlayerEconomy>();
    let lifetime = app.world().resource::<LifetimeStats>();
    let daily = app.world().resource::<DailyStats>();

    assert_eq!(lifetime.num_all_caught, 3, "One stat entry per hook slot");
    assert_eq!(lifetime.per_species.num_caught[1], 3);
    assert_eq!(daily.fish_caught_today, 3);
    assert_eq!(economy.points, 2, "(3 + 1) / 2 points at prestige 0");
}

#[test]
fn test_forced_cancel_produces_no_catch() {
    let mut app = build_test_app();
    seed_catalog(&mut app);
    app.add_systems(
        Update,
        (update_bite_window, apply_catch_to_ledger)
            .chain()
            .run_if(in_state(GameState::Playing)),
    );
    app.add_systems(OnExit(GameState::Playing), cancel_session_on_exit);
    enter_state(&mut app, GameState::Playing);

    // A fish is on the line and a reel is pending when the day ends.
    force_bite(&mut app, FishingPhase::BitePerfect, SpeciesId(0), 0.0);
    app.world_mut().send_event(ReelCommandEvent);
    enter_state(&mut app, GameState::DaySummary);
    app.update();

    let session = app.world().resource::<FishingSession>();
    let economy = app.world().resource::<PlayerEconomy>();
    assert_eq!(session.phase, FishingPhase::Idle, "Cancel is total");
    assert!(session.hooked_species.is_none());
    assert_eq!(
        economy.money, 0,
        "No catch resolves once the session is cancelled"
    );
}

// ─────────────────────────────────────────────────────────────────────────────
// Day-end routing
// ─────────────────────────────────────────────────────────────────────────────

/// Full-plugin wiring: a debt-clearing reel on the tick that crosses 20:00
/// must reach the ledger before the verdict is routed. Exercises the real
/// `FishingPlugin` + `EconomyPlugin` Update ordering, not a hand-built
/// chain.
#[test]
fn test_last_tick_catch_settles_before_the_verdict() {
    let mut app = build_test_app();
    seed_catalog(&mut app);
    // Raw input resources the fishing input translator reads; no plugin
    // feeds them here, so no keys are ever pressed.
    app.init_resource::<ButtonInput<KeyCode>>();
    app.init_resource::<ButtonInput<MouseButton>>();
    app.add_plugins((FishingPlugin, EconomyPlugin));
    enter_state(&mut app, GameState::Playing);

    {
        let mut economy = app.world_mut().resource_mut::<PlayerEconomy>();
        economy.day = FINAL_DAY;
        economy.current_debt = 5;
        let mut clock = app.world_mut().resource_mut::<GameClock>();
        clock.game_minutes = DAY_END_MINUTES - 0.01;
    }
    force_bite(&mut app, FishingPhase::BitePerfect, SpeciesId(0), 0.0);
    app.world_mut().send_event(ReelCommandEvent);

    // Long enough real time that this single tick is guaranteed to cross
    // 20:00 (0.01 game-minutes at scale 10 is 60 µs real).
    thread::sleep(Duration::from_millis(20));
    app.update();
    app.update();

    let state = app.world().resource::<State<GameState>>();
    let economy = app.world().resource::<PlayerEconomy>();
    let lifetime = app.world().resource::<LifetimeStats>();

    assert!(economy.money > 0, "The reel landed before the day closed");
    assert_eq!(
        economy.current_debt,
        5 - economy.money,
        "The payout reached the ledger on the same tick"
    );
    assert_eq!(lifetime.num_all_caught, 1);
    assert_eq!(
        state.get(),
        &GameState::Victory,
        "The verdict saw the settled debt, not the stale one"
    );
}

#[test]
fn test_day_end_routes_to_summary_with_point_interest() {
    let mut app = build_test_app();
    app.add_systems(
        Update,
        evaluate_day_end.run_if(in_state(GameState::Playing)),
    );
    enter_state(&mut app, GameState::Playing);

    {
        let mut economy = app.world_mut().resource_mut::<PlayerEconomy>();
        economy.day = 3;
        economy.points = 100;
        economy.current_debt = 500;
    }
    app.world_mut().send_event(DayEndEvent { day: 3 });
    app.update();
    app.update();

    let state = app.world().resource::<State<GameState>>();
    let economy = app.world().resource::<PlayerEconomy>();
    assert_eq!(state.get(), &GameState::DaySummary);
    assert_eq!(economy.points, 125, "25% point interest at day end");
}

#[test]
fn test_day_end_defeat_on_final_day_in_debt() {
    let mut app = build_test_app();
    app.add_systems(
        Update,
        evaluate_day_end.run_if(in_state(GameState::Playing)),
    );
    enter_state(&mut app, GameState::Playing);

    {
        let mut economy = app.world_mut().resource_mut::<PlayerEconomy>();
        economy.day = FINAL_DAY;
        economy.current_debt = 1;
    }
    app.world_mut().send_event(DayEndEvent { day: FINAL_DAY });
    app.update();
    app.update();

    let state = app.world().resource::<State<GameState>>();
    assert_eq!(
        state.get(),
        &GameState::Defeat,
        "Any outstanding debt on the final evening loses the boat"
    );
}

#[test]
fn test_day_end_victory_banks_days_and_scores() {
    let mut app = build_test_app();
    app.add_systems(
        Update,
        evaluate_day_end.run_if(in_state(GameState::Playing)),
    );
    enter_state(&mut app, GameState::Playing);

    {
        let mut economy = app.world_mut().resource_mut::<PlayerEconomy>();
        economy.day = 4;
        economy.current_debt = -10;
        economy.total_money_earned = 2_000;
        economy.points = 0;
    }
    app.world_mut().send_event(DayEndEvent { day: 4 });
    app.update();
    app.update();

    let state = app.world().resource::<State<GameState>>();
    let economy = app.world().resource::<PlayerEconomy>();
    let high_score = app.world().resource::<HighScore>();

    assert_eq!(state.get(), &GameState::Victory);
    assert_eq!(economy.extra_days_banked, 3);
    assert_eq!(
        economy.points,
        victory_bonus(3, 0),
        "Diminishing bonus for the three banked days"
    );
    assert_eq!(
        economy.final_score, 8_000,
        "total earned x (1 + banked days)"
    );
    assert_eq!(high_score.0, 8_000);
}

#[test]
fn test_overnight_interest_only_on_outstanding_debt() {
    let mut app = build_test_app();
    app.add_systems(
        Update,
        handle_start_next_day.run_if(in_state(GameState::DaySummary)),
    );
    enter_state(&mut app, GameState::DaySummary);

    {
        let mut economy = app.world_mut().resource_mut::<PlayerEconomy>();
        economy.day = 2;
        economy.current_debt = 1_000;
        let mut daily = app.world_mut().resource_mut::<DailyStats>();
        daily.fish_caught_today = 9;
        let mut clock = app.world_mut().resource_mut::<GameClock>();
        clock.game_minutes = DAY_END_MINUTES;
    }
    app.world_mut().send_event(StartNextDayEvent);
    app.update();
    app.update();

    let state = app.world().resource::<State<GameState>>();
    let economy = app.world().resource::<PlayerEconomy>();
    let daily = app.world().resource::<DailyStats>();
    let clock = app.world().resource::<GameClock>();

    assert_eq!(state.get(), &GameState::Playing);
    assert_eq!(economy.day, 3);
    assert_eq!(economy.current_debt, 1_050, "5% overnight interest, floored");
    assert_eq!(daily.fish_caught_today, 0, "Daily tally resets each morning");
    assert_eq!(clock.game_minutes, DAY_START_MINUTES);
    assert_eq!(clock.clock_label(), "08:00");
}

#[test]
fn test_no_overnight_interest_once_paid_off() {
    let mut app = build_test_app();
    app.add_systems(
        Update,
        handle_start_next_day.run_if(in_state(GameState::DaySummary)),
    );
    enter_state(&mut app, GameState::DaySummary);

    app.world_mut()
        .resource_mut::<PlayerEconomy>()
        .current_debt = -50;
    app.world_mut().send_event(StartNextDayEvent);
    app.update();

    assert_eq!(
        app.world().resource::<PlayerEconomy>().current_debt,
        -50,
        "An overpaid balance never accrues interest"
    );
}

// ─────────────────────────────────────────────────────────────────────────────
// Prestige
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_prestige_multiplies_debt_and_keeps_the_rest() {
    let mut app = build_test_app();
    app.add_systems(
        Update,
        handle_continue_game.run_if(in_state(GameState::Victory)),
    );
    enter_state(&mut app, GameState::Victory);

    {
        let mut economy = app.world_mut().resource_mut::<PlayerEconomy>();
        economy.day = 4;
        economy.current_debt = -120;
        economy.points = 500;
        economy.money = 2_500;
        economy.total_money_earned = 2_500;
        economy.extra_days_banked = 3;
        let mut gear = app.world_mut().resource_mut::<GearUpgrades>();
        gear.hook_level = 2;
    }
    app.world_mut().send_event(ContinueGameEvent);
    app.update();
    app.update();

    let state = app.world().resource::<State<GameState>>();
    let economy = app.world().resource::<PlayerEconomy>();
    let gear = app.world().resource::<GearUpgrades>();

    assert_eq!(state.get(), &GameState::Playing);
    assert_eq!(economy.prestige_level, 1);
    assert_eq!(economy.base_debt, STARTING_DEBT * PRESTIGE_DEBT_MULTIPLIER);
    assert_eq!(economy.current_debt, economy.base_debt);
    assert_eq!(economy.day, 1);
    assert_eq!(economy.points, 500, "Points carry across prestige");
    assert_eq!(economy.money, 2_500, "Money carries across prestige");
    assert_eq!(economy.extra_days_banked, 3, "Banked days carry too");
    assert_eq!(gear.hook_level, 2, "Gear carries across prestige");
}

// ─────────────────────────────────────────────────────────────────────────────
// Upgrade shop
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_buying_upgrades_spends_points_and_raises_levels() {
    let mut app = build_test_app();
    app.add_systems(Update, handle_buy_upgrade.run_if(in_state(GameState::Shop)));
    enter_state(&mut app, GameState::Shop);

    app.world_mut().resource_mut::<PlayerEconomy>().points = 10;

    app.world_mut().send_event(BuyUpgradeEvent {
        kind: UpgradeKind::Weight,
    });
    app.update();
    app.world_mut().send_event(BuyUpgradeEvent {
        kind: UpgradeKind::Hooks,
    });
    app.update();

    let economy = app.world().resource::<PlayerEconomy>();
    let gear = app.world().resource::<GearUpgrades>();

    assert_eq!(gear.weight_level, 2);
    assert!((gear.weight_mult - 1.5).abs() < 1e-6);
    assert_eq!(gear.hook_level, 2);
    assert_eq!(economy.points, 10 - 2 - 2, "Both level-1 buys cost 2 points");
}

#[test]
fn test_unaffordable_upgrade_is_a_noop() {
    let mut app = build_test_app();
    app.add_systems(Update, handle_buy_upgrade.run_if(in_state(GameState::Shop)));
    enter_state(&mut app, GameState::Shop);

    app.world_mut().resource_mut::<PlayerEconomy>().points = 1;
    app.world_mut().send_event(BuyUpgradeEvent {
        kind: UpgradeKind::Length,
    });
    app.update();

    let economy = app.world().resource::<PlayerEconomy>();
    let gear = app.world().resource::<GearUpgrades>();
    assert_eq!(economy.points, 1);
    assert_eq!(gear.length_level, 1);
    assert!((gear.length_mult - 1.0).abs() < 1e-6);
}
