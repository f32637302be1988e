//! Presentation layer. Listens to shared events and resources; the only
//! gameplay it performs is sending command events back into the core.

mod catch_panel;
mod day_summary;
mod endings;
mod hud;
mod main_menu;
mod shop_screen;

use bevy::prelude::*;

use crate::shared::*;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        // ─── MAIN MENU ───
        app.add_systems(OnEnter(GameState::MainMenu), main_menu::spawn_main_menu);
        app.add_systems(OnExit(GameState::MainMenu), main_menu::despawn_main_menu);
        app.add_systems(
            Update,
            (
                main_menu::update_main_menu_visuals,
                main_menu::main_menu_navigation,
            )
                .run_if(in_state(GameState::MainMenu)),
        );

        // ─── HUD — visible while out on the water ───
        app.add_systems(OnEnter(GameState::Playing), hud::spawn_hud);
        app.add_systems(OnExit(GameState::Playing), hud::despawn_hud);
        app.add_systems(
            Update,
            (
                hud::update_day_display,
                hud::update_clock_display,
                hud::update_money_display,
                hud::update_debt_display,
                hud::update_points_display,
                hud::update_bite_alert,
                hud::open_shop_on_key,
            )
                .run_if(in_state(GameState::Playing)),
        );

        // ─── CATCH PANEL — modal over the Playing state ───
        app.add_systems(
            Update,
            (
                catch_panel::open_catch_panel_on_event,
                catch_panel::catch_panel_input,
            )
                .chain()
                .run_if(in_state(GameState::Playing)),
        );
        app.add_systems(OnExit(GameState::Playing), catch_panel::despawn_catch_panel);

        // ─── DAY SUMMARY ───
        app.add_systems(OnEnter(GameState::DaySummary), day_summary::spawn_day_summary);
        app.add_systems(OnExit(GameState::DaySummary), day_summary::despawn_day_summary);
        app.add_systems(
            Update,
            day_summary::day_summary_input.run_if(in_state(GameState::DaySummary)),
        );

        // ─── SHOP ───
        app.add_systems(OnEnter(GameState::Shop), shop_screen::spawn_shop_screen);
        app.add_systems(OnExit(GameState::Shop), shop_screen::despawn_shop_screen);
        app.add_systems(
            Update,
            (
                shop_screen::update_shop_display,
                shop_screen::shop_navigation,
            )
                .run_if(in_state(GameState::Shop)),
        );

        // ─── VICTORY / DEFEAT ───
        app.add_systems(OnEnter(GameState::Victory), endings::spawn_victory_screen);
        app.add_systems(OnExit(GameState::Victory), endings::despawn_victory_screen);
        app.add_systems(
            Update,
            endings::victory_navigation.run_if(in_state(GameState::Victory)),
        );
        app.add_systems(OnEnter(GameState::Defeat), endings::spawn_defeat_screen);
        app.add_systems(OnExit(GameState::Defeat), endings::despawn_defeat_screen);
        app.add_systems(
            Update,
            endings::defeat_navigation.run_if(in_state(GameState::Defeat)),
        );
    }
}
