//! Victory and defeat screens.

use bevy::prelude::*;

use crate::shared::*;

#[derive(Component)]
pub struct VictoryRoot;

#[derive(Component)]
pub struct DefeatRoot;

// ═══════════════════════════════════════════════════════════════════════
// VICTORY
// ═══════════════════════════════════════════════════════════════════════

pub fn spawn_victory_screen(
    mut commands: Commands,
    economy: Res<PlayerEconomy>,
    high_score: Res<HighScore>,
) {
    commands
        .spawn((
            VictoryRoot,
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(14.0),
                ..default()
            },
            BackgroundColor(Color::srgb(0.05, 0.14, 0.1)),
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("DEBT PAID"),
                TextFont {
                    font_size: 44.0,
                    ..default()
                },
                TextColor(Color::srgb(0.5, 1.0, 0.7)),
            ));
            parent.spawn((
                Text::new(format!(
                    "Cleared on day {} of {}  —  {} extra days banked",
                    economy.day, FINAL_DAY, economy.extra_days_banked
                )),
                TextFont {
                    font_size: 18.0,
                    ..default()
                },
                TextColor(Color::WHITE),
            ));
            parent.spawn((
                Text::new(format!("Final score: {}", economy.final_score)),
                TextFont {
                    font_size: 24.0,
                    ..default()
                },
                TextColor(Color::srgb(1.0, 0.9, 0.5)),
            ));
            parent.spawn((
                Text::new(format!("High score: {}", high_score.0)),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(Color::srgb(0.7, 0.8, 0.9)),
            ));
            parent.spawn((
                Text::new(format!(
                    "[Enter] keep going — prestige {} (debt x{}, points x{})",
                    economy.prestige_level + 1,
                    PRESTIGE_DEBT_MULTIPLIER,
                    prestige_point_factor(economy.prestige_level + 1)
                )),
                TextFont {
                    font_size: 15.0,
                    ..default()
                },
                TextColor(Color::srgba(1.0, 1.0, 1.0, 0.7)),
            ));
            parent.spawn((
                Text::new("[Esc] quit while you're ahead"),
                TextFont {
                    font_size: 13.0,
                    ..default()
                },
                TextColor(Color::srgba(1.0, 1.0, 1.0, 0.5)),
            ));
        });
}

pub fn despawn_victory_screen(mut commands: Commands, query: Query<Entity, With<VictoryRoot>>) {
    for entity in &query {
        commands.entity(entity).despawn_recursive();
    }
}

pub fn victory_navigation(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut continue_writer: EventWriter<ContinueGameEvent>,
    mut app_exit: EventWriter<AppExit>,
) {
    if keyboard.just_pressed(KeyCode::Enter) {
        continue_writer.send(ContinueGameEvent);
    }
    if keyboard.just_pressed(KeyCode::Escape) {
        app_exit.send(AppExit::Success);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// DEFEAT
// ═══════════════════════════════════════════════════════════════════════

pub fn spawn_defeat_screen(mut commands: Commands, economy: Res<PlayerEconomy>) {
    commands
        .spawn((
            DefeatRoot,
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(14.0),
                ..default()
            },
            BackgroundColor(Color::srgb(0.14, 0.05, 0.05)),
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("THE BOAT IS FORFEIT"),
                TextFont {
                    font_size: 40.0,
                    ..default()
                },
                TextColor(Color::srgb(1.0, 0.5, 0.4)),
            ));
            parent.spawn((
                Text::new(format!(
                    "Day {} ended with {} still owed.",
                    economy.day,
                    economy.current_debt.max(0)
                )),
                TextFont {
                    font_size: 18.0,
                    ..default()
                },
                TextColor(Color::WHITE),
            ));
            parent.spawn((
                Text::new(format!(
                    "Earned ${} over the week.",
                    economy.total_money_earned
                )),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(Color::srgb(0.8, 0.8, 0.8)),
            ));
            parent.spawn((
                Text::new("[Enter] try again"),
                TextFont {
                    font_size: 14.0,
                    ..default()
                },
                TextColor(Color::srgba(1.0, 1.0, 1.0, 0.6)),
            ));
        });
}

pub fn despawn_defeat_screen(mut commands: Commands, query: Query<Entity, With<DefeatRoot>>) {
    for entity in &query {
        commands.entity(entity).despawn_recursive();
    }
}

/// Enter resets the run (gear and all) back to day one and returns to the
/// menu. Lifetime stats and the high score are untouched.
pub fn defeat_navigation(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut economy: ResMut<PlayerEconomy>,
    mut gear: ResMut<GearUpgrades>,
    mut clock: ResMut<GameClock>,
    mut daily: ResMut<DailyStats>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if keyboard.just_pressed(KeyCode::Enter) {
        *economy = PlayerEconomy::default();
        *gear = GearUpgrades::default();
        *clock = GameClock::default();
        *daily = DailyStats::default();
        next_state.set(GameState::MainMenu);
    }
}
