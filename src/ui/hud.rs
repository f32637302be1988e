use bevy::prelude::*;

use crate::shared::*;

// ═══════════════════════════════════════════════════════════════════════
// MARKER COMPONENTS — used to query and update HUD elements
// ═══════════════════════════════════════════════════════════════════════

#[derive(Component)]
pub struct HudRoot;

#[derive(Component)]
pub struct HudDayText;

#[derive(Component)]
pub struct HudClockText;

#[derive(Component)]
pub struct HudMoneyText;

#[derive(Component)]
pub struct HudDebtText;

#[derive(Component)]
pub struct HudPointsText;

/// The "FISH ON!" banner in the middle of the screen. Hidden until a bite.
#[derive(Component)]
pub struct BiteAlertText;

const ALERT_PERFECT_COLOR: Color = Color::srgb(1.0, 0.9, 0.2);
const ALERT_LATE_COLOR: Color = Color::srgb(1.0, 0.45, 0.2);

// ═══════════════════════════════════════════════════════════════════════
// SPAWN HUD
// ═══════════════════════════════════════════════════════════════════════

pub fn spawn_hud(mut commands: Commands) {
    // Root container — full screen overlay
    commands
        .spawn((
            HudRoot,
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::SpaceBetween,
                ..default()
            },
            PickingBehavior::IGNORE,
        ))
        .with_children(|parent| {
            // ─── TOP BAR ───
            parent
                .spawn((
                    Node {
                        width: Val::Percent(100.0),
                        height: Val::Px(40.0),
                        flex_direction: FlexDirection::Row,
                        justify_content: JustifyContent::SpaceBetween,
                        align_items: AlignItems::Center,
                        padding: UiRect::axes(Val::Px(12.0), Val::Px(4.0)),
                        ..default()
                    },
                    BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.6)),
                    PickingBehavior::IGNORE,
                ))
                .with_children(|top_bar| {
                    // Left group: day + clock
                    top_bar
                        .spawn((
                            Node {
                                flex_direction: FlexDirection::Row,
                                align_items: AlignItems::Center,
                                column_gap: Val::Px(16.0),
                                ..default()
                            },
                            PickingBehavior::IGNORE,
                        ))
                        .with_children(|left| {
                            left.spawn((
                                HudDayText,
                                Text::new("Day 1 / 7"),
                                TextFont {
                                    font_size: 18.0,
                                    ..default()
                                },
                                TextColor(Color::WHITE),
                                PickingBehavior::IGNORE,
                            ));
                            left.spawn((
                                HudClockText,
                                Text::new("08:00"),
                                TextFont {
                                    font_size: 18.0,
                                    ..default()
                                },
                                TextColor(Color::srgb(0.8, 0.85, 1.0)),
                                PickingBehavior::IGNORE,
                            ));
                        });

                    // Right group: money, debt, points
                    top_bar
                        .spawn((
                            Node {
                                flex_direction: FlexDirection::Row,
                                align_items: AlignItems::Center,
                                column_gap: Val::Px(16.0),
                                ..default()
                            },
                            PickingBehavior::IGNORE,
                        ))
                        .with_children(|right| {
                            right.spawn((
                                HudMoneyText,
                                Text::new("$0"),
                                TextFont {
                                    font_size: 18.0,
                                    ..default()
                                },
                                TextColor(Color::srgb(1.0, 0.9, 0.5)),
                                PickingBehavior::IGNORE,
                            ));
                            right.spawn((
                                HudDebtText,
                                Text::new("Debt: 2000"),
                                TextFont {
                                    font_size: 18.0,
                                    ..default()
                                },
                                TextColor(Color::srgb(1.0, 0.55, 0.55)),
                                PickingBehavior::IGNORE,
                            ));
                            right.spawn((
                                HudPointsText,
                                Text::new("0 pts"),
                                TextFont {
                                    font_size: 18.0,
                                    ..default()
                                },
                                TextColor(Color::srgb(0.6, 0.95, 0.7)),
                                PickingBehavior::IGNORE,
                            ));
                        });
                });

            // ─── CENTER: bite alert ───
            parent
                .spawn((
                    Node {
                        width: Val::Percent(100.0),
                        justify_content: JustifyContent::Center,
                        ..default()
                    },
                    PickingBehavior::IGNORE,
                ))
                .with_children(|center| {
                    center.spawn((
                        BiteAlertText,
                        Text::new("FISH ON!"),
                        TextFont {
                            font_size: 42.0,
                            ..default()
                        },
                        TextColor(ALERT_PERFECT_COLOR),
                        Visibility::Hidden,
                        PickingBehavior::IGNORE,
                    ));
                });

            // ─── BOTTOM BAR: controls hint ───
            parent.spawn((
                Node {
                    width: Val::Percent(100.0),
                    justify_content: JustifyContent::Center,
                    padding: UiRect::all(Val::Px(6.0)),
                    ..default()
                },
                PickingBehavior::IGNORE,
            ))
            .with_children(|bottom| {
                bottom.spawn((
                    Text::new("[Click/Space] cast + reel   [Esc] retract   [B] shop"),
                    TextFont {
                        font_size: 13.0,
                        ..default()
                    },
                    TextColor(Color::srgba(1.0, 1.0, 1.0, 0.5)),
                    PickingBehavior::IGNORE,
                ));
            });
        });
}

pub fn despawn_hud(mut commands: Commands, query: Query<Entity, With<HudRoot>>) {
    for entity in &query {
        commands.entity(entity).despawn_recursive();
    }
}

// ═══════════════════════════════════════════════════════════════════════
// UPDATE SYSTEMS
// ═══════════════════════════════════════════════════════════════════════

pub fn update_day_display(
    economy: Res<PlayerEconomy>,
    mut query: Query<&mut Text, With<HudDayText>>,
) {
    if !economy.is_changed() {
        return;
    }
    for mut text in &mut query {
        let prestige = if economy.prestige_level > 0 {
            format!("  (prestige {})", economy.prestige_level)
        } else {
            String::new()
        };
        *text = Text::new(format!("Day {} / {}{}", economy.day, FINAL_DAY, prestige));
    }
}

pub fn update_clock_display(
    clock: Res<GameClock>,
    mut query: Query<&mut Text, With<HudClockText>>,
) {
    for mut text in &mut query {
        *text = Text::new(clock.clock_label());
    }
}

pub fn update_money_display(
    economy: Res<PlayerEconomy>,
    mut query: Query<&mut Text, With<HudMoneyText>>,
) {
    if !economy.is_changed() {
        return;
    }
    for mut text in &mut query {
        *text = Text::new(format!("${}", economy.money));
    }
}

pub fn update_debt_display(
    economy: Res<PlayerEconomy>,
    mut query: Query<&mut Text, With<HudDebtText>>,
) {
    if !economy.is_changed() {
        return;
    }
    for mut text in &mut query {
        if economy.current_debt > 0 {
            *text = Text::new(format!("Debt: {}", economy.current_debt));
        } else {
            *text = Text::new("Debt: PAID");
        }
    }
}

pub fn update_points_display(
    economy: Res<PlayerEconomy>,
    mut query: Query<&mut Text, With<HudPointsText>>,
) {
    if !economy.is_changed() {
        return;
    }
    for mut text in &mut query {
        *text = Text::new(format!("{} pts", economy.points));
    }
}

/// Shows/hides the bite banner and restyles it when the perfect window
/// lapses.
pub fn update_bite_alert(
    mut alert_events: EventReader<BiteAlertEvent>,
    mut query: Query<(&mut Text, &mut TextColor, &mut Visibility), With<BiteAlertText>>,
) {
    for ev in alert_events.read() {
        for (mut text, mut color, mut visibility) in &mut query {
            if !ev.active {
                *visibility = Visibility::Hidden;
            } else if ev.late {
                *text = Text::new("REEL! NOW!");
                *color = TextColor(ALERT_LATE_COLOR);
                *visibility = Visibility::Visible;
            } else {
                *text = Text::new("FISH ON!");
                *color = TextColor(ALERT_PERFECT_COLOR);
                *visibility = Visibility::Visible;
            }
        }
    }
}

/// B opens the shop. Leaving Playing cancels any in-flight cast.
pub fn open_shop_on_key(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if keyboard.just_pressed(KeyCode::KeyB) {
        next_state.set(GameState::Shop);
    }
}
