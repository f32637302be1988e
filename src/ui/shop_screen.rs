//! The upgrade shop. Spends points on the three gear tracks.

use bevy::prelude::*;

use crate::shared::*;

#[derive(Component)]
pub struct ShopRoot;

#[derive(Component)]
pub struct ShopPointsText;

#[derive(Component)]
pub struct ShopItemText {
    pub index: usize,
}

/// Tracks shop selection
#[derive(Resource)]
pub struct ShopState {
    pub cursor: usize,
}

const SHOP_TRACKS: &[UpgradeKind] = &[UpgradeKind::Weight, UpgradeKind::Length, UpgradeKind::Hooks];

fn track_label(kind: UpgradeKind, gear: &GearUpgrades) -> String {
    let level = gear.level_of(kind);
    let cost = gear.upgrade_cost(kind);
    match kind {
        UpgradeKind::Weight => format!(
            "Heavier Lures   lvl {}  (x{:.2} weight)  — {} pts",
            level, gear.weight_mult, cost
        ),
        UpgradeKind::Length => format!(
            "Longer Lines    lvl {}  (x{:.2} length)  — {} pts",
            level, gear.length_mult, cost
        ),
        UpgradeKind::Hooks => format!(
            "Extra Hooks     lvl {}  ({} per reel)   — {} pts",
            level,
            gear.hook_count(),
            cost
        ),
    }
}

// ═══════════════════════════════════════════════════════════════════════
// SPAWN / DESPAWN
// ═══════════════════════════════════════════════════════════════════════

pub fn spawn_shop_screen(mut commands: Commands, gear: Res<GearUpgrades>) {
    commands.insert_resource(ShopState { cursor: 0 });

    commands
        .spawn((
            ShopRoot,
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(16.0),
                ..default()
            },
            BackgroundColor(Color::srgb(0.1, 0.08, 0.05)),
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("CHANDLERY"),
                TextFont {
                    font_size: 36.0,
                    ..default()
                },
                TextColor(Color::srgb(1.0, 0.85, 0.5)),
            ));
            parent.spawn((
                ShopPointsText,
                Text::new("0 pts"),
                TextFont {
                    font_size: 18.0,
                    ..default()
                },
                TextColor(Color::srgb(0.6, 0.95, 0.7)),
            ));

            parent
                .spawn(Node {
                    flex_direction: FlexDirection::Column,
                    align_items: AlignItems::FlexStart,
                    row_gap: Val::Px(8.0),
                    ..default()
                })
                .with_children(|menu| {
                    for (i, &kind) in SHOP_TRACKS.iter().enumerate() {
                        menu.spawn((
                            ShopItemText { index: i },
                            Text::new(track_label(kind, &gear)),
                            TextFont {
                                font_size: 18.0,
                                ..default()
                            },
                            TextColor(Color::WHITE),
                        ));
                    }
                });

            parent.spawn((
                Text::new("[Up/Down] select   [Enter] buy   [Esc] back to the water"),
                TextFont {
                    font_size: 13.0,
                    ..default()
                },
                TextColor(Color::srgba(1.0, 1.0, 1.0, 0.5)),
            ));
        });
}

pub fn despawn_shop_screen(mut commands: Commands, query: Query<Entity, With<ShopRoot>>) {
    for entity in &query {
        commands.entity(entity).despawn_recursive();
    }
    commands.remove_resource::<ShopState>();
}

// ═══════════════════════════════════════════════════════════════════════
// UPDATE / INTERACTION
// ═══════════════════════════════════════════════════════════════════════

pub fn update_shop_display(
    state: Option<Res<ShopState>>,
    economy: Res<PlayerEconomy>,
    gear: Res<GearUpgrades>,
    mut points_query: Query<&mut Text, (With<ShopPointsText>, Without<ShopItemText>)>,
    mut item_query: Query<(&ShopItemText, &mut Text, &mut TextColor)>,
) {
    let Some(state) = state else { return };

    for mut text in &mut points_query {
        *text = Text::new(format!("{} pts", economy.points));
    }

    for (item, mut text, mut color) in &mut item_query {
        let kind = SHOP_TRACKS[item.index];
        *text = Text::new(track_label(kind, &gear));
        if item.index == state.cursor {
            *color = TextColor(Color::srgb(1.0, 0.9, 0.4));
        } else if economy.points < gear.upgrade_cost(kind) {
            *color = TextColor(Color::srgba(1.0, 1.0, 1.0, 0.4));
        } else {
            *color = TextColor(Color::WHITE);
        }
    }
}

pub fn shop_navigation(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut state: Option<ResMut<ShopState>>,
    mut buy_writer: EventWriter<BuyUpgradeEvent>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    let Some(ref mut state) = state else { return };

    if keyboard.just_pressed(KeyCode::ArrowDown) && state.cursor < SHOP_TRACKS.len() - 1 {
        state.cursor += 1;
    }
    if keyboard.just_pressed(KeyCode::ArrowUp) && state.cursor > 0 {
        state.cursor -= 1;
    }

    if keyboard.just_pressed(KeyCode::Enter) {
        buy_writer.send(BuyUpgradeEvent {
            kind: SHOP_TRACKS[state.cursor],
        });
    }

    if keyboard.just_pressed(KeyCode::Escape) {
        next_state.set(GameState::Playing);
    }
}
