use bevy::prelude::*;

use crate::shared::*;

// ═══════════════════════════════════════════════════════════════════════
// MARKER COMPONENTS
// ═══════════════════════════════════════════════════════════════════════

#[derive(Component)]
pub struct MainMenuRoot;

#[derive(Component)]
pub struct MainMenuItemText {
    pub index: usize,
}

/// Tracks main menu selection
#[derive(Resource)]
pub struct MainMenuState {
    pub cursor: usize,
}

const MAIN_MENU_OPTIONS: &[&str] = &["Set Sail", "Quit"];

// ═══════════════════════════════════════════════════════════════════════
// SPAWN / DESPAWN
// ═══════════════════════════════════════════════════════════════════════

pub fn spawn_main_menu(
    mut commands: Commands,
    lifetime: Res<LifetimeStats>,
    high_score: Res<HighScore>,
) {
    commands.insert_resource(MainMenuState { cursor: 0 });

    commands
        .spawn((
            MainMenuRoot,
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(24.0),
                ..default()
            },
            BackgroundColor(Color::srgb(0.05, 0.12, 0.2)),
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("TIDELINE"),
                TextFont {
                    font_size: 52.0,
                    ..default()
                },
                TextColor(Color::srgb(0.55, 0.85, 1.0)),
            ));

            parent.spawn((
                Text::new("Seven days to pay off the boat"),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(Color::srgb(0.6, 0.75, 0.85)),
            ));

            // Menu options
            parent
                .spawn(Node {
                    flex_direction: FlexDirection::Column,
                    align_items: AlignItems::Center,
                    row_gap: Val::Px(8.0),
                    ..default()
                })
                .with_children(|menu| {
                    for (i, label) in MAIN_MENU_OPTIONS.iter().enumerate() {
                        menu.spawn((
                            MainMenuItemText { index: i },
                            Text::new(*label),
                            TextFont {
                                font_size: 22.0,
                                ..default()
                            },
                            TextColor(Color::WHITE),
                        ));
                    }
                });

            // Lifetime footer
            parent.spawn((
                Text::new(format!(
                    "Lifetime catches: {}   High score: {}",
                    lifetime.num_all_caught, high_score.0
                )),
                TextFont {
                    font_size: 13.0,
                    ..default()
                },
                TextColor(Color::srgb(0.4, 0.5, 0.6)),
            ));
        });
}

pub fn despawn_main_menu(mut commands: Commands, query: Query<Entity, With<MainMenuRoot>>) {
    for entity in &query {
        commands.entity(entity).despawn_recursive();
    }
    commands.remove_resource::<MainMenuState>();
}

// ═══════════════════════════════════════════════════════════════════════
// UPDATE / INTERACTION
// ═══════════════════════════════════════════════════════════════════════

pub fn update_main_menu_visuals(
    state: Option<Res<MainMenuState>>,
    mut query: Query<(&MainMenuItemText, &mut TextColor)>,
) {
    let Some(state) = state else { return };
    for (item, mut color) in &mut query {
        if item.index == state.cursor {
            *color = TextColor(Color::srgb(1.0, 0.9, 0.4));
        } else {
            *color = TextColor(Color::WHITE);
        }
    }
}

pub fn main_menu_navigation(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut state: Option<ResMut<MainMenuState>>,
    mut next_state: ResMut<NextState<GameState>>,
    mut app_exit: EventWriter<AppExit>,
) {
    let Some(ref mut state) = state else { return };

    if keyboard.just_pressed(KeyCode::ArrowDown) && state.cursor < MAIN_MENU_OPTIONS.len() - 1 {
        state.cursor += 1;
    }
    if keyboard.just_pressed(KeyCode::ArrowUp) && state.cursor > 0 {
        state.cursor -= 1;
    }

    if keyboard.just_pressed(KeyCode::Enter) || keyboard.just_pressed(KeyCode::Space) {
        match state.cursor {
            0 => {
                next_state.set(GameState::Playing);
            }
            1 => {
                app_exit.send(AppExit::Success);
            }
            _ => {}
        }
    }
}
