//! The catch panel. Pops over the water when a reel resolves and blocks
//! casting until dismissed.

use bevy::prelude::*;

use crate::shared::*;

#[derive(Component)]
pub struct CatchPanelRoot;

// ═══════════════════════════════════════════════════════════════════════
// SPAWN / DISMISS
// ═══════════════════════════════════════════════════════════════════════

/// Spawns the panel when a catch lands. One panel at a time; the rod
/// can't produce a second catch while `can_cast` is off.
pub fn open_catch_panel_on_event(
    mut commands: Commands,
    mut catch_events: EventReader<CatchLandedEvent>,
    catalog: Res<SpeciesCatalog>,
) {
    for ev in catch_events.read() {
        let r = &ev.result;
        let name = catalog
            .get(r.species_id)
            .map(|s| s.name.as_str())
            .unwrap_or("???");

        let count_line = if r.hook_count > 1 {
            format!("x{} on the line!", r.hook_count)
        } else {
            String::from("Landed!")
        };

        commands
            .spawn((
                CatchPanelRoot,
                Node {
                    width: Val::Percent(100.0),
                    height: Val::Percent(100.0),
                    justify_content: JustifyContent::Center,
                    align_items: AlignItems::Center,
                    ..default()
                },
                BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.5)),
            ))
            .with_children(|parent| {
                parent
                    .spawn((
                        Node {
                            flex_direction: FlexDirection::Column,
                            align_items: AlignItems::Center,
                            row_gap: Val::Px(10.0),
                            padding: UiRect::all(Val::Px(24.0)),
                            ..default()
                        },
                        BackgroundColor(Color::srgb(0.08, 0.16, 0.24)),
                    ))
                    .with_children(|panel| {
                        panel.spawn((
                            Text::new(name.to_string()),
                            TextFont {
                                font_size: 32.0,
                                ..default()
                            },
                            TextColor(Color::srgb(0.55, 0.85, 1.0)),
                        ));
                        panel.spawn((
                            Text::new(count_line),
                            TextFont {
                                font_size: 16.0,
                                ..default()
                            },
                            TextColor(Color::srgb(0.7, 0.8, 0.9)),
                        ));
                        panel.spawn((
                            Text::new(format!(
                                "{:.1} lb   {:.1} in",
                                r.display_weight, r.display_length
                            )),
                            TextFont {
                                font_size: 20.0,
                                ..default()
                            },
                            TextColor(Color::WHITE),
                        ));
                        panel.spawn((
                            Text::new(format!("+${}   +{} pts", r.money_earned, r.points_earned)),
                            TextFont {
                                font_size: 20.0,
                                ..default()
                            },
                            TextColor(Color::srgb(1.0, 0.9, 0.5)),
                        ));
                        panel.spawn((
                            Text::new("[Click/Space] keep fishing"),
                            TextFont {
                                font_size: 13.0,
                                ..default()
                            },
                            TextColor(Color::srgba(1.0, 1.0, 1.0, 0.5)),
                        ));
                    });
            });
    }
}

/// Click or Space dismisses the panel and tells the rod it can cast again.
pub fn catch_panel_input(
    mut commands: Commands,
    query: Query<Entity, With<CatchPanelRoot>>,
    mouse: Res<ButtonInput<MouseButton>>,
    keyboard: Res<ButtonInput<KeyCode>>,
    mut closed_writer: EventWriter<CatchPanelClosedEvent>,
) {
    if query.is_empty() {
        return;
    }
    if mouse.just_pressed(MouseButton::Left) || keyboard.just_pressed(KeyCode::Space) {
        for entity in &query {
            commands.entity(entity).despawn_recursive();
        }
        closed_writer.send(CatchPanelClosedEvent);
    }
}

/// Leaving the water with the panel open just removes it; casting rights
/// are restored on the next morning regardless.
pub fn despawn_catch_panel(mut commands: Commands, query: Query<Entity, With<CatchPanelRoot>>) {
    for entity in &query {
        commands.entity(entity).despawn_recursive();
    }
}
