//! End-of-day summary screen between 20:00 and the next morning.

use bevy::prelude::*;

use crate::shared::*;

#[derive(Component)]
pub struct DaySummaryRoot;

pub fn spawn_day_summary(
    mut commands: Commands,
    economy: Res<PlayerEconomy>,
    daily: Res<DailyStats>,
) {
    commands
        .spawn((
            DaySummaryRoot,
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(14.0),
                ..default()
            },
            BackgroundColor(Color::srgb(0.04, 0.08, 0.14)),
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new(format!("Day {} Complete", economy.day)),
                TextFont {
                    font_size: 36.0,
                    ..default()
                },
                TextColor(Color::srgb(0.55, 0.85, 1.0)),
            ));
            parent.spawn((
                Text::new(format!("Fish caught today: {}", daily.fish_caught_today)),
                TextFont {
                    font_size: 18.0,
                    ..default()
                },
                TextColor(Color::WHITE),
            ));
            parent.spawn((
                Text::new(format!("Points: {}", economy.points)),
                TextFont {
                    font_size: 18.0,
                    ..default()
                },
                TextColor(Color::srgb(0.6, 0.95, 0.7)),
            ));
            parent.spawn((
                Text::new(format!("Debt remaining: {}", economy.current_debt.max(0))),
                TextFont {
                    font_size: 18.0,
                    ..default()
                },
                TextColor(Color::srgb(1.0, 0.55, 0.55)),
            ));
            parent.spawn((
                Text::new("Interest hits overnight."),
                TextFont {
                    font_size: 13.0,
                    ..default()
                },
                TextColor(Color::srgba(1.0, 1.0, 1.0, 0.5)),
            ));
            parent.spawn((
                Text::new("[Click/Enter] next morning"),
                TextFont {
                    font_size: 14.0,
                    ..default()
                },
                TextColor(Color::srgba(1.0, 1.0, 1.0, 0.6)),
            ));
        });
}

pub fn despawn_day_summary(mut commands: Commands, query: Query<Entity, With<DaySummaryRoot>>) {
    for entity in &query {
        commands.entity(entity).despawn_recursive();
    }
}

pub fn day_summary_input(
    mouse: Res<ButtonInput<MouseButton>>,
    keyboard: Res<ButtonInput<KeyCode>>,
    mut next_day_writer: EventWriter<StartNextDayEvent>,
) {
    if mouse.just_pressed(MouseButton::Left)
        || keyboard.just_pressed(KeyCode::Enter)
        || keyboard.just_pressed(KeyCode::Space)
    {
        next_day_writer.send(StartNextDayEvent);
    }
}
