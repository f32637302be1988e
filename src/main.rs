mod shared;
mod data;
mod economy;
mod fishing;
mod save;
mod ui;

use bevy::prelude::*;
use bevy::window::{PresentMode, WindowResolution};

use shared::*;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Tideline".into(),
                resolution: WindowResolution::new(SCREEN_WIDTH, SCREEN_HEIGHT),
                present_mode: PresentMode::AutoVsync,
                resizable: true,
                ..default()
            }),
            ..default()
        }))
        // Game state
        .init_state::<GameState>()
        // Shared resources
        .init_resource::<SpeciesCatalog>()
        .init_resource::<GameClock>()
        .init_resource::<PlayerEconomy>()
        .init_resource::<GearUpgrades>()
        .init_resource::<LifetimeStats>()
        .init_resource::<DailyStats>()
        .init_resource::<TrophyFlags>()
        .init_resource::<HighScore>()
        // Events
        .add_event::<CastCommandEvent>()
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
        .add_event::<SaveCompleteEvent>()
        // Domain plugins
        .add_plugins(fishing::FishingPlugin)
        .add_plugins(economy::EconomyPlugin)
        .add_plugins(ui::UiPlugin)
        .add_plugins(save::SavePlugin)
        // Data loading
        .add_plugins(data::DataPlugin)
        // Camera
        .add_systems(Startup, setup_camera)
        .run();
}

fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}
