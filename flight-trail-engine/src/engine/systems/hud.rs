use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;

use crate::engine::flight::driver::AnimationDriver;
use crate::engine::scene::flight_scene::FlightDriver;

#[derive(Component)]
pub struct FlightHudText;

pub fn spawn_hud(commands: &mut Commands) {
    commands
        .spawn(Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            ..default()
        })
        .with_children(|parent| {
            parent.spawn((
                Text::new("FPS: "),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(Color::srgb(1., 1., 1.)),
                Node {
                    position_type: PositionType::Absolute,
                    bottom: Val::Px(12.0),
                    right: Val::Px(12.0),
                    ..default()
                },
                FlightHudText,
            ));
        });
}

pub fn hud_line(fps: Option<f64>, driver: &AnimationDriver) -> String {
    let fps = fps.map_or_else(|| "--".to_string(), |value| format!("{value:.1}"));
    format!(
        "FPS: {fps} | loop {} at {:.0}% | trail {} pts",
        driver.loops_completed() + 1,
        driver.progress() * 100.0,
        driver.trail().points().len()
    )
}

pub fn hud_text_update_system(
    diagnostics: Res<DiagnosticsStore>,
    driver: Res<FlightDriver>,
    mut query: Query<&mut Text, With<FlightHudText>>,
) {
    let fps = diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FPS)
        .and_then(|fps| fps.smoothed());
    for mut text in &mut query {
        text.0 = hud_line(fps, &driver);
    }
}
