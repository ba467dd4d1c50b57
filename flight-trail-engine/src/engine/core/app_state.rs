use bevy::prelude::*;

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum AppState {
    /// Waiting for the flight manifest. The driver already ticks.
    #[default]
    Loading,
    /// Manifest applied and scene spawned; models may still be resolving.
    Running,
}
