use bevy::pbr::{NotShadowCaster, NotShadowReceiver};
use bevy::prelude::*;

/// Semantic role of an externally sourced model.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelRole {
    Terrain,
    Vehicle,
}

impl ModelRole {
    pub fn label(&self) -> &'static str {
        match self {
            ModelRole::Terrain => "terrain",
            ModelRole::Vehicle => "vehicle",
        }
    }

    /// Flags applied uniformly to every sub-node of the role's model. The
    /// vehicle casts and receives. Terrain only receives: it is a single
    /// ground surface, so casting would just self-shadow the whole map and
    /// double its shadow-pass cost without shading anything else.
    pub fn shadow_policy(&self) -> ShadowPolicy {
        match self {
            ModelRole::Terrain => ShadowPolicy {
                cast: false,
                receive: true,
            },
            ModelRole::Vehicle => ShadowPolicy {
                cast: true,
                receive: true,
            },
        }
    }
}

/// Shadow flags applied to every mesh under a role entity.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShadowPolicy {
    pub cast: bool,
    pub receive: bool,
}

impl ShadowPolicy {
    /// Meshes cast and receive by default, so only the opt-outs are inserted.
    pub fn apply(&self, entity: &mut EntityCommands) {
        if !self.cast {
            entity.insert(NotShadowCaster);
        }
        if !self.receive {
            entity.insert(NotShadowReceiver);
        }
    }
}

/// Which mesh ended up representing a role.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeshSource {
    Loaded,
    Placeholder,
}

/// Load status as reported by the asset source on a given frame.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadStatus {
    InFlight,
    Loaded,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SlotState {
    Pending,
    Resolved,
    Failed(String),
}

/// Final outcome of a slot. Produced exactly once.
#[derive(Debug, Clone, PartialEq)]
pub enum SlotOutcome {
    Loaded,
    Placeholder { reason: String },
}

impl SlotOutcome {
    pub fn mesh_source(&self) -> MeshSource {
        match self {
            SlotOutcome::Loaded => MeshSource::Loaded,
            SlotOutcome::Placeholder { .. } => MeshSource::Placeholder,
        }
    }
}

/// Pending/resolved/failed tracker for one role's external model.
#[derive(Debug, Clone)]
pub struct ModelSlot {
    role: ModelRole,
    source: String,
    state: SlotState,
}

impl ModelSlot {
    pub fn new(role: ModelRole, source: impl Into<String>) -> Self {
        Self {
            role,
            source: source.into(),
            state: SlotState::Pending,
        }
    }

    pub fn role(&self) -> ModelRole {
        self.role
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn state(&self) -> &SlotState {
        &self.state
    }

    pub fn is_pending(&self) -> bool {
        self.state == SlotState::Pending
    }

    /// Feeds the latest load status. Returns the outcome on the first
    /// terminal status and `None` on every call after that.
    pub fn observe(&mut self, status: LoadStatus) -> Option<SlotOutcome> {
        if !self.is_pending() {
            return None;
        }
        match status {
            LoadStatus::InFlight => None,
            LoadStatus::Loaded => {
                self.state = SlotState::Resolved;
                Some(SlotOutcome::Loaded)
            }
            LoadStatus::Failed(reason) => {
                self.state = SlotState::Failed(reason.clone());
                Some(SlotOutcome::Placeholder { reason })
            }
        }
    }
}
