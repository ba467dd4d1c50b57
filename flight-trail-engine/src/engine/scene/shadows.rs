use bevy::prelude::*;
use bevy::scene::SceneInstanceReady;

use crate::engine::assets::model_slot::ShadowPolicy;

/// Observer on a role entity: once its glTF scene is spawned, pushes the
/// role's shadow flags onto every node of the scene.
pub fn apply_shadow_policy_on_ready(
    trigger: Trigger<SceneInstanceReady>,
    mut commands: Commands,
    policies: Query<&ShadowPolicy>,
    children: Query<&Children>,
) {
    let root = trigger.target();
    let Ok(policy) = policies.get(root) else {
        return;
    };
    apply_shadow_policy(&mut commands, root, *policy, &children);
}

/// Applies `policy` to every descendant of `root`.
pub fn apply_shadow_policy(
    commands: &mut Commands,
    root: Entity,
    policy: ShadowPolicy,
    children: &Query<&Children>,
) -> usize {
    let mut applied = 0;
    for descendant in children.iter_descendants(root) {
        policy.apply(&mut commands.entity(descendant));
        applied += 1;
    }
    applied
}
