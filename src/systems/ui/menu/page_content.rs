//! Entry node lifecycle for one menu level.
use bevy::prelude::*;

use crate::data::catalog::CatalogEntry;
use crate::data::config::NavTuning;
use crate::systems::animation::{AnimatedNode, NodeTweens};

use super::defs::{EntryLabel, ExitingEntry, MenuEntry};
use super::layout;

/// Spawns the rows of a freshly built list. Each node starts at its steady
/// passive/active values with its vertical offset already laid out, so a
/// pure refresh needs no priming to look settled.
pub(super) fn spawn_level_entries(
    commands: &mut Commands,
    tuning: &NavTuning,
    rows: &[CatalogEntry],
    depth: usize,
    selection: usize,
) -> Vec<Entity> {
    rows.iter()
        .enumerate()
        .map(|(index, row)| {
            let style = layout::item_style(tuning, index, selection);
            commands
                .spawn((
                    MenuEntry {
                        index,
                        label: row.label.clone(),
                    },
                    AnimatedNode {
                        alpha: style.alpha,
                        label_alpha: style.alpha,
                        zoom: style.zoom,
                        x: 0.0,
                        y: layout::entry_row_y(tuning, depth, index, selection),
                    },
                    NodeTweens::default(),
                ))
                .id()
        })
        .collect()
}

/// Flags outgoing rows for retirement once their exit animation settles.
pub(super) fn mark_exiting(commands: &mut Commands, entries: &[Entity]) {
    for &entity in entries {
        commands.entity(entity).try_insert(ExitingEntry);
    }
}

/// Despawns snapshot rows whose tweens have all finished, along with their
/// labels. Rows still animating out are left alone.
pub(super) fn retire_exited_entries(
    mut commands: Commands,
    exiting: Query<(Entity, &NodeTweens), With<ExitingEntry>>,
    labels: Query<(Entity, &EntryLabel)>,
) {
    for (entity, tweens) in exiting.iter() {
        if !tweens.is_idle() {
            continue;
        }
        commands.entity(entity).despawn();
        for (label_entity, label) in labels.iter() {
            if label.owner == entity {
                commands.entity(label_entity).despawn();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use bevy::ecs::system::{RunSystemOnce, SystemState};

    use crate::data::catalog::ItemCatalog;
    use crate::systems::animation::{NodeField, TweenQueue, apply_tween_requests};

    use super::*;

    fn spawn_rows(world: &mut World, depth: usize, selection: usize) -> Vec<Entity> {
        let tuning = world.resource::<NavTuning>().clone();
        let rows = world.resource::<ItemCatalog>().clone();
        let rows = rows.entries_at(0, &[]).unwrap().to_vec();
        let mut state: SystemState<Commands> = SystemState::new(world);
        let mut commands = state.get_mut(world);
        let entries = spawn_level_entries(&mut commands, &tuning, &rows, depth, selection);
        state.apply(world);
        entries
    }

    fn test_world() -> World {
        let mut world = World::new();
        world.insert_resource(NavTuning::default());
        world.insert_resource(ItemCatalog::demo());
        world.init_resource::<TweenQueue>();
        world
    }

    #[test]
    fn spawned_rows_start_at_their_steady_values() {
        let mut world = test_world();
        let entries = spawn_rows(&mut world, 1, 1);
        let tuning = world.resource::<NavTuning>().clone();

        let selected = world.get::<AnimatedNode>(entries[1]).unwrap();
        assert_eq!(selected.alpha, tuning.item_active.alpha);
        assert_eq!(selected.zoom, tuning.item_active.zoom);
        assert_eq!(
            selected.y,
            tuning.vertical_spacing * tuning.active_item_factor
        );

        let passive = world.get::<AnimatedNode>(entries[3]).unwrap();
        assert_eq!(passive.alpha, tuning.item_passive.alpha);
        assert_eq!(passive.label_alpha, tuning.item_passive.alpha);
        assert_eq!(passive.x, 0.0);
    }

    #[test]
    fn retirement_waits_for_exit_tweens_to_settle() {
        let mut world = test_world();
        let entries = spawn_rows(&mut world, 1, 0);
        let exiting = entries[0];

        let label = world.spawn(EntryLabel { owner: exiting }).id();
        world.entity_mut(exiting).insert(ExitingEntry);

        world.resource_mut::<TweenQueue>().animate(
            exiting,
            NodeField::Alpha,
            0.0,
            Duration::from_millis(100),
            EaseFunction::Linear,
        );
        world.run_system_once(apply_tween_requests).unwrap();

        world.run_system_once(retire_exited_entries).unwrap();
        assert!(world.get_entity(exiting).is_ok());

        // Settle the tween, then retirement may proceed.
        world.insert_resource(Time::<()>::default());
        world
            .resource_mut::<Time>()
            .advance_by(Duration::from_millis(200));
        world
            .run_system_once(crate::systems::animation::advance_tweens)
            .unwrap();
        world.run_system_once(retire_exited_entries).unwrap();

        assert!(world.get_entity(exiting).is_err());
        assert!(world.get_entity(label).is_err());
    }
}
