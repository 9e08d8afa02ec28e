//! Category tab node lifecycle.
//!
//! The track owns the index → node mapping. The root tab's node is spawned
//! with the rig and lives for the whole session; provider tabs allocate
//! their node lazily on first sight of the catalog and reuse it afterwards.
use bevy::app::AppExit;
use bevy::prelude::*;

use crate::data::catalog::ItemCatalog;
use crate::data::config::NavTuning;
use crate::systems::animation::{AnimatedNode, NodeTweens};

use super::defs::{CategoryIcon, CategoryTrack, NavState, TabSlot};

/// Grows or shrinks the tab slots to match the catalog and allocates
/// missing provider nodes. Lookup-before-allocate: replacing a live node
/// would orphan its in-flight tweens.
pub(super) fn ensure_category_nodes(
    mut commands: Commands,
    catalog: Res<ItemCatalog>,
    tuning: Res<NavTuning>,
    nav: Res<NavState>,
    mut track: ResMut<CategoryTrack>,
) {
    if track.tabs.is_empty() {
        // Rig not spawned yet; nothing to attach provider tabs to.
        return;
    }

    let desired = catalog.category_count();

    while track.tabs.len() > desired {
        if let Some(slot) = track.tabs.pop() {
            if let Some(node) = slot.node {
                commands.entity(node).despawn();
            }
        }
    }

    track.tabs[0].display_name.clone_from(&catalog.root_title);

    for category in 1..desired {
        let display_name = catalog
            .display_name(category)
            .unwrap_or_default()
            .to_owned();

        if track.tabs.len() <= category {
            track.tabs.push(TabSlot {
                display_name,
                node: None,
            });
        } else {
            track.tabs[category].display_name = display_name;
        }

        if track.tabs[category].node.is_some() {
            continue;
        }

        let active = category == track.active_index;
        let alpha = if active {
            tuning.category_active.alpha
        } else if nav.depth <= 1 {
            tuning.category_passive.alpha
        } else {
            0.0
        };
        let zoom = if active {
            tuning.category_active.zoom
        } else {
            tuning.category_passive.zoom
        };

        let node = commands
            .spawn((
                CategoryIcon { index: category },
                AnimatedNode {
                    alpha,
                    zoom,
                    ..AnimatedNode::default()
                },
                NodeTweens::default(),
            ))
            .id();
        track.tabs[category].node = Some(node);
    }
}

/// Releases every dynamically allocated tab node exactly once on shutdown.
/// The root tab node is shell-owned and stays.
pub(super) fn release_category_nodes(
    mut commands: Commands,
    mut exit_events: MessageReader<AppExit>,
    mut track: ResMut<CategoryTrack>,
) {
    if exit_events.is_empty() {
        return;
    }
    exit_events.clear();

    for slot in track.tabs.iter_mut().skip(1) {
        if let Some(node) = slot.node.take() {
            commands.entity(node).despawn();
        }
    }
}
