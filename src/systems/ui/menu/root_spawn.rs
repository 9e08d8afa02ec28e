//! Startup spawning of the shell rig and the root category tab.
use bevy::prelude::*;
use bevy::sprite::Anchor;

use crate::data::catalog::ItemCatalog;
use crate::data::config::NavTuning;
use crate::systems::animation::{AnimatedNode, NodeTweens};

use super::defs::{CategoryIcon, CategoryTrack, ShellRig, TabSlot};

const ARROW_COLOR: Color = Color::srgb(0.9, 0.9, 0.95);

pub(super) fn spawn_shell_rig(
    mut commands: Commands,
    catalog: Res<ItemCatalog>,
    tuning: Res<NavTuning>,
    mut track: ResMut<CategoryTrack>,
) {
    commands.spawn(Camera2d);

    // Whole-shell animated scalars, one node entity each.
    let backdrop = commands
        .spawn((
            AnimatedNode {
                alpha: 1.0,
                zoom: 1.0,
                ..AnimatedNode::default()
            },
            NodeTweens::default(),
        ))
        .id();
    let wheel = commands
        .spawn((AnimatedNode::default(), NodeTweens::default()))
        .id();
    let track_node = commands
        .spawn((AnimatedNode::default(), NodeTweens::default()))
        .id();
    let arrow = commands
        .spawn((
            AnimatedNode {
                alpha: 0.0,
                zoom: 1.0,
                ..AnimatedNode::default()
            },
            NodeTweens::default(),
            Sprite::from_color(
                ARROW_COLOR,
                Vec2::new(tuning.icon_size * 0.25, tuning.icon_size * 0.25),
            ),
            Transform::from_xyz(0.0, 0.0, 2.0),
        ))
        .id();

    let title = commands
        .spawn((
            Text2d::default(),
            TextFont::from_font_size(tuning.font_size),
            TextColor(Color::WHITE),
            Anchor::TOP_LEFT,
            Transform::from_xyz(0.0, 0.0, 2.0),
        ))
        .id();

    // The root tab's node is shell-owned for the whole session.
    let root_node = commands
        .spawn((
            CategoryIcon { index: 0 },
            AnimatedNode {
                alpha: tuning.category_active.alpha,
                zoom: tuning.category_active.zoom,
                ..AnimatedNode::default()
            },
            NodeTweens::default(),
        ))
        .id();

    track.tabs = vec![TabSlot {
        display_name: catalog.root_title.clone(),
        node: Some(root_node),
    }];
    track.active_index = 0;
    track.active_index_old = 0;

    commands.insert_resource(ShellRig {
        backdrop,
        wheel,
        track: track_node,
        arrow,
        title,
    });
}
