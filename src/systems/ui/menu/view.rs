//! Demo rendering collaborator.
//!
//! Mirrors animated node fields into placeholder sprites and labels once
//! per frame. This layer only reads node state; the scheduler is the sole
//! writer of animated fields.
use bevy::prelude::*;
use bevy::sprite::Anchor;
use bevy::window::PrimaryWindow;

use crate::data::config::NavTuning;
use crate::systems::animation::AnimatedNode;

use super::defs::{CategoryIcon, CurrentTitle, EntryLabel, MenuEntry, ShellRig};

const ENTRY_COLOR: Color = Color::srgb(0.75, 0.8, 0.9);
const TAB_COLOR: Color = Color::srgb(0.55, 0.65, 0.9);

/// Converts top-left screen coordinates into world space.
fn screen_to_world(window: &Window, sx: f32, sy: f32, z: f32) -> Vec3 {
    Vec3::new(sx - window.width() / 2.0, window.height() / 2.0 - sy, z)
}

fn master_alpha(nodes: &Query<&AnimatedNode>, rig: &ShellRig) -> f32 {
    nodes.get(rig.backdrop).map(|node| node.alpha).unwrap_or(1.0)
}

pub(super) fn attach_entry_visuals(
    mut commands: Commands,
    tuning: Res<NavTuning>,
    new_entries: Query<(Entity, &MenuEntry), Added<MenuEntry>>,
) {
    for (entity, entry) in new_entries.iter() {
        commands.entity(entity).try_insert((
            Sprite::from_color(ENTRY_COLOR, Vec2::splat(tuning.icon_size * 0.5)),
            Transform::from_xyz(0.0, 0.0, 1.0),
        ));
        commands.spawn((
            EntryLabel { owner: entity },
            Text2d::new(entry.label.clone()),
            TextFont::from_font_size(tuning.font_size * 0.6),
            TextColor(Color::WHITE),
            Anchor::CENTER_LEFT,
            Transform::from_xyz(0.0, 0.0, 1.0),
        ));
    }
}

pub(super) fn attach_category_visuals(
    mut commands: Commands,
    tuning: Res<NavTuning>,
    new_tabs: Query<Entity, Added<CategoryIcon>>,
) {
    for entity in new_tabs.iter() {
        commands.entity(entity).try_insert((
            Sprite::from_color(TAB_COLOR, Vec2::splat(tuning.icon_size * 0.6)),
            Transform::from_xyz(0.0, 0.0, 1.5),
        ));
    }
}

pub(super) fn sync_entry_visuals(
    tuning: Res<NavTuning>,
    windows: Query<&Window, With<PrimaryWindow>>,
    rig: Option<Res<ShellRig>>,
    nodes: Query<&AnimatedNode>,
    mut entries: Query<(&AnimatedNode, &mut Transform, &mut Sprite), With<MenuEntry>>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    let Some(rig) = rig else {
        return;
    };
    let master = master_alpha(&nodes, &rig);

    for (node, mut transform, mut sprite) in entries.iter_mut() {
        let sx = node.x + tuning.screen_margin_left + tuning.horizontal_spacing;
        let sy = tuning.screen_margin_top + node.y;
        transform.translation = screen_to_world(window, sx, sy, 1.0);
        transform.scale = Vec3::splat(node.zoom.max(0.0));
        sprite.color = sprite.color.with_alpha(node.alpha * master);
    }
}

pub(super) fn sync_entry_labels(
    tuning: Res<NavTuning>,
    windows: Query<&Window, With<PrimaryWindow>>,
    rig: Option<Res<ShellRig>>,
    nodes: Query<&AnimatedNode>,
    mut labels: Query<(&EntryLabel, &mut Transform, &mut TextColor), Without<MenuEntry>>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    let Some(rig) = rig else {
        return;
    };
    let master = master_alpha(&nodes, &rig);

    for (label, mut transform, mut color) in labels.iter_mut() {
        // Owner already retired: leave the label for the retire pass.
        let Ok(node) = nodes.get(label.owner) else {
            continue;
        };
        let sx = node.x
            + tuning.screen_margin_left
            + tuning.horizontal_spacing
            + tuning.label_margin_left;
        let sy = tuning.screen_margin_top + node.y;
        transform.translation = screen_to_world(window, sx, sy, 1.0);
        color.0 = color.0.with_alpha(node.label_alpha * master);
    }
}

pub(super) fn sync_category_visuals(
    tuning: Res<NavTuning>,
    windows: Query<&Window, With<PrimaryWindow>>,
    rig: Option<Res<ShellRig>>,
    nodes: Query<&AnimatedNode>,
    mut tabs: Query<(&CategoryIcon, &AnimatedNode, &mut Transform, &mut Sprite)>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    let Some(rig) = rig else {
        return;
    };
    let master = master_alpha(&nodes, &rig);
    let wheel_x = nodes.get(rig.wheel).map(|node| node.x).unwrap_or(0.0);
    let track_x = nodes.get(rig.track).map(|node| node.x).unwrap_or(0.0);

    for (icon, node, mut transform, mut sprite) in tabs.iter_mut() {
        let sx = wheel_x
            + track_x
            + tuning.screen_margin_left
            + tuning.horizontal_spacing * (icon.index as f32 + 1.0);
        let sy = tuning.screen_margin_top - tuning.icon_size / 2.0;
        transform.translation = screen_to_world(window, sx, sy, 1.5);
        transform.scale = Vec3::splat(node.zoom.max(0.0));
        sprite.color = sprite.color.with_alpha(node.alpha * master);
    }
}

pub(super) fn sync_arrow_visuals(
    tuning: Res<NavTuning>,
    windows: Query<&Window, With<PrimaryWindow>>,
    rig: Option<Res<ShellRig>>,
    nodes: Query<&AnimatedNode>,
    mut sprites: Query<(&mut Transform, &mut Sprite)>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    let Some(rig) = rig else {
        return;
    };
    let master = master_alpha(&nodes, &rig);
    let wheel_x = nodes.get(rig.wheel).map(|node| node.x).unwrap_or(0.0);
    let Ok(arrow) = nodes.get(rig.arrow) else {
        return;
    };
    let Ok((mut transform, mut sprite)) = sprites.get_mut(rig.arrow) else {
        return;
    };

    let sx = wheel_x
        + tuning.screen_margin_left
        + tuning.horizontal_spacing
        + tuning.icon_size / 2.0;
    let sy = tuning.screen_margin_top
        + tuning.vertical_spacing * tuning.active_item_factor;
    transform.translation = screen_to_world(window, sx, sy, 2.0);
    sprite.color = sprite.color.with_alpha(arrow.alpha * master);
}

pub(super) fn sync_title_text(
    tuning: Res<NavTuning>,
    windows: Query<&Window, With<PrimaryWindow>>,
    rig: Option<Res<ShellRig>>,
    title: Res<CurrentTitle>,
    nodes: Query<&AnimatedNode>,
    mut texts: Query<(&mut Text2d, &mut Transform, &mut TextColor)>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    let Some(rig) = rig else {
        return;
    };
    let Ok((mut text, mut transform, mut color)) = texts.get_mut(rig.title) else {
        return;
    };

    if title.is_changed() {
        text.0.clone_from(&title.0);
    }
    transform.translation =
        screen_to_world(window, tuning.title_margin_left, tuning.title_margin_top, 2.0);
    color.0 = color.0.with_alpha(master_alpha(&nodes, &rig));
}
