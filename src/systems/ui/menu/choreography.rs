//! Transition choreography for the outgoing (snapshot) and incoming list.
//!
//! Depth transitions use the fade/prime pair; category switches use the
//! slide pair. The snapshot list is independent of the live list, so a
//! swap reads as one continuous motion: old content exits one side while
//! new content enters from the other.
use bevy::prelude::*;

use crate::data::config::NavTuning;
use crate::systems::animation::{NodeField, TweenQueue};

use super::defs::MENU_EASE;
use super::layout;

/// Animates a snapshot list out of a depth transition. The previously
/// selected row keeps its active opacity unless the transition runs
/// backward, where the exit fade overrides selection highlighting.
pub(super) fn fade_out_old(
    queue: &mut TweenQueue,
    tuning: &NavTuning,
    entries: &[Entity],
    direction: i32,
    previous_selection: usize,
) {
    let duration = tuning.transition_duration();

    for (index, &entity) in entries.iter().enumerate() {
        let mut alpha = 0.0;
        if index == previous_selection {
            alpha = tuning.item_active.alpha;
        }
        if direction == -1 {
            alpha = 0.0;
        }

        queue.animate(entity, NodeField::Alpha, alpha, duration, MENU_EASE);
        queue.animate(entity, NodeField::LabelAlpha, 0.0, duration, MENU_EASE);
        queue.animate(
            entity,
            NodeField::X,
            tuning.icon_size * direction as f32 * -2.0,
            duration,
            MENU_EASE,
        );
    }
}

/// Primes an incoming list so its rows materialize already laid out, then
/// animates them to their steady state. No horizontal motion is scheduled
/// on a pure refresh (direction 0).
pub(super) fn prime_new(
    queue: &mut TweenQueue,
    tuning: &NavTuning,
    depth: usize,
    entries: &[Entity],
    direction: i32,
    selection: usize,
) {
    let duration = tuning.transition_duration();

    for (index, &entity) in entries.iter().enumerate() {
        if direction == 1 || (direction == -1 && index != selection) {
            queue.set_now(entity, NodeField::Alpha, 0.0);
        }
        if direction != 0 {
            queue.set_now(entity, NodeField::LabelAlpha, 0.0);
            queue.set_now(
                entity,
                NodeField::X,
                tuning.icon_size * direction as f32 * 2.0,
            );
        }
        queue.set_now(
            entity,
            NodeField::Y,
            layout::entry_row_y(tuning, depth, index, selection),
        );
        if index == selection {
            queue.set_now(entity, NodeField::Zoom, tuning.item_active.zoom);
        }
    }

    for (index, &entity) in entries.iter().enumerate() {
        let style = layout::item_style(tuning, index, selection);
        queue.animate(entity, NodeField::Alpha, style.alpha, duration, MENU_EASE);
        queue.animate(entity, NodeField::LabelAlpha, style.alpha, duration, MENU_EASE);
        if direction != 0 {
            queue.animate(entity, NodeField::X, 0.0, duration, MENU_EASE);
        }
    }
}

/// Animates a snapshot list out of a category switch: everything fades and
/// slides off toward the opposite edge of travel.
pub(super) fn slide_out_old(
    queue: &mut TweenQueue,
    tuning: &NavTuning,
    entries: &[Entity],
    direction: i32,
) {
    let duration = tuning.transition_duration();

    for &entity in entries {
        queue.animate(entity, NodeField::Alpha, 0.0, duration, MENU_EASE);
        queue.animate(entity, NodeField::LabelAlpha, 0.0, duration, MENU_EASE);
        queue.animate(
            entity,
            NodeField::X,
            -tuning.horizontal_spacing * direction as f32,
            duration,
            MENU_EASE,
        );
    }
}

/// Slides an incoming list in from the travel edge of a category switch.
pub(super) fn slide_in_new(
    queue: &mut TweenQueue,
    tuning: &NavTuning,
    entries: &[Entity],
    direction: i32,
    selection: usize,
) {
    let duration = tuning.transition_duration();

    for (index, &entity) in entries.iter().enumerate() {
        queue.set_now(
            entity,
            NodeField::X,
            tuning.horizontal_spacing * direction as f32,
        );
        queue.set_now(entity, NodeField::Alpha, 0.0);
        queue.set_now(entity, NodeField::LabelAlpha, 0.0);

        let alpha = if index == selection {
            tuning.item_active.alpha
        } else {
            tuning.item_passive.alpha
        };
        queue.animate(entity, NodeField::Alpha, alpha, duration, MENU_EASE);
        queue.animate(entity, NodeField::LabelAlpha, alpha, duration, MENU_EASE);
        queue.animate(entity, NodeField::X, 0.0, duration, MENU_EASE);
    }
}
