//! Row offset policy and steady-state node styles.
use crate::data::config::{NavTuning, NodeStyle};

/// Vertical target of row `index` when `selection` is the selected row.
///
/// Rows above the selection compress by the above-item offset (or the
/// above-submenu offset once depth passes the configured threshold); rows
/// below spread by the under-item offset. The selected row is pinned to
/// `vertical_spacing * active_item_factor` regardless of index.
pub(super) fn entry_row_y(
    tuning: &NavTuning,
    depth: usize,
    index: usize,
    selection: usize,
) -> f32 {
    if index == selection {
        return tuning.vertical_spacing * tuning.active_item_factor;
    }

    let delta = index as f32 - selection as f32;
    let offset = if index < selection {
        if depth > tuning.submenu_depth_threshold {
            tuning.above_subitem_offset
        } else {
            tuning.above_item_offset
        }
    } else {
        tuning.under_item_offset
    };

    tuning.vertical_spacing * (delta + offset)
}

pub(super) fn item_style(tuning: &NavTuning, index: usize, selection: usize) -> NodeStyle {
    if index == selection {
        tuning.item_active
    } else {
        tuning.item_passive
    }
}

pub(super) fn category_style(tuning: &NavTuning, index: usize, active_index: usize) -> NodeStyle {
    if index == active_index {
        tuning.category_active
    } else {
        tuning.category_passive
    }
}
