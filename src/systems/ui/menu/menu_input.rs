//! Input handling and the model mutations behind each navigation event.
//!
//! Shortcuts and pointer hover only emit `NavAction`s; `apply_nav_actions`
//! owns every mutation of the stack and track, stashes the outgoing
//! snapshot before a transition, and raises the populate/selection
//! messages the state machine consumes.
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use smallvec::SmallVec;

use crate::data::catalog::ItemCatalog;
use crate::data::config::NavTuning;

use super::defs::{
    CategoryTrack, MenuLevel, MenuStack, NavAction, PopulateMenu, SelectionChanged, ShellToggled,
    ShellVisibility, SnapshotFrame, TransitionSnapshot,
};
use super::layout;
use super::page_content;

pub(super) fn handle_menu_shortcuts(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut actions: MessageWriter<NavAction>,
) {
    if keyboard.just_pressed(KeyCode::Escape) {
        actions.write(NavAction::ToggleShell);
    }
    if keyboard.just_pressed(KeyCode::ArrowUp) {
        actions.write(NavAction::MoveUp);
    }
    if keyboard.just_pressed(KeyCode::ArrowDown) {
        actions.write(NavAction::MoveDown);
    }
    if keyboard.just_pressed(KeyCode::ArrowLeft) {
        actions.write(NavAction::CategoryLeft);
    }
    if keyboard.just_pressed(KeyCode::ArrowRight) {
        actions.write(NavAction::CategoryRight);
    }
    if keyboard.just_pressed(KeyCode::Enter) {
        actions.write(NavAction::Enter);
    }
    if keyboard.just_pressed(KeyCode::Backspace) {
        actions.write(NavAction::Back);
    }
}

/// Maps the cursor's vertical position through the row offset policy to a
/// hovered row and moves the selection there.
pub(super) fn update_pointer_hover(
    windows: Query<&Window, With<PrimaryWindow>>,
    visibility: Res<ShellVisibility>,
    stack: Res<MenuStack>,
    tuning: Res<NavTuning>,
    mut actions: MessageWriter<NavAction>,
) {
    if !visibility.visible {
        return;
    }
    let Ok(window) = windows.single() else {
        return;
    };
    let Some(cursor) = window.cursor_position() else {
        return;
    };
    let Some(level) = stack.top() else {
        return;
    };

    let depth = stack.depth();
    for index in 0..level.entries.len() {
        let row_top =
            tuning.screen_margin_top + layout::entry_row_y(&tuning, depth, index, level.selection);
        if cursor.y > row_top
            && cursor.y < row_top + tuning.icon_size
            && index != level.selection
        {
            actions.write(NavAction::SetSelection(index));
        }
    }
}

fn snapshot_of(level: &MenuLevel, category_selection: usize) -> SnapshotFrame {
    SnapshotFrame {
        entries: level.entries.clone(),
        selection: level.selection,
        category_selection,
    }
}

pub(super) fn apply_nav_actions(
    mut commands: Commands,
    mut actions: MessageReader<NavAction>,
    mut stack: ResMut<MenuStack>,
    mut track: ResMut<CategoryTrack>,
    mut snapshot: ResMut<TransitionSnapshot>,
    mut visibility: ResMut<ShellVisibility>,
    catalog: Res<ItemCatalog>,
    tuning: Res<NavTuning>,
    mut selection_events: MessageWriter<SelectionChanged>,
    mut populate_events: MessageWriter<PopulateMenu>,
    mut toggle_events: MessageWriter<ShellToggled>,
) {
    for action in actions.read() {
        match *action {
            NavAction::ToggleShell => {
                visibility.visible = !visibility.visible;
                toggle_events.write(ShellToggled {
                    visible: visibility.visible,
                    needs_refresh: false,
                });
            }
            _ if !visibility.visible => {}
            NavAction::MoveUp | NavAction::MoveDown => {
                let Some(level) = stack.top_mut() else {
                    continue;
                };
                let count = level.entries.len();
                if count == 0 {
                    continue;
                }
                level.selection = if matches!(*action, NavAction::MoveUp) {
                    (level.selection + count - 1) % count
                } else {
                    (level.selection + 1) % count
                };
                selection_events.write(SelectionChanged);
            }
            NavAction::SetSelection(index) => {
                let Some(level) = stack.top_mut() else {
                    continue;
                };
                if index < level.entries.len() && level.selection != index {
                    level.selection = index;
                    selection_events.write(SelectionChanged);
                }
            }
            NavAction::Enter => {
                let category = track.active_index;
                let (path, title, outgoing) = {
                    let Some(level) = stack.top() else {
                        continue;
                    };
                    let Some(entry) = catalog.entry_at(category, &level.path, level.selection)
                    else {
                        continue;
                    };
                    if entry.children.is_empty() {
                        info!("activated entry {:?}", entry.label);
                        continue;
                    }
                    let mut path = level.path.clone();
                    path.push(level.selection);
                    (path, entry.label.clone(), snapshot_of(level, category))
                };

                page_content::mark_exiting(&mut commands, &outgoing.entries);
                snapshot.stash(outgoing);

                let depth = stack.depth() + 1;
                let rows = catalog.entries_at(category, &path).unwrap_or(&[]);
                let entries =
                    page_content::spawn_level_entries(&mut commands, &tuning, rows, depth, 0);
                stack.push(MenuLevel {
                    title,
                    path,
                    selection: 0,
                    entries,
                });
                populate_events.write(PopulateMenu);
            }
            NavAction::Back => {
                if stack.depth() <= 1 {
                    continue;
                }
                if let Some(level) = stack.top() {
                    let outgoing = snapshot_of(level, track.active_index);
                    page_content::mark_exiting(&mut commands, &outgoing.entries);
                    snapshot.stash(outgoing);
                }
                stack.pop();

                // The restored level's rows were retired when it was covered;
                // rebuild them around the remembered selection.
                let depth = stack.depth();
                let category = track.active_index;
                if let Some(level) = stack.top_mut() {
                    let rows = catalog.entries_at(category, &level.path).unwrap_or(&[]);
                    level.entries = page_content::spawn_level_entries(
                        &mut commands,
                        &tuning,
                        rows,
                        depth,
                        level.selection,
                    );
                }
                populate_events.write(PopulateMenu);
            }
            NavAction::CategoryLeft | NavAction::CategoryRight => {
                // Horizontal motion only exists on the surface level.
                if stack.depth() != 1 {
                    continue;
                }
                let count = track.tab_count();
                if count == 0 {
                    continue;
                }
                let target = if matches!(*action, NavAction::CategoryRight) {
                    (track.active_index + 1).min(count - 1)
                } else {
                    track.active_index.saturating_sub(1)
                };
                if target == track.active_index {
                    continue;
                }

                if let Some(level) = stack.top() {
                    let outgoing = snapshot_of(level, track.active_index);
                    page_content::mark_exiting(&mut commands, &outgoing.entries);
                    snapshot.stash(outgoing);
                }
                track.active_index = target;

                let title = catalog.display_name(target).unwrap_or_default().to_owned();
                let rows = catalog.entries_at(target, &[]).unwrap_or(&[]);
                let entries =
                    page_content::spawn_level_entries(&mut commands, &tuning, rows, 1, 0);
                stack.reset(MenuLevel {
                    title,
                    path: SmallVec::new(),
                    selection: 0,
                    entries,
                });
                populate_events.write(PopulateMenu);
            }
        }
    }
}
