//! Cross-media-bar shell: a depth stack of lists crossed with a horizontal
//! category track, every transition animated per node.
//!
//! This module owns navigation policy and animation orchestration while
//! delegating field tweening to `systems::animation`. Submodules split the
//! usual way: `defs` for data, `navigation` for the state machine,
//! `choreography` for the outgoing/incoming list helpers, `categories` and
//! `page_content` for node lifecycle, `menu_input` for model mutation,
//! `view` for the demo presentation.
use std::path::Path;

use bevy::prelude::*;
use smallvec::SmallVec;

use crate::data::catalog::ItemCatalog;
use crate::data::config::{self, NavTuning};
use crate::systems::animation::{AnimationPlugin, AnimationSystems, TweenQueue};

mod categories;
mod choreography;
mod defs;
mod layout;
mod menu_input;
mod navigation;
mod page_content;
mod root_spawn;
mod view;

pub use defs::{
    CategoryIcon, CategoryTrack, CurrentTitle, MenuEntry, MenuLevel, MenuStack, NavAction,
    NavState, PopulateMenu, SelectionChanged, ShellRig, ShellToggled, ShellVisibility,
    SnapshotFrame, TransitionSnapshot,
};

use defs::*;
use navigation::NavContext;

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub enum ShellSystems {
    Input,
    Navigate,
    Visual,
}

pub struct ShellPlugin;

impl Plugin for ShellPlugin {
    fn build(&self, app: &mut App) {
        if !app.is_plugin_added::<AnimationPlugin>() {
            app.add_plugins(AnimationPlugin);
        }

        if !app.world().contains_resource::<NavTuning>() {
            app.insert_resource(NavTuning::load_or_default(Path::new(
                "assets/shell_tuning.json",
            )));
        }
        if !app.world().contains_resource::<ItemCatalog>() {
            app.insert_resource(ItemCatalog::load_or_demo(Path::new(
                "assets/shell_catalog.json",
            )));
        }

        app.init_resource::<MenuStack>()
            .init_resource::<CategoryTrack>()
            .init_resource::<NavState>()
            .init_resource::<ShellVisibility>()
            .init_resource::<CurrentTitle>()
            .init_resource::<TransitionSnapshot>()
            .add_message::<NavAction>()
            .add_message::<SelectionChanged>()
            .add_message::<PopulateMenu>()
            .add_message::<ShellToggled>()
            .configure_sets(
                Update,
                (
                    ShellSystems::Input,
                    ShellSystems::Navigate,
                    AnimationSystems,
                    ShellSystems::Visual,
                )
                    .chain(),
            )
            .add_systems(
                Startup,
                (
                    root_spawn::spawn_shell_rig,
                    apply_scale_ladder,
                    categories::ensure_category_nodes,
                    initialize_first_level,
                )
                    .chain(),
            )
            .add_systems(
                Update,
                (
                    menu_input::handle_menu_shortcuts,
                    menu_input::update_pointer_hover,
                    menu_input::apply_nav_actions,
                )
                    .chain()
                    .in_set(ShellSystems::Input),
            )
            .add_systems(
                Update,
                (
                    categories::ensure_category_nodes
                        .run_if(resource_changed::<ItemCatalog>),
                    handle_shell_toggles,
                    populate_menu,
                    selection_changed,
                )
                    .chain()
                    .in_set(ShellSystems::Navigate),
            )
            .add_systems(
                Update,
                (
                    page_content::retire_exited_entries,
                    categories::release_category_nodes,
                    view::attach_entry_visuals,
                    view::attach_category_visuals,
                    view::sync_entry_visuals,
                    view::sync_entry_labels,
                    view::sync_category_visuals,
                    view::sync_arrow_visuals,
                    view::sync_title_text,
                )
                    .in_set(ShellSystems::Visual),
            );
    }
}

/// Rescales the pixel-denominated tuning once the primary window exists.
fn apply_scale_ladder(
    windows: Query<&Window, With<bevy::window::PrimaryWindow>>,
    mut tuning: ResMut<NavTuning>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    let factor = config::scale_for_width(window.width());
    if factor != 1.0 {
        let scaled = tuning.scaled(factor);
        *tuning = scaled;
    }
}

/// Builds the root category's top level and raises the first populate.
fn initialize_first_level(
    mut commands: Commands,
    catalog: Res<ItemCatalog>,
    tuning: Res<NavTuning>,
    mut stack: ResMut<MenuStack>,
    mut populate_events: MessageWriter<PopulateMenu>,
) {
    let rows = catalog.entries_at(0, &[]).unwrap_or(&[]);
    let entries = page_content::spawn_level_entries(&mut commands, &tuning, rows, 1, 0);
    stack.reset(MenuLevel {
        title: catalog.root_title.clone(),
        path: SmallVec::new(),
        selection: 0,
        entries,
    });
    populate_events.write(PopulateMenu);
}

fn handle_shell_toggles(
    mut toggle_events: MessageReader<ShellToggled>,
    stack: Res<MenuStack>,
    mut track: ResMut<CategoryTrack>,
    mut nav: ResMut<NavState>,
    tuning: Res<NavTuning>,
    rig: Option<Res<ShellRig>>,
    mut queue: ResMut<TweenQueue>,
) {
    if toggle_events.is_empty() {
        return;
    }
    let Some(rig) = rig else {
        toggle_events.clear();
        return;
    };

    for toggle in toggle_events.read() {
        let mut ctx = NavContext {
            stack: &stack,
            track: &mut track,
            nav: &mut nav,
            tuning: &tuning,
            rig: &rig,
            queue: &mut queue,
        };
        navigation::toggle_visibility(&mut ctx, toggle.visible, toggle.needs_refresh);
    }
}

fn populate_menu(
    mut populate_events: MessageReader<PopulateMenu>,
    stack: Res<MenuStack>,
    mut track: ResMut<CategoryTrack>,
    mut nav: ResMut<NavState>,
    tuning: Res<NavTuning>,
    rig: Option<Res<ShellRig>>,
    mut queue: ResMut<TweenQueue>,
    mut snapshot: ResMut<TransitionSnapshot>,
    mut title: ResMut<CurrentTitle>,
    catalog: Res<ItemCatalog>,
) {
    if populate_events.is_empty() {
        return;
    }
    let Some(rig) = rig else {
        populate_events.clear();
        return;
    };

    for _ in populate_events.read() {
        let outgoing = snapshot
            .take()
            .unwrap_or_else(|| SnapshotFrame::empty(track.active_index));
        let mut ctx = NavContext {
            stack: &stack,
            track: &mut track,
            nav: &mut nav,
            tuning: &tuning,
            rig: &rig,
            queue: &mut queue,
        };
        navigation::populate(&mut ctx, outgoing, &catalog, &mut title);
    }
}

fn selection_changed(
    mut selection_events: MessageReader<SelectionChanged>,
    stack: Res<MenuStack>,
    mut track: ResMut<CategoryTrack>,
    mut nav: ResMut<NavState>,
    tuning: Res<NavTuning>,
    rig: Option<Res<ShellRig>>,
    mut queue: ResMut<TweenQueue>,
) {
    if selection_events.is_empty() {
        return;
    }
    selection_events.clear();
    let Some(rig) = rig else {
        return;
    };

    // Re-targeting is idempotent, so coalescing several moves per frame
    // into one pass is safe.
    let mut ctx = NavContext {
        stack: &stack,
        track: &mut track,
        nav: &mut nav,
        tuning: &tuning,
        rig: &rig,
        queue: &mut queue,
    };
    navigation::selection_pointer_changed(&mut ctx);
}
