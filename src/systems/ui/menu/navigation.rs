//! The navigation state machine.
//!
//! Every operation reads and writes exactly one live navigation context,
//! passed in explicitly. Operations only emit tween requests; they never
//! write animated fields themselves. Missing context, absent nodes, and
//! out-of-range indices all degrade to skipped animations, never errors.
use bevy::prelude::*;

use crate::data::catalog::ItemCatalog;
use crate::data::config::NavTuning;
use crate::systems::animation::{NodeField, TweenQueue};

use super::choreography;
use super::defs::{CategoryTrack, CurrentTitle, MenuStack, NavState, ShellRig, SnapshotFrame, MENU_EASE};
use super::layout;

pub(super) struct NavContext<'a> {
    pub stack: &'a MenuStack,
    pub track: &'a mut CategoryTrack,
    pub nav: &'a mut NavState,
    pub tuning: &'a NavTuning,
    pub rig: &'a ShellRig,
    pub queue: &'a mut TweenQueue,
}

/// Reflows the current list after the selection pointer moved: every row
/// re-targets its opacity, label opacity, zoom and vertical offset.
pub(super) fn selection_pointer_changed(ctx: &mut NavContext) {
    let Some(level) = ctx.stack.top() else {
        return;
    };
    let depth = ctx.stack.depth();
    let duration = ctx.tuning.transition_duration();

    for (index, &entity) in level.entries.iter().enumerate() {
        let style = layout::item_style(ctx.tuning, index, level.selection);
        let row_y = layout::entry_row_y(ctx.tuning, depth, index, level.selection);

        ctx.queue
            .animate(entity, NodeField::Alpha, style.alpha, duration, MENU_EASE);
        ctx.queue
            .animate(entity, NodeField::LabelAlpha, style.alpha, duration, MENU_EASE);
        ctx.queue
            .animate(entity, NodeField::Zoom, style.zoom, duration, MENU_EASE);
        ctx.queue
            .animate(entity, NodeField::Y, row_y, duration, MENU_EASE);
    }
}

/// Runs after the top of the depth stack was replaced (submenu entered or
/// left). Direction comes from the depth comparison, not from any
/// selection pointer.
pub(super) fn list_open_transition(ctx: &mut NavContext, outgoing: &SnapshotFrame) {
    ctx.nav.depth = ctx.stack.depth();

    let depth_direction = if ctx.nav.depth > ctx.nav.old_depth {
        1
    } else if ctx.nav.depth < ctx.nav.old_depth {
        -1
    } else {
        0
    };

    let duration = ctx.tuning.transition_duration();

    for (index, slot) in ctx.track.tabs.iter().enumerate() {
        let Some(node) = slot.node else {
            continue;
        };
        let alpha = if index == ctx.track.active_index {
            ctx.tuning.category_active.alpha
        } else if ctx.nav.depth <= 1 {
            ctx.tuning.category_passive.alpha
        } else {
            0.0
        };
        ctx.queue
            .animate(node, NodeField::Alpha, alpha, duration, MENU_EASE);
    }

    // The snapshot exits before the live list is primed; it was copied out
    // at the start of the transition and must not observe the new list.
    choreography::fade_out_old(
        ctx.queue,
        ctx.tuning,
        &outgoing.entries,
        depth_direction,
        outgoing.selection,
    );
    if let Some(level) = ctx.stack.top() {
        choreography::prime_new(
            ctx.queue,
            ctx.tuning,
            ctx.nav.depth,
            &level.entries,
            depth_direction,
            level.selection,
        );
    }

    match ctx.nav.depth {
        1 | 2 => {
            let wheel_x = ctx.tuning.icon_size * -((ctx.nav.depth as f32) * 2.0 - 2.0);
            ctx.queue
                .animate(ctx.rig.wheel, NodeField::X, wheel_x, duration, MENU_EASE);

            let arrow_alpha = if ctx.nav.depth > 1 { 1.0 } else { 0.0 };
            ctx.queue
                .animate(ctx.rig.arrow, NodeField::Alpha, arrow_alpha, duration, MENU_EASE);
        }
        _ => {}
    }

    ctx.nav.old_depth = ctx.nav.depth;
}

/// Runs when the active category changed. Direction comes from the
/// category selection pointers, a deliberately different signal from the
/// depth comparison above.
pub(super) fn category_switch_transition(ctx: &mut NavContext, outgoing: &SnapshotFrame) {
    let category_direction = if ctx.track.active_index > outgoing.category_selection {
        1
    } else {
        -1
    };

    let duration = ctx.tuning.transition_duration();

    for (index, slot) in ctx.track.tabs.iter().enumerate() {
        let Some(node) = slot.node else {
            continue;
        };
        let style = layout::category_style(ctx.tuning, index, ctx.track.active_index);
        ctx.queue
            .animate(node, NodeField::Alpha, style.alpha, duration, MENU_EASE);
        ctx.queue
            .animate(node, NodeField::Zoom, style.zoom, duration, MENU_EASE);
    }

    ctx.queue.animate(
        ctx.rig.track,
        NodeField::X,
        -(ctx.tuning.horizontal_spacing * ctx.track.active_index as f32),
        duration,
        MENU_EASE,
    );

    choreography::slide_out_old(ctx.queue, ctx.tuning, &outgoing.entries, category_direction);
    if let Some(level) = ctx.stack.top() {
        choreography::slide_in_new(
            ctx.queue,
            ctx.tuning,
            &level.entries,
            category_direction,
            level.selection,
        );
    }

    ctx.track.active_index_old = ctx.track.active_index;
}

fn refresh_title(
    stack: &MenuStack,
    track: &CategoryTrack,
    catalog: &ItemCatalog,
    title: &mut CurrentTitle,
) {
    if track.active_index == 0 {
        if let Some(level) = stack.top() {
            title.0.clone_from(&level.title);
        }
    } else if let Some(name) = catalog.display_name(track.active_index) {
        title.0 = name.to_owned();
    }
}

/// Single entry point for list refreshes. A one-shot suppression (armed
/// when the shell becomes visible without new content) swallows the next
/// populate entirely; otherwise the event dispatches to a category switch
/// or a depth transition.
pub(super) fn populate(
    ctx: &mut NavContext,
    outgoing: SnapshotFrame,
    catalog: &ItemCatalog,
    title: &mut CurrentTitle,
) {
    if ctx.nav.take_suppress_once() {
        return;
    }

    refresh_title(ctx.stack, ctx.track, catalog, title);

    if ctx.track.active_index != ctx.track.active_index_old {
        category_switch_transition(ctx, &outgoing);
    } else {
        list_open_transition(ctx, &outgoing);
    }
}

/// Shell shown/hidden. Hiding cuts the master fade instantly; showing
/// fades it back in, arms the populate suppression when no refresh is
/// pending, and snaps every tab node to its steady banded value.
pub(super) fn toggle_visibility(ctx: &mut NavContext, visible: bool, needs_refresh: bool) {
    ctx.nav.depth = ctx.stack.depth();

    if !visible {
        ctx.queue.set_now(ctx.rig.backdrop, NodeField::Alpha, 0.0);
        return;
    }

    ctx.queue.animate(
        ctx.rig.backdrop,
        NodeField::Alpha,
        1.0,
        ctx.tuning.transition_duration(),
        MENU_EASE,
    );

    if !needs_refresh {
        ctx.nav.suppress_next_populate();
    }

    for (index, slot) in ctx.track.tabs.iter().enumerate() {
        let Some(node) = slot.node else {
            continue;
        };
        let active = index == ctx.track.active_index;
        let alpha = if active {
            ctx.tuning.category_active.alpha
        } else if ctx.nav.depth <= 1 {
            ctx.tuning.category_passive.alpha
        } else {
            0.0
        };
        let zoom = if active {
            ctx.tuning.category_active.zoom
        } else {
            ctx.tuning.category_passive.zoom
        };
        ctx.queue.set_now(node, NodeField::Alpha, alpha);
        ctx.queue.set_now(node, NodeField::Zoom, zoom);
    }
}

#[cfg(test)]
mod tests {
    use bevy::prelude::*;
    use smallvec::SmallVec;

    use crate::systems::animation::TweenRequest;

    use super::super::defs::{MenuLevel, TabSlot};
    use super::*;

    struct Fixture {
        world: World,
        stack: MenuStack,
        track: CategoryTrack,
        nav: NavState,
        tuning: NavTuning,
        rig: ShellRig,
        queue: TweenQueue,
    }

    impl Fixture {
        fn new() -> Self {
            let mut world = World::new();
            let rig = ShellRig {
                backdrop: world.spawn_empty().id(),
                wheel: world.spawn_empty().id(),
                track: world.spawn_empty().id(),
                arrow: world.spawn_empty().id(),
                title: world.spawn_empty().id(),
            };
            Self {
                world,
                stack: MenuStack::default(),
                track: CategoryTrack::default(),
                nav: NavState::default(),
                tuning: NavTuning::default(),
                rig,
                queue: TweenQueue::default(),
            }
        }

        fn level(&mut self, count: usize, selection: usize, title: &str) -> MenuLevel {
            let entries = (0..count).map(|_| self.world.spawn_empty().id()).collect();
            MenuLevel {
                title: title.to_owned(),
                path: SmallVec::new(),
                selection,
                entries,
            }
        }

        fn tab(&mut self, name: &str) -> TabSlot {
            TabSlot {
                display_name: name.to_owned(),
                node: Some(self.world.spawn_empty().id()),
            }
        }

        fn ctx(&mut self) -> NavContext<'_> {
            NavContext {
                stack: &self.stack,
                track: &mut self.track,
                nav: &mut self.nav,
                tuning: &self.tuning,
                rig: &self.rig,
                queue: &mut self.queue,
            }
        }
    }

    fn last_end(queue: &TweenQueue, target: Entity, field: NodeField) -> Option<f32> {
        queue
            .requests()
            .iter()
            .rev()
            .find(|request| request.target == target && request.field == field)
            .map(|request| request.end)
    }

    fn requests_for(queue: &TweenQueue, target: Entity, field: NodeField) -> Vec<TweenRequest> {
        queue
            .requests()
            .iter()
            .copied()
            .filter(|request| request.target == target && request.field == field)
            .collect()
    }

    #[test]
    fn operations_are_noops_without_a_live_context() {
        let mut fixture = Fixture::new();

        selection_pointer_changed(&mut fixture.ctx());
        assert!(fixture.queue.is_empty());

        let outgoing = SnapshotFrame::empty(0);
        list_open_transition(&mut fixture.ctx(), &outgoing);
        // Only the camera band for depth 0..=2 could fire; an empty stack
        // has depth 0, outside both bands, so nothing is scheduled.
        assert!(fixture.queue.is_empty());
    }

    #[test]
    fn selection_change_pins_the_selected_row_and_is_idempotent() {
        let mut fixture = Fixture::new();
        let level = fixture.level(4, 2, "root");
        let selected = level.entries[2];
        fixture.stack.reset(level);

        selection_pointer_changed(&mut fixture.ctx());
        let first: Vec<TweenRequest> = fixture.queue.requests().to_vec();
        assert_eq!(
            last_end(&fixture.queue, selected, NodeField::Y),
            Some(fixture.tuning.vertical_spacing * fixture.tuning.active_item_factor)
        );
        assert_eq!(
            last_end(&fixture.queue, selected, NodeField::Alpha),
            Some(fixture.tuning.item_active.alpha)
        );

        fixture.queue.clear();
        selection_pointer_changed(&mut fixture.ctx());
        assert_eq!(fixture.queue.requests(), first.as_slice());
    }

    #[test]
    fn depth_direction_signs_follow_the_depth_comparison() {
        // Push: depth 1 -> 2 gives direction +1.
        let mut fixture = Fixture::new();
        let root = fixture.level(3, 1, "root");
        let old_entries = root.entries.clone();
        fixture.stack.reset(root);
        let sub = fixture.level(2, 0, "sub");
        fixture.stack.push(sub);

        let outgoing = SnapshotFrame {
            entries: old_entries.clone(),
            selection: 1,
            category_selection: 0,
        };
        list_open_transition(&mut fixture.ctx(), &outgoing);

        assert_eq!(
            last_end(&fixture.queue, old_entries[0], NodeField::X),
            Some(fixture.tuning.icon_size * -2.0)
        );
        assert_eq!(fixture.nav.old_depth, 2);

        // Pop: depth 2 -> 1 gives direction -1; the outgoing rows are
        // pushed toward the opposite edge.
        let mut fixture = Fixture::new();
        let root = fixture.level(3, 1, "root");
        fixture.stack.reset(root);
        fixture.nav.depth = 2;
        fixture.nav.old_depth = 2;
        let sub_entries: Vec<Entity> =
            (0..2).map(|_| fixture.world.spawn_empty().id()).collect();

        let outgoing = SnapshotFrame {
            entries: sub_entries.clone(),
            selection: 0,
            category_selection: 0,
        };
        list_open_transition(&mut fixture.ctx(), &outgoing);

        assert_eq!(
            last_end(&fixture.queue, sub_entries[0], NodeField::X),
            Some(fixture.tuning.icon_size * 2.0)
        );
        assert_eq!(
            last_end(&fixture.queue, sub_entries[0], NodeField::Alpha),
            Some(0.0)
        );
        assert_eq!(fixture.nav.old_depth, 1);
    }

    #[test]
    fn equal_depths_schedule_no_horizontal_slide() {
        let mut fixture = Fixture::new();
        let root = fixture.level(3, 0, "root");
        let entries = root.entries.clone();
        fixture.stack.reset(root);

        let outgoing = SnapshotFrame::empty(0);
        list_open_transition(&mut fixture.ctx(), &outgoing);

        for &entity in &entries {
            assert!(requests_for(&fixture.queue, entity, NodeField::X).is_empty());
        }
    }

    #[test]
    fn depth_bands_drive_the_camera_and_arrow() {
        let mut fixture = Fixture::new();
        let root = fixture.level(2, 0, "root");
        fixture.stack.reset(root);
        let sub = fixture.level(2, 0, "sub");
        fixture.stack.push(sub);

        let outgoing = SnapshotFrame::empty(0);
        list_open_transition(&mut fixture.ctx(), &outgoing);

        assert_eq!(
            last_end(&fixture.queue, fixture.rig.wheel, NodeField::X),
            Some(fixture.tuning.icon_size * -2.0)
        );
        assert_eq!(
            last_end(&fixture.queue, fixture.rig.arrow, NodeField::Alpha),
            Some(1.0)
        );

        // A third level leaves the camera and arrow untouched.
        let deeper = fixture.level(2, 0, "deeper");
        fixture.stack.push(deeper);
        fixture.queue.clear();
        let outgoing = SnapshotFrame::empty(0);
        list_open_transition(&mut fixture.ctx(), &outgoing);

        assert_eq!(last_end(&fixture.queue, fixture.rig.wheel, NodeField::X), None);
        assert_eq!(
            last_end(&fixture.queue, fixture.rig.arrow, NodeField::Alpha),
            None
        );
    }

    #[test]
    fn passive_tabs_fade_out_below_the_surface_level() {
        let mut fixture = Fixture::new();
        let tabs = vec![fixture.tab("root"), fixture.tab("one")];
        let passive_node = tabs[1].node.unwrap();
        fixture.track.tabs = tabs;
        fixture.track.active_index = 0;

        let root = fixture.level(2, 0, "root");
        fixture.stack.reset(root);
        let sub = fixture.level(2, 0, "sub");
        fixture.stack.push(sub);

        let outgoing = SnapshotFrame::empty(0);
        list_open_transition(&mut fixture.ctx(), &outgoing);

        assert_eq!(
            last_end(&fixture.queue, passive_node, NodeField::Alpha),
            Some(0.0)
        );
    }

    #[test]
    fn suppressed_populate_schedules_nothing_and_clears_the_flag() {
        let mut fixture = Fixture::new();
        let root = fixture.level(3, 0, "root");
        fixture.stack.reset(root);
        let catalog = ItemCatalog::demo();
        let mut title = CurrentTitle::default();

        fixture.nav.suppress_next_populate();
        populate(
            &mut fixture.ctx(),
            SnapshotFrame::empty(0),
            &catalog,
            &mut title,
        );

        assert!(fixture.queue.is_empty());
        assert!(title.0.is_empty());
        assert!(!fixture.nav.populate_suppressed());

        populate(
            &mut fixture.ctx(),
            SnapshotFrame::empty(0),
            &catalog,
            &mut title,
        );
        assert!(!fixture.queue.is_empty());
        assert_eq!(title.0, "root");
    }

    #[test]
    fn provider_categories_title_from_the_provider_display_name() {
        let mut fixture = Fixture::new();
        let tabs = vec![fixture.tab("root"), fixture.tab("Arcade Classics")];
        fixture.track.tabs = tabs;
        fixture.track.active_index = 1;
        fixture.track.active_index_old = 1;
        let level = fixture.level(1, 0, "ignored");
        fixture.stack.reset(level);

        let catalog = ItemCatalog::demo();
        let mut title = CurrentTitle::default();
        populate(
            &mut fixture.ctx(),
            SnapshotFrame::empty(1),
            &catalog,
            &mut title,
        );

        assert_eq!(title.0, "Arcade Classics");
    }

    #[test]
    fn category_switch_targets_tabs_scroll_and_both_lists() {
        let mut fixture = Fixture::new();
        let tabs = vec![fixture.tab("root"), fixture.tab("one"), fixture.tab("two")];
        let nodes: Vec<Entity> = tabs.iter().map(|slot| slot.node.unwrap()).collect();
        fixture.track.tabs = tabs;
        fixture.track.active_index = 2;
        fixture.track.active_index_old = 0;

        let incoming = fixture.level(2, 0, "two");
        let incoming_entries = incoming.entries.clone();
        fixture.stack.reset(incoming);
        let old_entries: Vec<Entity> =
            (0..2).map(|_| fixture.world.spawn_empty().id()).collect();

        let catalog = ItemCatalog::demo();
        let mut title = CurrentTitle::default();
        populate(
            &mut fixture.ctx(),
            SnapshotFrame {
                entries: old_entries.clone(),
                selection: 0,
                category_selection: 0,
            },
            &catalog,
            &mut title,
        );

        // Direction +1: tab 2 goes active, tabs 0 and 1 passive, and the
        // track scrolls to center the new category.
        assert_eq!(
            last_end(&fixture.queue, nodes[2], NodeField::Alpha),
            Some(fixture.tuning.category_active.alpha)
        );
        assert_eq!(
            last_end(&fixture.queue, nodes[2], NodeField::Zoom),
            Some(fixture.tuning.category_active.zoom)
        );
        for &node in &nodes[0..2] {
            assert_eq!(
                last_end(&fixture.queue, node, NodeField::Alpha),
                Some(fixture.tuning.category_passive.alpha)
            );
            assert_eq!(
                last_end(&fixture.queue, node, NodeField::Zoom),
                Some(fixture.tuning.category_passive.zoom)
            );
        }
        assert_eq!(
            last_end(&fixture.queue, fixture.rig.track, NodeField::X),
            Some(-fixture.tuning.horizontal_spacing * 2.0)
        );

        assert_eq!(
            last_end(&fixture.queue, old_entries[0], NodeField::X),
            Some(-fixture.tuning.horizontal_spacing)
        );
        let incoming_x = requests_for(&fixture.queue, incoming_entries[0], NodeField::X);
        assert_eq!(incoming_x[0].start, Some(fixture.tuning.horizontal_spacing));
        assert_eq!(incoming_x.last().unwrap().end, 0.0);

        assert_eq!(fixture.track.active_index_old, 2);
    }

    #[test]
    fn hiding_cuts_the_master_fade_and_showing_arms_suppression() {
        let mut fixture = Fixture::new();
        let tabs = vec![fixture.tab("root"), fixture.tab("one")];
        let passive_node = tabs[1].node.unwrap();
        fixture.track.tabs = tabs;
        let root = fixture.level(2, 0, "root");
        fixture.stack.reset(root);

        toggle_visibility(&mut fixture.ctx(), false, false);
        let hide = requests_for(&fixture.queue, fixture.rig.backdrop, NodeField::Alpha);
        assert_eq!(hide[0].start, Some(0.0));
        assert!(hide[0].duration.is_zero());
        assert!(!fixture.nav.populate_suppressed());

        fixture.queue.clear();
        toggle_visibility(&mut fixture.ctx(), true, false);
        assert_eq!(
            last_end(&fixture.queue, fixture.rig.backdrop, NodeField::Alpha),
            Some(1.0)
        );
        assert!(fixture.nav.populate_suppressed());
        assert_eq!(
            last_end(&fixture.queue, passive_node, NodeField::Alpha),
            Some(fixture.tuning.category_passive.alpha)
        );

        // A pending refresh keeps the next populate live.
        fixture.nav.take_suppress_once();
        fixture.queue.clear();
        toggle_visibility(&mut fixture.ctx(), true, true);
        assert!(!fixture.nav.populate_suppressed());
    }
}
