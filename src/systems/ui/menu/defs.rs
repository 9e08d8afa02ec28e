use bevy::prelude::*;
use smallvec::SmallVec;

/// Every menu transition uses the same curve; durations come from
/// `NavTuning`.
pub(super) const MENU_EASE: EaseFunction = EaseFunction::QuadraticInOut;

/// One visible row of the current (or exiting) list.
#[derive(Component, Clone, Debug)]
pub struct MenuEntry {
    pub index: usize,
    pub label: String,
}

/// Marks snapshot rows that are animating out. Retired once their tweens
/// settle.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct ExitingEntry;

/// Icon node of one category tab. Index 0 is the synthetic root tab.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub struct CategoryIcon {
    pub index: usize,
}

/// Label entity belonging to a menu entry. Linked by owner instead of
/// hierarchy so the label can fade independently of the icon transform.
#[derive(Component, Clone, Copy, Debug)]
pub struct EntryLabel {
    pub owner: Entity,
}

#[derive(Clone, Debug, Default)]
pub struct MenuLevel {
    pub title: String,
    /// Chain of entry indices from the category's top level down to this
    /// list. Empty at the top level.
    pub path: SmallVec<[usize; 4]>,
    pub selection: usize,
    pub entries: Vec<Entity>,
}

/// Depth stack of menu lists. Depth never drops below 1 once initialized.
#[derive(Resource, Debug, Default)]
pub struct MenuStack {
    levels: Vec<MenuLevel>,
}

impl MenuStack {
    pub fn depth(&self) -> usize {
        self.levels.len()
    }

    pub fn top(&self) -> Option<&MenuLevel> {
        self.levels.last()
    }

    pub fn top_mut(&mut self) -> Option<&mut MenuLevel> {
        self.levels.last_mut()
    }

    pub fn push(&mut self, level: MenuLevel) {
        self.levels.push(level);
    }

    /// Pops the top list. Refuses to pop the last level.
    pub fn pop(&mut self) -> Option<MenuLevel> {
        if self.levels.len() <= 1 {
            return None;
        }
        self.levels.pop()
    }

    /// Replaces the whole stack with a single top level.
    pub fn reset(&mut self, level: MenuLevel) {
        self.levels.clear();
        self.levels.push(level);
    }
}

#[derive(Clone, Debug)]
pub struct TabSlot {
    pub display_name: String,
    pub node: Option<Entity>,
}

/// The horizontal set of category tabs. The track owns the index → node
/// mapping; providers never hold node storage themselves.
#[derive(Resource, Debug, Default)]
pub struct CategoryTrack {
    pub tabs: Vec<TabSlot>,
    pub active_index: usize,
    /// Active index as of the last populate, used to tell a same-category
    /// refresh from a genuine category switch.
    pub active_index_old: usize,
}

impl CategoryTrack {
    pub fn tab_count(&self) -> usize {
        self.tabs.len()
    }

    pub fn node(&self, index: usize) -> Option<Entity> {
        self.tabs.get(index).and_then(|slot| slot.node)
    }
}

/// Depth bookkeeping plus the one-shot populate suppression flag.
#[derive(Resource, Debug)]
pub struct NavState {
    pub depth: usize,
    pub old_depth: usize,
    suppress_populate_once: bool,
}

impl Default for NavState {
    fn default() -> Self {
        Self {
            depth: 1,
            old_depth: 1,
            suppress_populate_once: false,
        }
    }
}

impl NavState {
    /// Arms the one-shot suppression; the next populate clears it and
    /// schedules nothing.
    pub fn suppress_next_populate(&mut self) {
        self.suppress_populate_once = true;
    }

    pub fn populate_suppressed(&self) -> bool {
        self.suppress_populate_once
    }

    pub(super) fn take_suppress_once(&mut self) -> bool {
        let suppressed = self.suppress_populate_once;
        self.suppress_populate_once = false;
        suppressed
    }
}

/// Shell-level animated scalars, each held on its own node entity:
/// the master fade (`backdrop.alpha`), the depth camera offset
/// (`wheel.x`), the category scroll (`track.x`) and the submenu arrow
/// (`arrow.alpha`).
#[derive(Resource, Clone, Copy, Debug)]
pub struct ShellRig {
    pub backdrop: Entity,
    pub wheel: Entity,
    pub track: Entity,
    pub arrow: Entity,
    pub title: Entity,
}

#[derive(Resource, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShellVisibility {
    pub visible: bool,
}

impl Default for ShellVisibility {
    fn default() -> Self {
        Self { visible: true }
    }
}

#[derive(Resource, Clone, Debug, Default)]
pub struct CurrentTitle(pub String);

/// The list and selection pointers as they were just before the current
/// transition began.
#[derive(Clone, Debug)]
pub struct SnapshotFrame {
    pub entries: Vec<Entity>,
    pub selection: usize,
    pub category_selection: usize,
}

impl SnapshotFrame {
    pub fn empty(category_selection: usize) -> Self {
        Self {
            entries: Vec::new(),
            selection: 0,
            category_selection,
        }
    }
}

/// Single-owner holder for the outgoing-list snapshot. Stashing while a
/// frame is pending replaces it; taking consumes it.
#[derive(Resource, Debug, Default)]
pub struct TransitionSnapshot {
    frame: Option<SnapshotFrame>,
}

impl TransitionSnapshot {
    pub fn stash(&mut self, frame: SnapshotFrame) {
        self.frame = Some(frame);
    }

    pub fn take(&mut self) -> Option<SnapshotFrame> {
        self.frame.take()
    }

    pub fn is_pending(&self) -> bool {
        self.frame.is_some()
    }
}

#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavAction {
    MoveUp,
    MoveDown,
    SetSelection(usize),
    CategoryLeft,
    CategoryRight,
    Enter,
    Back,
    ToggleShell,
}

#[derive(Message, Clone, Copy, Debug, Default)]
pub struct SelectionChanged;

#[derive(Message, Clone, Copy, Debug, Default)]
pub struct PopulateMenu;

#[derive(Message, Clone, Copy, Debug)]
pub struct ShellToggled {
    pub visible: bool,
    /// True when list content changed while the shell was hidden; the
    /// populate that follows must then animate normally.
    pub needs_refresh: bool,
}
