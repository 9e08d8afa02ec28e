//! Content catalog: the root pages plus one branch per item provider.
//!
//! Providers are external to the navigation core; the catalog is the demo
//! stand-in for them and doubles as the JSON schema a real frontend would
//! feed the shell.
use std::path::Path;

use bevy::prelude::*;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub label: String,
    #[serde(default)]
    pub children: Vec<CatalogEntry>,
}

impl CatalogEntry {
    pub fn leaf(label: &str) -> Self {
        Self {
            label: label.to_owned(),
            children: Vec::new(),
        }
    }

    pub fn branch(label: &str, children: Vec<CatalogEntry>) -> Self {
        Self {
            label: label.to_owned(),
            children,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ItemProvider {
    pub display_name: String,
    #[serde(default)]
    pub entries: Vec<CatalogEntry>,
}

#[derive(Resource, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ItemCatalog {
    pub root_title: String,
    pub root: Vec<CatalogEntry>,
    #[serde(default)]
    pub providers: Vec<ItemProvider>,
}

impl ItemCatalog {
    /// Number of category tabs: the synthetic root tab plus one per
    /// provider.
    pub fn category_count(&self) -> usize {
        1 + self.providers.len()
    }

    pub fn provider_count(&self) -> usize {
        self.providers.len()
    }

    pub fn display_name(&self, category: usize) -> Option<&str> {
        if category == 0 {
            Some(&self.root_title)
        } else {
            self.providers
                .get(category - 1)
                .map(|provider| provider.display_name.as_str())
        }
    }

    fn top_entries(&self, category: usize) -> Option<&[CatalogEntry]> {
        if category == 0 {
            Some(&self.root)
        } else {
            self.providers
                .get(category - 1)
                .map(|provider| provider.entries.as_slice())
        }
    }

    /// Walks `path` (a chain of entry indices) from a category's top level
    /// down to the entry list it denotes. An empty path is the top level.
    pub fn entries_at(&self, category: usize, path: &[usize]) -> Option<&[CatalogEntry]> {
        let mut entries = self.top_entries(category)?;
        for &index in path {
            entries = entries.get(index)?.children.as_slice();
        }
        Some(entries)
    }

    pub fn entry_at(&self, category: usize, path: &[usize], index: usize) -> Option<&CatalogEntry> {
        self.entries_at(category, path)?.get(index)
    }

    /// Loads a catalog from a JSON file, falling back to the built-in demo
    /// content when the file is absent or malformed.
    pub fn load_or_demo(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(catalog) => catalog,
                Err(error) => {
                    warn!(
                        "ignoring malformed catalog file {}: {error}",
                        path.display()
                    );
                    DEMO_CATALOG.clone()
                }
            },
            Err(_) => DEMO_CATALOG.clone(),
        }
    }

    pub fn demo() -> Self {
        DEMO_CATALOG.clone()
    }
}

static DEMO_CATALOG: Lazy<ItemCatalog> = Lazy::new(|| ItemCatalog {
    root_title: "Main Menu".to_owned(),
    root: vec![
        CatalogEntry::branch(
            "Load Content",
            vec![
                CatalogEntry::leaf("Downloads"),
                CatalogEntry::branch(
                    "Collections",
                    vec![
                        CatalogEntry::leaf("Favorites"),
                        CatalogEntry::leaf("Recently Played"),
                    ],
                ),
                CatalogEntry::leaf("Browse Files"),
            ],
        ),
        CatalogEntry::branch(
            "Settings",
            vec![
                CatalogEntry::branch(
                    "Video",
                    vec![
                        CatalogEntry::leaf("Fullscreen"),
                        CatalogEntry::leaf("Vertical Sync"),
                        CatalogEntry::leaf("Aspect Ratio"),
                    ],
                ),
                CatalogEntry::branch(
                    "Audio",
                    vec![
                        CatalogEntry::leaf("Mute"),
                        CatalogEntry::leaf("Volume"),
                    ],
                ),
                CatalogEntry::leaf("Input"),
                CatalogEntry::leaf("Saving"),
            ],
        ),
        CatalogEntry::leaf("Information"),
        CatalogEntry::leaf("Quit"),
    ],
    providers: vec![
        ItemProvider {
            display_name: "Arcade Classics".to_owned(),
            entries: vec![
                CatalogEntry::leaf("Asteroid Field"),
                CatalogEntry::leaf("Tunnel Runner"),
                CatalogEntry::branch(
                    "Puzzle Pack",
                    vec![
                        CatalogEntry::leaf("Blocks I"),
                        CatalogEntry::leaf("Blocks II"),
                    ],
                ),
            ],
        },
        ItemProvider {
            display_name: "Home Console".to_owned(),
            entries: vec![
                CatalogEntry::leaf("Starlight Saga"),
                CatalogEntry::leaf("Circuit Racer"),
                CatalogEntry::leaf("Dungeon Depths"),
                CatalogEntry::leaf("Sky Pirates"),
            ],
        },
    ],
});
