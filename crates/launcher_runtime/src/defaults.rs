//! Built-in default launcher layout.

use std::sync::OnceLock;

use serde::Deserialize;

use crate::model::{IconItem, LauncherConfiguration, Slot};

include!(concat!(env!("OUT_DIR"), "/default_layout_generated.rs"));

#[derive(Debug, Clone, Deserialize)]
struct IconDecl {
    id: String,
    label: String,
    icon: String,
    protected: bool,
}

#[derive(Debug, Clone, Deserialize)]
struct DefaultLayoutManifest {
    middle_tray: Vec<String>,
    left_menu: Vec<String>,
    right_menu: Vec<String>,
    icons: Vec<IconDecl>,
}

impl DefaultLayoutManifest {
    fn icon(&self, id: &str) -> Slot {
        if id.is_empty() {
            return None;
        }
        self.icons.iter().find(|decl| decl.id == id).map(|decl| {
            if decl.protected {
                IconItem::protected(&decl.id, &decl.label, &decl.icon)
            } else {
                IconItem::customizable(&decl.id, &decl.label, &decl.icon)
            }
        })
    }

    fn fill<const N: usize>(&self, ids: &[String]) -> [Slot; N] {
        std::array::from_fn(|index| ids.get(index).and_then(|id| self.icon(id)))
    }

    fn configuration(&self) -> LauncherConfiguration {
        LauncherConfiguration {
            middle_tray: self.fill(&self.middle_tray),
            left_menu: self.fill(&self.left_menu),
            right_menu: self.fill(&self.right_menu),
        }
        .with_mirroring()
    }
}

fn default_layout() -> &'static LauncherConfiguration {
    static LAYOUT: OnceLock<LauncherConfiguration> = OnceLock::new();
    LAYOUT.get_or_init(|| {
        serde_json::from_str::<DefaultLayoutManifest>(DEFAULT_LAYOUT_JSON)
            .expect("generated default layout should parse")
            .configuration()
    })
}

/// Returns the default layout with tray mirroring already applied.
pub fn default_configuration() -> LauncherConfiguration {
    default_layout().clone()
}
