use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

const MIDDLE_TRAY_SLOTS: usize = 10;
const SIDE_MENU_SLOTS: usize = 4;
const PROTECTED_SLOTS: usize = 5;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct IconDecl {
    id: String,
    label: String,
    icon: String,
    protected: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct DefaultLayoutManifest {
    schema_version: u32,
    middle_tray: Vec<String>,
    left_menu: Vec<String>,
    right_menu: Vec<String>,
    icons: Vec<IconDecl>,
}

fn validate(manifest: &DefaultLayoutManifest) -> Result<(), String> {
    if manifest.schema_version != 1 {
        return Err(format!(
            "schema mismatch: expected 1 found {}",
            manifest.schema_version
        ));
    }

    let mut icons = HashMap::new();
    for decl in &manifest.icons {
        if decl.id.is_empty() {
            return Err("icon ids must not be empty".to_string());
        }
        if icons.insert(decl.id.as_str(), decl).is_some() {
            return Err(format!("duplicate icon id `{}`", decl.id));
        }
    }

    let containers = [
        ("middle_tray", &manifest.middle_tray, MIDDLE_TRAY_SLOTS),
        ("left_menu", &manifest.left_menu, SIDE_MENU_SLOTS),
        ("right_menu", &manifest.right_menu, SIDE_MENU_SLOTS),
    ];
    let mut protected_slots = 0;
    for (name, slots, expected) in containers {
        if slots.len() != expected {
            return Err(format!(
                "{name} expects {expected} slots, found {}",
                slots.len()
            ));
        }
        let mut seen = HashSet::new();
        for id in slots.iter().filter(|id| !id.is_empty()) {
            let decl = icons
                .get(id.as_str())
                .ok_or_else(|| format!("{name} references undeclared icon `{id}`"))?;
            if !seen.insert(id.as_str()) {
                return Err(format!("{name} lists icon `{id}` more than once"));
            }
            if decl.protected {
                if name == "middle_tray" {
                    return Err(format!("protected icon `{id}` cannot live in the middle tray"));
                }
                protected_slots += 1;
            }
        }
    }
    if protected_slots != PROTECTED_SLOTS {
        return Err(format!(
            "expected {PROTECTED_SLOTS} protected slots, found {protected_slots}"
        ));
    }

    for id in manifest.left_menu.iter().chain(&manifest.right_menu) {
        let customizable = icons.get(id.as_str()).is_some_and(|decl| !decl.protected);
        if customizable && !manifest.middle_tray.contains(id) {
            return Err(format!(
                "side menu icon `{id}` has no middle tray occurrence to mirror"
            ));
        }
    }
    Ok(())
}

fn main() {
    let crate_root = PathBuf::from(std::env::var("CARGO_MANIFEST_DIR").expect("manifest dir"));
    let path = crate_root.join("default_layout.toml");
    println!("cargo:rerun-if-changed={}", path.display());

    let raw = fs::read_to_string(&path)
        .unwrap_or_else(|err| panic!("failed to read {}: {err}", path.display()));
    let manifest: DefaultLayoutManifest = toml::from_str(&raw)
        .unwrap_or_else(|err| panic!("failed to parse {}: {err}", path.display()));
    if let Err(err) = validate(&manifest) {
        panic!("invalid default layout in {}: {err}", path.display());
    }

    let json = serde_json::to_string_pretty(&manifest).expect("serialize default layout");
    let generated = format!(
        "/// Build-time generated default launcher layout JSON.\n\
pub const DEFAULT_LAYOUT_JSON: &str = r##\"{}\"##;\n",
        json
    );

    let out_dir = PathBuf::from(std::env::var("OUT_DIR").expect("OUT_DIR"));
    let out_file = out_dir.join("default_layout_generated.rs");
    fs::write(&out_file, generated)
        .unwrap_or_else(|err| panic!("failed to write {}: {err}", out_file.display()));
}
