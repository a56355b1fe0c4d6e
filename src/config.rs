//! # Per-Widget Preference Store
//!
//! Every placed widget carries its own preference record (font, color,
//! shadow, label toggles, icon pack), keyed by a typed [`WidgetId`] and
//! persisted as one TOML document. The renderers never read this store:
//! callers resolve a record into a [`RenderStyle`] and pass values in.
//!
//! Host lifecycle hooks map onto two operations: a deleted widget clears
//! its record ([`PrefStore::clear`]) and a backup restore moves records to
//! the freshly assigned ids ([`PrefStore::remap`]).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;

use crate::bitmap::Argb;
use crate::typeface::Typeface;
use crate::RenderStyle;

/// Default store location next to the binary's working directory.
pub const DEFAULT_STORE_PATH: &str = "widget-prefs.toml";

/// Host-assigned widget instance identifier.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct WidgetId(pub u32);

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "widget {}", self.0)
    }
}

/// Preference record for one widget instance.
///
/// Missing fields take their defaults so old stores keep loading after
/// upgrades.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetPrefs {
    /// Typeface family name, resolved through the registry
    pub font_family: String,
    /// Requested text size in pixels
    pub text_size_px: u32,
    /// Text color as packed `0xAARRGGBB`
    pub color: u32,
    /// Dark halo behind the text
    pub shadow: bool,
    /// Extra tracking in em fractions; absent keeps the font default
    pub letter_spacing: Option<f32>,
    /// Show the date label
    pub show_date: bool,
    /// Show the next-alarm label
    pub show_alarm: bool,
    /// Tick mark for the next alarm on the analog face (stock: off)
    pub show_alarm_tick: bool,
    /// Format times with the 24-hour clock
    pub use_24h: bool,
    /// Icon pack package name; absent uses the built-in fallback icons
    pub icon_pack: Option<String>,
}

impl Default for WidgetPrefs {
    fn default() -> Self {
        WidgetPrefs {
            font_family: crate::typeface::DEFAULT_FAMILY.to_string(),
            text_size_px: 64,
            color: 0xFFFF_FFFF,
            shadow: true,
            letter_spacing: None,
            show_date: true,
            show_alarm: true,
            show_alarm_tick: false,
            use_24h: false,
            icon_pack: None,
        }
    }
}

impl WidgetPrefs {
    /// Resolve this record into render parameters.
    ///
    /// A family the registry does not know falls back to the default
    /// typeface here, with a warning, rather than failing the render.
    pub fn render_style(&self) -> RenderStyle {
        let typeface = match Typeface::load(&self.font_family, self.text_size_px) {
            Ok(face) => face,
            Err(err) => {
                log::warn!("{err}; falling back to the default typeface");
                Typeface::default_for_size(self.text_size_px)
            }
        };
        RenderStyle {
            typeface,
            text_size_px: self.text_size_px,
            color: Argb::from_u32(self.color),
            shadow: self.shadow,
            letter_spacing: self.letter_spacing,
        }
    }
}

/// TOML-persisted map of widget id to preference record.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct PrefStore {
    #[serde(default)]
    widgets: BTreeMap<String, WidgetPrefs>,
}

impl PrefStore {
    /// Load the store from the default location.
    /// Falls back to an empty store if the file is missing or invalid.
    pub fn load() -> Self {
        Self::load_from_path(DEFAULT_STORE_PATH)
    }

    /// Load the store from the given path.
    /// Falls back to an empty store if the file is missing or invalid.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Self {
        match fs::read_to_string(&path) {
            Ok(contents) => match toml::from_str::<PrefStore>(&contents) {
                Ok(store) => {
                    log::info!("loaded preferences for {} widget(s)", store.widgets.len());
                    store
                }
                Err(err) => {
                    log::warn!("invalid preference store: {err}; using defaults");
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("no preference store found, using defaults");
                Self::default()
            }
        }
    }

    /// Persist the store to the given path.
    pub fn save_to_path<P: AsRef<Path>>(
        &self,
        path: P,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// The record for a widget, or defaults when none is stored.
    pub fn prefs(&self, id: WidgetId) -> WidgetPrefs {
        self.widgets.get(&key(id)).cloned().unwrap_or_default()
    }

    /// Store a record for a widget.
    pub fn set(&mut self, id: WidgetId, prefs: WidgetPrefs) {
        self.widgets.insert(key(id), prefs);
    }

    /// Drop a widget's record (the host deleted the widget).
    pub fn clear(&mut self, id: WidgetId) {
        self.widgets.remove(&key(id));
    }

    /// Move a record to a new id (the host restored widgets from backup
    /// and reassigned identifiers).
    pub fn remap(&mut self, old: WidgetId, new: WidgetId) {
        if let Some(prefs) = self.widgets.remove(&key(old)) {
            self.widgets.insert(key(new), prefs);
        }
    }

    /// Ids with stored records, in ascending order.
    pub fn widget_ids(&self) -> Vec<WidgetId> {
        let mut ids: Vec<WidgetId> = self
            .widgets
            .keys()
            .filter_map(|k| k.parse().ok().map(WidgetId))
            .collect();
        ids.sort();
        ids
    }
}

fn key(id: WidgetId) -> String {
    id.0.to_string()
}
