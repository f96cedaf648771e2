use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::{EntitySnapshot, UnitSystem};

use super::number_format::NumberLocale;

/// Lookup from a translation key to a display string.
pub trait Localize {
    /// Returns `None` for unknown keys; an empty translation counts as missing.
    fn localize(&self, key: &str) -> Option<String>;
}

/// In-memory translation table, insertion ordered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapLocalizer {
    entries: IndexMap<String, String>,
}

impl MapLocalizer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MapLocalizer {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

impl Localize for MapLocalizer {
    fn localize(&self, key: &str) -> Option<String> {
        self.entries
            .get(key)
            .filter(|value| !value.is_empty())
            .cloned()
    }
}

/// Theme set published by the host.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Themes {
    pub default_theme: String,
    #[serde(default)]
    pub dark_mode: bool,
    /// Theme name to CSS-variable overrides.
    #[serde(default)]
    pub themes: IndexMap<String, IndexMap<String, String>>,
}

impl Themes {
    #[must_use]
    pub fn theme(&self, name: &str) -> Option<&IndexMap<String, String>> {
        self.themes.get(name)
    }
}

/// Read-only view of the host the card reconciles and renders against.
///
/// Hosts build a new context (usually cloning the previous one and swapping
/// a few `Arc`s) for every change. Entity snapshots, themes and the localizer
/// are compared by pointer, never field by field.
#[derive(Clone)]
pub struct HassContext {
    states: IndexMap<String, Arc<EntitySnapshot>>,
    unit_system: UnitSystem,
    locale: NumberLocale,
    themes: Arc<Themes>,
    localizer: Arc<dyn Localize>,
}

impl fmt::Debug for HassContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HassContext")
            .field("states", &self.states.keys().collect::<Vec<_>>())
            .field("unit_system", &self.unit_system)
            .field("locale", &self.locale)
            .field("themes", &self.themes.default_theme)
            .finish_non_exhaustive()
    }
}

impl Default for HassContext {
    fn default() -> Self {
        Self::new(UnitSystem::default())
    }
}

impl HassContext {
    #[must_use]
    pub fn new(unit_system: UnitSystem) -> Self {
        Self {
            states: IndexMap::new(),
            unit_system,
            locale: NumberLocale::default(),
            themes: Arc::new(Themes::default()),
            localizer: Arc::new(MapLocalizer::default()),
        }
    }

    #[must_use]
    pub fn with_state(mut self, snapshot: Arc<EntitySnapshot>) -> Self {
        self.states.insert(snapshot.entity_id.clone(), snapshot);
        self
    }

    /// Wraps `snapshot` in a fresh `Arc`, i.e. a new observation.
    #[must_use]
    pub fn with_snapshot(self, snapshot: EntitySnapshot) -> Self {
        self.with_state(Arc::new(snapshot))
    }

    #[must_use]
    pub fn without_state(mut self, entity_id: &str) -> Self {
        self.states.shift_remove(entity_id);
        self
    }

    #[must_use]
    pub fn with_unit_system(mut self, unit_system: UnitSystem) -> Self {
        self.unit_system = unit_system;
        self
    }

    #[must_use]
    pub fn with_locale(mut self, locale: NumberLocale) -> Self {
        self.locale = locale;
        self
    }

    #[must_use]
    pub fn with_themes(mut self, themes: Arc<Themes>) -> Self {
        self.themes = themes;
        self
    }

    #[must_use]
    pub fn with_localizer(mut self, localizer: Arc<dyn Localize>) -> Self {
        self.localizer = localizer;
        self
    }

    #[must_use]
    pub fn state(&self, entity_id: &str) -> Option<&Arc<EntitySnapshot>> {
        self.states.get(entity_id)
    }

    #[must_use]
    pub fn states(&self) -> &IndexMap<String, Arc<EntitySnapshot>> {
        &self.states
    }

    #[must_use]
    pub fn unit_system(&self) -> UnitSystem {
        self.unit_system
    }

    #[must_use]
    pub fn locale(&self) -> NumberLocale {
        self.locale
    }

    #[must_use]
    pub fn themes(&self) -> &Arc<Themes> {
        &self.themes
    }

    /// Localized string for `key`, empty when the host has no translation.
    #[must_use]
    pub fn localize(&self, key: &str) -> String {
        self.localizer.localize(key).unwrap_or_default()
    }

    #[must_use]
    pub fn try_localize(&self, key: &str) -> Option<String> {
        self.localizer.localize(key)
    }

    /// True when locale, unit system, theme set or localizer differ from `other`.
    #[must_use]
    pub(super) fn ambient_changed(&self, other: &Self) -> bool {
        self.locale != other.locale
            || self.unit_system != other.unit_system
            || !Arc::ptr_eq(&self.themes, &other.themes)
            || !same_arc(&self.localizer, &other.localizer)
    }
}

/// Pointer identity for possibly unsized `Arc`s (metadata is ignored).
#[must_use]
pub(super) fn same_arc<T: ?Sized>(left: &Arc<T>, right: &Arc<T>) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(left), Arc::as_ptr(right))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::{HassContext, Localize, MapLocalizer, Themes};
    use crate::core::{EntitySnapshot, HvacMode, UnitSystem};

    #[test]
    fn localizer_treats_empty_as_missing() {
        let localizer = MapLocalizer::new().with("a", "A").with("b", "");
        assert_eq!(localizer.localize("a").as_deref(), Some("A"));
        assert_eq!(localizer.localize("b"), None);
        assert_eq!(localizer.localize("c"), None);
    }

    #[test]
    fn replacing_a_snapshot_keeps_other_identities() {
        let hall = Arc::new(EntitySnapshot::new("climate.hall", HvacMode::Heat));
        let attic = Arc::new(EntitySnapshot::new("climate.attic", HvacMode::Cool));
        let first = HassContext::new(UnitSystem::metric())
            .with_state(hall.clone())
            .with_state(attic.clone());
        let second = first
            .clone()
            .with_snapshot(EntitySnapshot::new("climate.hall", HvacMode::Heat));

        let same_attic = Arc::ptr_eq(
            first.state("climate.attic").expect("attic"),
            second.state("climate.attic").expect("attic"),
        );
        let same_hall = Arc::ptr_eq(
            first.state("climate.hall").expect("hall"),
            second.state("climate.hall").expect("hall"),
        );
        assert!(same_attic);
        assert!(!same_hall);
        assert!(!first.ambient_changed(&second));
    }

    #[test]
    fn ambient_change_detects_new_theme_set() {
        let first = HassContext::new(UnitSystem::metric());
        let second = first.clone().with_themes(Arc::new(Themes::default()));
        assert!(first.ambient_changed(&second));
        assert!(first.ambient_changed(&first.clone().with_unit_system(UnitSystem::imperial())));
    }
}
