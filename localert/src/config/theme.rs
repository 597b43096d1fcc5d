//! Theme preference persistence.

use crate::storage::KeyValueStore;

/// Storage key for the theme preference.
pub const THEME_KEY: &str = "localert.theme";

/// Display theme, cycled Light → Dark → System → Light.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemePreference {
    #[default]
    Light,
    Dark,
    /// Follow the platform's color scheme.
    System,
}

impl ThemePreference {
    /// The next theme in the cycle.
    pub fn next(&self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::System,
            Self::System => Self::Light,
        }
    }

    /// Load from the store; unknown or missing values fall back to Light.
    pub fn load(store: &impl KeyValueStore) -> Self {
        match store.get(THEME_KEY).as_deref() {
            Some("light") => Self::Light,
            Some("dark") => Self::Dark,
            Some("system") => Self::System,
            Some(other) => {
                tracing::warn!(value = other, "Unknown stored theme, using default");
                Self::default()
            }
            None => Self::default(),
        }
    }

    /// Persist this preference.
    pub fn save(&self, store: &impl KeyValueStore) {
        store.set(THEME_KEY, self.as_str());
    }

    fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::System => "system",
        }
    }
}

impl std::fmt::Display for ThemePreference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn test_cycle_order() {
        assert_eq!(ThemePreference::Light.next(), ThemePreference::Dark);
        assert_eq!(ThemePreference::Dark.next(), ThemePreference::System);
        assert_eq!(ThemePreference::System.next(), ThemePreference::Light);
    }

    #[test]
    fn test_save_and_load() {
        let store = MemoryStore::new();
        ThemePreference::Dark.save(&store);
        assert_eq!(ThemePreference::load(&store), ThemePreference::Dark);
    }

    #[test]
    fn test_missing_value_defaults_to_light() {
        let store = MemoryStore::new();
        assert_eq!(ThemePreference::load(&store), ThemePreference::Light);
    }

    #[test]
    fn test_corrupt_value_defaults_to_light() {
        let store = MemoryStore::new();
        store.set(THEME_KEY, "sepia");
        assert_eq!(ThemePreference::load(&store), ThemePreference::Light);
    }
}
