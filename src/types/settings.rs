use serde::{Deserialize, Serialize};

/// Storage key the storefront's persist middleware writes under.
pub const DEFAULT_STORAGE_KEY: &str = "recent-products-storage";

/// Default cap on the number of remembered products.
pub const DEFAULT_MAX_ITEMS: usize = 50;

/// Korea Standard Time, the storefront's home zone.
pub const DEFAULT_UTC_OFFSET_MINUTES: i32 = 9 * 60;

/// Top-level settings container.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct SidebarSettings {
    pub general: GeneralSettings,
    pub store: StoreSettings,
    pub sidebar: BehaviorSettings,
}

impl SidebarSettings {
    /// Build mode after applying the optional override.
    pub fn effective_build_mode(&self) -> BuildMode {
        self.general.build_mode.unwrap_or_else(BuildMode::current)
    }
}

/// Locale and time presentation settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneralSettings {
    pub locale: Locale,
    pub utc_offset_minutes: i32,
    /// Overrides the compile-time build mode when set.
    #[serde(default)]
    pub build_mode: Option<BuildMode>,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            locale: Locale::Ko,
            utc_offset_minutes: DEFAULT_UTC_OFFSET_MINUTES,
            build_mode: None,
        }
    }
}

/// Persisted store settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoreSettings {
    pub storage_key: String,
    pub max_items: usize,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            max_items: DEFAULT_MAX_ITEMS,
        }
    }
}

/// Sidebar interaction settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct BehaviorSettings {
    /// Close the panel after a product row navigates. Off by default.
    pub close_on_navigate: bool,
}

/// Supported UI locales.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    Ko,
    En,
}

impl Locale {
    pub fn code(&self) -> &'static str {
        match self {
            Locale::Ko => "ko",
            Locale::En => "en",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        let lang = code
            .split(['-', '_', '.'])
            .next()
            .unwrap_or_default()
            .to_lowercase();
        match lang.as_str() {
            "ko" => Some(Locale::Ko),
            "en" => Some(Locale::En),
            _ => None,
        }
    }
}

/// Distinguishes development builds from production builds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BuildMode {
    Development,
    Production,
}

impl BuildMode {
    /// Mode of the running binary, derived from `debug_assertions`.
    pub fn current() -> Self {
        if cfg!(debug_assertions) {
            BuildMode::Development
        } else {
            BuildMode::Production
        }
    }

    pub fn is_development(&self) -> bool {
        matches!(self, BuildMode::Development)
    }
}
