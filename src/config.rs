use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const ATTR_HEADINGS_SELECTOR: &str = "data-in-page-nav-headings-selector";
pub const ATTR_HEADINGS_CONTAINER: &str = "data-in-page-nav-headings-container";
pub const ATTR_ACTIVE_NAV_ITEM_CLASS: &str = "data-in-page-nav-active-nav-item-class";
pub const ATTR_NAV_ITEM_CLASS_ROOT: &str = "data-in-page-nav-nav-item-class-root";

/// Resolved widget configuration. Read once at construction, immutable
/// afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NavConfig {
    /// What to look for within the container.
    pub headings_selector: String,
    /// Selector for the container of the section content.
    pub headings_container: String,
    /// Class applied to the nav item for the section currently in view.
    pub active_nav_item_class: String,
    /// Root of the class name matching a page section to a nav item.
    pub nav_item_selector_root: String,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            headings_selector: "h2".to_string(),
            headings_container: "body".to_string(),
            active_nav_item_class: "in-page-nav-item--active".to_string(),
            nav_item_selector_root: ".in-page-nav__item--".to_string(),
        }
    }
}

impl NavConfig {
    /// Overlay explicit options on top of this configuration.
    pub fn with(self, opts: NavOptions) -> Self {
        Self {
            headings_selector: opts.headings_selector.unwrap_or(self.headings_selector),
            headings_container: opts.headings_container.unwrap_or(self.headings_container),
            active_nav_item_class: opts
                .active_nav_item_class
                .unwrap_or(self.active_nav_item_class),
            nav_item_selector_root: opts
                .nav_item_selector_root
                .unwrap_or(self.nav_item_selector_root),
        }
    }
}

/// Partial configuration: either passed in explicitly at construction or
/// scraped from the host element's declarative attributes. Unset fields
/// fall back to `NavConfig` defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NavOptions {
    pub headings_selector: Option<String>,
    pub headings_container: Option<String>,
    pub active_nav_item_class: Option<String>,
    pub nav_item_selector_root: Option<String>,
}

impl From<NavConfig> for NavOptions {
    fn from(cfg: NavConfig) -> Self {
        Self {
            headings_selector: Some(cfg.headings_selector),
            headings_container: Some(cfg.headings_container),
            active_nav_item_class: Some(cfg.active_nav_item_class),
            nav_item_selector_root: Some(cfg.nav_item_selector_root),
        }
    }
}

impl NavOptions {
    pub fn from_attributes(attrs: &[(String, String)]) -> Self {
        let get = |name: &str| {
            attrs
                .iter()
                .find(|(n, _)| n == name)
                .map(|(_, v)| v.clone())
        };
        Self {
            headings_selector: get(ATTR_HEADINGS_SELECTOR),
            headings_container: get(ATTR_HEADINGS_CONTAINER),
            active_nav_item_class: get(ATTR_ACTIVE_NAV_ITEM_CLASS),
            nav_item_selector_root: get(ATTR_NAV_ITEM_CLASS_ROOT),
        }
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

pub trait ConfigStore {
    fn load(&self) -> NavConfig;
    fn save(&self, cfg: &NavConfig) -> std::io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let path = if let Some(pd) = ProjectDirs::from("", "", "pagenav") {
            pd.config_dir().join("config.json")
        } else {
            PathBuf::from("pagenav_config.json")
        };
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> NavConfig {
        if let Ok(bytes) = fs::read(&self.path) {
            if let Ok(cfg) = serde_json::from_slice::<NavConfig>(&bytes) {
                return cfg;
            }
        }
        NavConfig::default()
    }

    fn save(&self, cfg: &NavConfig) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg).unwrap_or_default();
        fs::write(&self.path, data)
    }
}
