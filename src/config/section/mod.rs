//! Configuration section definitions.
//!
//! Each module corresponds to a section in `routing.toml`:
//!
//! | Module     | TOML Section      | Purpose                              |
//! |------------|-------------------|--------------------------------------|
//! | `webspace` | `[[webspaces]]`   | Tenants, localizations, templates    |
//! | `portal`   | `portals[]`       | Portals, environments, urls          |
//! | `cleanup`  | `[cleanup]`       | Resource locator normalization       |

mod cleanup;
mod portal;
mod webspace;

pub use cleanup::{CleanupConfig, DEFAULT_REPLACERS, Replacers, SlugSeparator};
pub use portal::{
    CustomUrlConfig, EnvironmentConfig, PortalConfig, PortalLocalizationConfig, UrlConfig,
};
pub use webspace::{
    ErrorTemplateConfig, LocalizationConfig, Metadata, NavigationConfig, NavigationContextConfig,
    ResourceLocatorConfig, ResourceLocatorStrategy, SecurityConfig, SegmentConfig,
    WebspaceConfig,
};
