//! Static registry data for the Sample Design System.
//!
//! Everything in here is read-only and lives for the whole process. The MCP
//! layer only ever looks entries up by key or iterates them in table order.

mod components;

use serde::{Deserialize, Serialize};

pub use components::COMPONENTS;

/// Broad grouping used by `search_components` filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Action,
    Layout,
    Feedback,
    Navigation,
    Overlay,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Self::Action,
        Self::Layout,
        Self::Feedback,
        Self::Navigation,
        Self::Overlay,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Action => "action",
            Self::Layout => "layout",
            Self::Feedback => "feedback",
            Self::Navigation => "navigation",
            Self::Overlay => "overlay",
        }
    }
}

/// Integration effort for a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    Simple,
    Moderate,
    Complex,
}

impl Complexity {
    pub const ALL: [Complexity; 3] = [Self::Simple, Self::Moderate, Self::Complex];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Simple => "simple",
            Self::Moderate => "moderate",
            Self::Complex => "complex",
        }
    }
}

fn is_empty(list: &&'static [&'static str]) -> bool {
    list.is_empty()
}

/// A documented attribute of a component's custom element.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Prop {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub kind: &'static str,
    /// Accepted values for enumerated attributes; empty means free-form.
    #[serde(skip_serializing_if = "is_empty")]
    pub values: &'static [&'static str],
    pub default: &'static str,
    pub description: &'static str,
}

/// One design system component.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Component {
    #[serde(rename = "id")]
    pub key: &'static str,
    pub name: &'static str,
    pub tag: &'static str,
    /// Companion elements registered alongside the main tag.
    #[serde(skip_serializing_if = "is_empty")]
    pub child_tags: &'static [&'static str],
    pub description: &'static str,
    pub usage: &'static str,
    pub props: &'static [Prop],
    pub features: &'static [&'static str],
    pub examples: &'static [&'static str],
    pub category: Category,
    pub complexity: Complexity,
}

impl Component {
    /// Attribute lookup on the main tag.
    pub fn prop(&self, name: &str) -> Option<&'static Prop> {
        self.props.iter().find(|p| p.name == name)
    }

    /// Import specifier for the per-component bundle.
    pub fn import_path(&self) -> String {
        format!("{}/components/{}", DESIGN_SYSTEM.package, self.tag)
    }

    /// CDN script URL for the per-component bundle.
    pub fn cdn_url(&self) -> String {
        format!("{}{}.js", DESIGN_SYSTEM.cdn, self.tag)
    }
}

/// Package-level metadata.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct DesignSystemInfo {
    pub name: &'static str,
    pub package: &'static str,
    pub version: &'static str,
    pub architecture: &'static str,
    pub installation: &'static str,
    pub cdn: &'static str,
    pub framework_support: &'static [&'static str],
    pub browser_support: &'static [&'static str],
}

pub const DESIGN_SYSTEM: DesignSystemInfo = DesignSystemInfo {
    name: "Sample Design System",
    package: "sample-design-system-educkf",
    version: "1.1.0",
    architecture: "Web Components using Custom Elements API",
    installation: "npm install sample-design-system-educkf",
    cdn: "https://unpkg.com/sample-design-system-educkf@1.1.0/dist/components/",
    framework_support: &["Vanilla JS", "React", "Vue.js", "Angular", "Svelte"],
    browser_support: &["Chrome 54+", "Firefox 63+", "Safari 10.1+", "Edge 79+"],
};

/// Frameworks with an implementation guide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Framework {
    Vanilla,
    React,
    Vue,
    Angular,
    Svelte,
}

impl Framework {
    pub const ALL: [Framework; 5] = [
        Self::Vanilla,
        Self::React,
        Self::Vue,
        Self::Angular,
        Self::Svelte,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Vanilla => "vanilla",
            Self::React => "react",
            Self::Vue => "vue",
            Self::Angular => "angular",
            Self::Svelte => "svelte",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Vanilla => "Vanilla JS",
            Self::React => "React",
            Self::Vue => "Vue.js",
            Self::Angular => "Angular",
            Self::Svelte => "Svelte",
        }
    }
}

/// Look up a component by key, ignoring ASCII case.
pub fn component(key: &str) -> Option<&'static Component> {
    COMPONENTS.iter().find(|c| c.key.eq_ignore_ascii_case(key))
}

/// Look up the component owning a custom element tag (main or child tag).
pub fn component_for_tag(tag: &str) -> Option<&'static Component> {
    COMPONENTS
        .iter()
        .find(|c| c.tag == tag || c.child_tags.iter().any(|t| *t == tag))
}

/// All component keys in table order.
pub fn component_keys() -> Vec<&'static str> {
    COMPONENTS.iter().map(|c| c.key).collect()
}

/// Component keys joined for human-readable error messages.
pub fn component_key_list() -> String {
    component_keys().join(", ")
}
