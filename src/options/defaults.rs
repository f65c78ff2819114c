use std::sync::LazyLock;

use crate::types::{OptionValue, ViewerConfig};

/// Every option the embedded viewer reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionName {
    Container,
    Zoom,
    ShowSidebar,
    ShowText,
    ShowSearch,
    ShowHeader,
    EnableUrlChanges,
}

impl OptionName {
    pub const ALL: [OptionName; 7] = [
        OptionName::Container,
        OptionName::Zoom,
        OptionName::ShowSidebar,
        OptionName::ShowText,
        OptionName::ShowSearch,
        OptionName::ShowHeader,
        OptionName::EnableUrlChanges,
    ];

    /// The name used both by the viewer and by the form field.
    pub const fn key(self) -> &'static str {
        match self {
            OptionName::Container => "container",
            OptionName::Zoom => "zoom",
            OptionName::ShowSidebar => "showSidebar",
            OptionName::ShowText => "showText",
            OptionName::ShowSearch => "showSearch",
            OptionName::ShowHeader => "showHeader",
            OptionName::EnableUrlChanges => "enableUrlChanges",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|name| name.key() == key)
    }
}

static DEFAULT_OPTIONS: LazyLock<ViewerConfig> = LazyLock::new(|| ViewerConfig {
    container: OptionValue::text("#DV-container"),
    zoom: OptionValue::text("auto"),
    show_sidebar: OptionValue::Flag(false),
    show_text: OptionValue::Flag(true),
    show_search: OptionValue::Flag(true),
    show_header: OptionValue::Flag(true),
    enable_url_changes: OptionValue::Flag(false),
});

/// The baseline viewer configuration.
pub fn defaults() -> &'static ViewerConfig {
    &DEFAULT_OPTIONS
}

impl ViewerConfig {
    pub fn get(&self, name: OptionName) -> &OptionValue {
        match name {
            OptionName::Container => &self.container,
            OptionName::Zoom => &self.zoom,
            OptionName::ShowSidebar => &self.show_sidebar,
            OptionName::ShowText => &self.show_text,
            OptionName::ShowSearch => &self.show_search,
            OptionName::ShowHeader => &self.show_header,
            OptionName::EnableUrlChanges => &self.enable_url_changes,
        }
    }

    /// Options in declaration order, paired with their values.
    pub fn iter(&self) -> impl Iterator<Item = (OptionName, &OptionValue)> {
        OptionName::ALL.into_iter().map(move |name| (name, self.get(name)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_every_option() {
        let keys: Vec<_> = defaults().iter().map(|(name, _)| name.key()).collect();
        assert_eq!(
            keys,
            [
                "container",
                "zoom",
                "showSidebar",
                "showText",
                "showSearch",
                "showHeader",
                "enableUrlChanges"
            ]
        );
    }

    #[test]
    fn default_values_match_viewer_baseline() {
        let d = defaults();
        assert_eq!(d.container, OptionValue::text("#DV-container"));
        assert_eq!(d.zoom, OptionValue::text("auto"));
        assert_eq!(d.show_sidebar, OptionValue::Flag(false));
        assert_eq!(d.show_text, OptionValue::Flag(true));
        assert_eq!(d.enable_url_changes, OptionValue::Flag(false));
    }

    #[test]
    fn serialized_keys_are_the_viewer_keys() {
        let json = serde_json::to_value(defaults()).unwrap();
        let object = json.as_object().unwrap();
        assert_eq!(object.len(), OptionName::ALL.len());
        for name in OptionName::ALL {
            assert!(object.contains_key(name.key()), "missing {}", name.key());
        }
        assert_eq!(json["showText"], serde_json::Value::Bool(true));
    }

    #[test]
    fn from_key_rejects_auxiliary_fields() {
        assert_eq!(OptionName::from_key("showSearch"), Some(OptionName::ShowSearch));
        assert_eq!(OptionName::from_key("zoom_specific"), None);
        assert_eq!(OptionName::from_key("show_search"), None);
    }
}
