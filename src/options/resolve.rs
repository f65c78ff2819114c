use crate::types::{FormInput, OptionValue, ViewerConfig};

use super::coerce::{CoercedOptions, coerce};
use super::defaults::defaults;

/// Merge coerced values over `defaults`, field by field. Slots the coercion
/// left empty keep their default.
pub fn resolve(defaults: &ViewerConfig, coerced: &CoercedOptions) -> ViewerConfig {
    ViewerConfig {
        container: pick(&coerced.container, &defaults.container),
        zoom: pick(&coerced.zoom, &defaults.zoom),
        show_sidebar: pick(&coerced.show_sidebar, &defaults.show_sidebar),
        show_text: pick(&coerced.show_text, &defaults.show_text),
        show_search: pick(&coerced.show_search, &defaults.show_search),
        show_header: pick(&coerced.show_header, &defaults.show_header),
        enable_url_changes: pick(&coerced.enable_url_changes, &defaults.enable_url_changes),
    }
}

fn pick(value: &Option<OptionValue>, default: &OptionValue) -> OptionValue {
    value.as_ref().unwrap_or(default).clone()
}

/// Coerce a form snapshot and resolve it against the default option table.
pub fn resolve_form(raw: &FormInput) -> ViewerConfig {
    let defaults = defaults();
    resolve(defaults, &coerce(raw, defaults))
}
