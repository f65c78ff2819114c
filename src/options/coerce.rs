//! Option coercion — the single translation point from form strings to
//! typed option values.

use crate::types::{FormInput, OptionValue, ViewerConfig};

use super::defaults::OptionName;

/// Value a checked checkbox serializes to.
pub const CHECKED: &str = "on";
/// Zoom mode meaning "use the numeric override field".
pub const SPECIFIC_ZOOM: &str = "specific";
/// Auxiliary form field holding the numeric zoom override.
pub const ZOOM_SPECIFIC_FIELD: &str = "zoom_specific";
/// Zoom mode used whenever the numeric override is unusable.
pub const AUTO_ZOOM: &str = "auto";
/// Smallest literal zoom percentage the viewer accepts.
pub const MIN_SPECIFIC_ZOOM: i64 = 100;

/// Per-option coercion results. `None` leaves the default in place when
/// resolved; `coerce` fills every slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoercedOptions {
    pub container: Option<OptionValue>,
    pub zoom: Option<OptionValue>,
    pub show_sidebar: Option<OptionValue>,
    pub show_text: Option<OptionValue>,
    pub show_search: Option<OptionValue>,
    pub show_header: Option<OptionValue>,
    pub enable_url_changes: Option<OptionValue>,
}

impl CoercedOptions {
    pub fn get(&self, name: OptionName) -> Option<&OptionValue> {
        match name {
            OptionName::Container => self.container.as_ref(),
            OptionName::Zoom => self.zoom.as_ref(),
            OptionName::ShowSidebar => self.show_sidebar.as_ref(),
            OptionName::ShowText => self.show_text.as_ref(),
            OptionName::ShowSearch => self.show_search.as_ref(),
            OptionName::ShowHeader => self.show_header.as_ref(),
            OptionName::EnableUrlChanges => self.enable_url_changes.as_ref(),
        }
    }

    pub fn set(&mut self, name: OptionName, value: OptionValue) {
        let slot = match name {
            OptionName::Container => &mut self.container,
            OptionName::Zoom => &mut self.zoom,
            OptionName::ShowSidebar => &mut self.show_sidebar,
            OptionName::ShowText => &mut self.show_text,
            OptionName::ShowSearch => &mut self.show_search,
            OptionName::ShowHeader => &mut self.show_header,
            OptionName::EnableUrlChanges => &mut self.enable_url_changes,
        };
        *slot = Some(value);
    }
}

/// Coerce a form snapshot into typed option values.
///
/// Only the options present in `defaults` are read from `raw`; any other
/// field (including the zoom override once consumed) is ignored.
///
/// - missing field: `false`
/// - `"on"`: `true`
/// - anything else: the string, unchanged
/// - zoom `"specific"`: the override as a percentage if it parses to at
///   least `MIN_SPECIFIC_ZOOM`, else `"auto"`
pub fn coerce(raw: &FormInput, defaults: &ViewerConfig) -> CoercedOptions {
    let mut coerced = CoercedOptions::default();

    for (name, _) in defaults.iter() {
        let mut value = match raw.get(name.key()) {
            None => OptionValue::Flag(false),
            Some(CHECKED) => OptionValue::Flag(true),
            Some(other) => OptionValue::text(other),
        };

        if name == OptionName::Zoom && value == OptionValue::text(SPECIFIC_ZOOM) {
            value = specific_zoom(raw.get(ZOOM_SPECIFIC_FIELD));
        }

        coerced.set(name, value);
    }

    coerced
}

fn specific_zoom(raw: Option<&str>) -> OptionValue {
    raw.and_then(parse_leading_int)
        .filter(|zoom| *zoom >= MIN_SPECIFIC_ZOOM)
        .and_then(|zoom| u32::try_from(zoom).ok())
        .map(OptionValue::Number)
        .unwrap_or_else(|| OptionValue::text(AUTO_ZOOM))
}

/// Lenient base-10 parse: skips leading whitespace, accepts one sign, reads
/// the longest run of digits and ignores whatever follows. `None` when there
/// are no digits or the value does not fit.
fn parse_leading_int(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, unsigned) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    if end == 0 {
        return None;
    }
    let magnitude: i64 = unsigned[..end].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}
