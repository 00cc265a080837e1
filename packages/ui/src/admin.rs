//! # Admin panel helpers
//!
//! Small quality-of-life additions layered over the stock admin pages.
//!
//! | Helper | Trigger | Effect |
//! |--------|---------|--------|
//! | filter auto-submit | `change` on a changelist filter field | submits the enclosing form |
//! | `/` | keydown outside form fields | focuses and selects the search box |
//! | `Alt+T` / `Alt+S` | keydown | opens the trip / country changelist |
//! | sticky toolbar | mount | `.actions` or `.object-tools` sticks to the top |
//! | hero image preview | `change` on a `hero_image` file input | shows the chosen file |
//! | textarea auto-grow | mount and `input` | height follows the content |

use std::sync::LazyLock;

use regex::Regex;

pub const TRIP_CHANGELIST: &str = "/admin/travelapp/trip/";
pub const COUNTRY_CHANGELIST: &str = "/admin/travelapp/country/";

pub const FILTER_FIELDS: &str = ".changelist-filter select, .changelist-filter input";
pub const SEARCH_BOX: &str = r#"input[name="q"], .navbar input[type="search"], .navbar .form-control"#;
/// Tried in order; the first match becomes sticky.
pub const STICKY_TOOLBARS: [&str; 2] = [".actions", ".object-tools"];
pub const STICKY_STYLE: [(&str, &str); 3] = [("position", "sticky"), ("top", "10px"), ("z-index", "10")];
pub const PREVIEW_INPUTS: &str = r#"input[type="file"][name$="hero_image"]"#;
pub const PREVIEW_BOX_STYLE: [(&str, &str); 1] = [("margin-top", "8px")];
pub const PREVIEW_IMAGE_STYLE: [(&str, &str); 3] = [
    ("max-height", "140px"),
    ("border-radius", "12px"),
    ("box-shadow", "0 10px 24px rgba(0,0,0,.25)"),
];

/// Extra pixels below the content so the last line is never clipped.
const GROW_SLACK: i32 = 6;

static TEXT_ENTRY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)input|textarea|select").expect("Invalid regex"));

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AdminShortcut {
    FocusSearch,
    Navigate(&'static str),
}

/// The parts of a `keydown` event the shortcuts look at.
#[derive(Clone, Copy, Debug)]
pub struct KeyPress<'a> {
    pub key: &'a str,
    pub alt: bool,
    /// `tagName` of `document.activeElement`.
    pub active_tag: &'a str,
}

pub fn shortcut(press: &KeyPress) -> Option<AdminShortcut> {
    if press.key == "/" && !TEXT_ENTRY.is_match(press.active_tag) {
        return Some(AdminShortcut::FocusSearch);
    }
    if !press.alt {
        return None;
    }
    match press.key.to_lowercase().as_str() {
        "t" => Some(AdminShortcut::Navigate(TRIP_CHANGELIST)),
        "s" => Some(AdminShortcut::Navigate(COUNTRY_CHANGELIST)),
        _ => None,
    }
}

/// CSS height for a textarea whose content is `scroll_height` pixels tall.
pub fn grown_height(scroll_height: i32) -> String {
    format!("{}px", scroll_height + GROW_SLACK)
}
