//! "Best viewed on a phone" hint shown to desktop and tablet visitors.

use std::cell::Cell;
use std::sync::LazyLock;

use regex::Regex;

pub const BODY_CLASS: &str = "is-device-hint-open";

static PHONE_UA: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)iPhone|Android.+Mobile|Windows Phone|IEMobile|Opera Mini|Mobi")
        .expect("Invalid regex")
});
static IPAD_UA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)iPad|Macintosh").expect("Invalid regex"));

/// iPadOS reports a desktop Safari user agent; touch support gives it away.
pub fn is_phone(user_agent: &str, max_touch_points: i32) -> bool {
    let ipad = IPAD_UA.is_match(user_agent) && max_touch_points > 1;
    PHONE_UA.is_match(user_agent) && !ipad
}

pub trait HintView {
    /// Toggle the hint's `open` class and the body class together.
    fn set_open(&self, open: bool);
}

pub struct DeviceHint<V> {
    view: V,
    open: Cell<bool>,
}

impl<V: HintView> DeviceHint<V> {
    pub fn new(view: V) -> Self {
        Self {
            view,
            open: Cell::new(false),
        }
    }

    pub fn is_open(&self) -> bool {
        self.open.get()
    }

    /// Open the hint unless the visitor is on a phone.
    pub fn show_for(&self, user_agent: &str, max_touch_points: i32) {
        if is_phone(user_agent, max_touch_points) {
            return;
        }
        self.open.set(true);
        self.view.set_open(true);
    }

    pub fn dismiss(&self) {
        self.open.set(false);
        self.view.set_open(false);
    }

    pub fn key_down(&self, key: &str) {
        if key == "Escape" && self.is_open() {
            self.dismiss();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    const IPHONE: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) AppleWebKit/605.1.15 Mobile/15E148";
    const ANDROID_PHONE: &str = "Mozilla/5.0 (Linux; Android 14; Pixel 8) Chrome/120.0 Mobile Safari/537.36";
    const ANDROID_TABLET: &str = "Mozilla/5.0 (Linux; Android 14; SM-X710) Chrome/120.0 Safari/537.36";
    const DESKTOP: &str = "Mozilla/5.0 (X11; Linux x86_64) Chrome/120.0 Safari/537.36";
    const IPADOS: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 Version/17.0 Mobile/15E148 Safari/604.1";

    #[test]
    fn test_phone_detection() {
        assert!(is_phone(IPHONE, 5));
        assert!(is_phone(ANDROID_PHONE, 5));
        assert!(!is_phone(ANDROID_TABLET, 5));
        assert!(!is_phone(DESKTOP, 0));
    }

    #[test]
    fn test_ipados_with_touch_is_not_a_phone() {
        assert!(!is_phone(IPADOS, 5));
        assert!(is_phone(IPADOS, 0));
    }

    #[derive(Default)]
    struct RecordingView {
        states: RefCell<Vec<bool>>,
    }

    impl HintView for RecordingView {
        fn set_open(&self, open: bool) {
            self.states.borrow_mut().push(open);
        }
    }

    #[test]
    fn test_desktop_sees_hint_until_escape() {
        let hint = DeviceHint::new(RecordingView::default());
        hint.show_for(DESKTOP, 0);
        assert!(hint.is_open());
        hint.key_down("Enter");
        assert!(hint.is_open());
        hint.key_down("Escape");
        assert!(!hint.is_open());
        hint.key_down("Escape");
        assert_eq!(*hint.view.states.borrow(), vec![true, false]);
    }

    #[test]
    fn test_phone_never_sees_hint() {
        let hint = DeviceHint::new(RecordingView::default());
        hint.show_for(IPHONE, 5);
        assert!(!hint.is_open());
        assert!(hint.view.states.borrow().is_empty());
    }
}
