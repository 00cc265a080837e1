//! CSRF token lookup for state-changing requests.
//!
//! The backend sets the token as a cookie; each POST echoes it back in a
//! header. No cookie means no header, and the server decides what to do.

use std::rc::Rc;

/// Value of `name` in a `document.cookie` style string (`a=1; b=2`).
pub fn cookie_value(cookies: &str, name: &str) -> Option<String> {
    cookies
        .split(';')
        .map(str::trim)
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.to_string())
}

/// Reads the current cookie string on demand.
pub type CookieSource = Rc<dyn Fn() -> Option<String>>;

#[derive(Clone)]
pub struct Csrf {
    cookie_name: String,
    header_name: String,
    source: CookieSource,
}

impl Csrf {
    pub fn new(cookie_name: &str, header_name: &str, source: CookieSource) -> Self {
        Self {
            cookie_name: cookie_name.to_string(),
            header_name: header_name.to_string(),
            source,
        }
    }

    /// A source that never has cookies.
    pub fn disabled(cookie_name: &str, header_name: &str) -> Self {
        Self::new(cookie_name, header_name, Rc::new(|| None))
    }

    pub fn token(&self) -> Option<String> {
        let cookies = (self.source)()?;
        cookie_value(&cookies, &self.cookie_name).filter(|t| !t.is_empty())
    }

    /// Zero or one header pairs to attach to a request.
    pub fn headers(&self) -> Vec<(String, String)> {
        self.token()
            .map(|token| vec![(self.header_name.clone(), token)])
            .unwrap_or_default()
    }
}

impl std::fmt::Debug for Csrf {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Csrf")
            .field("cookie_name", &self.cookie_name)
            .field("header_name", &self.header_name)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cookie_value() {
        let cookies = "sessionid=abc; csrftoken=T0K3N; theme=dark";
        assert_eq!(cookie_value(cookies, "csrftoken").as_deref(), Some("T0K3N"));
        assert_eq!(cookie_value(cookies, "sessionid").as_deref(), Some("abc"));
        assert_eq!(cookie_value(cookies, "csrf"), None);
        assert_eq!(cookie_value("", "csrftoken"), None);
    }

    #[test]
    fn test_headers_only_when_cookie_present() {
        let with = Csrf::new(
            "csrftoken",
            "X-CSRFToken",
            Rc::new(|| Some("csrftoken=xyz".to_string())),
        );
        assert_eq!(
            with.headers(),
            vec![("X-CSRFToken".to_string(), "xyz".to_string())]
        );

        let without = Csrf::new(
            "csrftoken",
            "X-CSRFToken",
            Rc::new(|| Some("other=1".to_string())),
        );
        assert!(without.headers().is_empty());
        assert!(Csrf::disabled("csrftoken", "X-CSRFToken").headers().is_empty());
    }
}
