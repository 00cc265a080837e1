/// Result of trying to attach a controller to the current page.
#[derive(Debug)]
pub enum Mount<C> {
    Ready(C),
    /// The page lacks an element the controller needs.
    NotOnPage { missing: &'static str },
}

/// Turn an element lookup into a mount precondition.
pub fn need<T>(element: Option<T>, id: &'static str) -> Result<T, &'static str> {
    element.ok_or(id)
}

impl<C> Mount<C> {
    /// Run a builder that bails out with the id of the first missing element.
    pub fn attempt(build: impl FnOnce() -> Result<C, &'static str>) -> Self {
        match build() {
            Ok(c) => Mount::Ready(c),
            Err(missing) => Mount::NotOnPage { missing },
        }
    }

    pub fn ready(self) -> Option<C> {
        match self {
            Mount::Ready(c) => Some(c),
            Mount::NotOnPage { .. } => None,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Mount::Ready(_))
    }

    /// Log the outcome under `name` and return the controller, if any.
    pub fn log(self, name: &str) -> Option<C> {
        match self {
            Mount::Ready(c) => {
                tracing::debug!(controller = name, "mounted");
                Some(c)
            }
            Mount::NotOnPage { missing } => {
                tracing::debug!(controller = name, missing, "not on this page");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attempt_reports_first_missing_element() {
        let mounted = Mount::attempt(|| {
            let a = need(Some(1), "a")?;
            Ok(a + 1)
        });
        assert_eq!(mounted.ready(), Some(2));

        let missing = Mount::<u8>::attempt(|| {
            let _overlay = need(None::<u8>, "searchOverlay")?;
            let _field = need(None::<u8>, "searchField")?;
            Ok(0)
        });
        match missing {
            Mount::NotOnPage { missing } => assert_eq!(missing, "searchOverlay"),
            Mount::Ready(_) => panic!("expected NotOnPage"),
        }
    }
}
