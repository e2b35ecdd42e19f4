#![forbid(unsafe_code)]

//! Mobile navigation toggle and in-page anchor links.

/// Host command emitted by [`Navigation`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum NavCommand {
    /// Toggle the `open` class on the nav container.
    SetNavOpen { open: bool },
    /// Set `aria-expanded` on the toggle button.
    SetAriaExpanded { expanded: bool },
    /// Cancel the link's default navigation.
    PreventDefault,
    /// Smooth-scroll the element with id `target` to the top of the viewport.
    ScrollIntoView { target: String },
}

/// Mobile nav state.
#[derive(Debug, Clone, Default)]
pub struct Navigation {
    has_nav: bool,
    has_toggle: bool,
    open: bool,
}

impl Navigation {
    /// Create a closed nav; absent elements disable the matching commands.
    #[must_use]
    pub const fn new(has_nav: bool, has_toggle: bool) -> Self {
        Self {
            has_nav,
            has_toggle,
            open: false,
        }
    }

    /// Whether the mobile menu is open.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    /// Toggle button clicked.
    pub fn toggle(&mut self) -> Vec<NavCommand> {
        if !(self.has_nav && self.has_toggle) {
            return Vec::new();
        }
        self.open = !self.open;
        vec![
            NavCommand::SetNavOpen { open: self.open },
            NavCommand::SetAriaExpanded {
                expanded: self.open,
            },
        ]
    }

    /// An `<a href>` was clicked.
    ///
    /// `target_exists` reports whether an element with the fragment's id is
    /// on the page. Only `#fragment` links are handled; a bare `#` is left
    /// alone.
    pub fn follow_anchor(
        &mut self,
        href: &str,
        target_exists: impl FnOnce(&str) -> bool,
    ) -> Vec<NavCommand> {
        let Some(fragment) = href.strip_prefix('#') else {
            return Vec::new();
        };
        if fragment.is_empty() {
            return Vec::new();
        }

        let mut out = Vec::with_capacity(4);
        if target_exists(fragment) {
            out.push(NavCommand::PreventDefault);
            out.push(NavCommand::ScrollIntoView {
                target: fragment.to_owned(),
            });
        }
        if self.has_nav && self.open {
            self.open = false;
            out.push(NavCommand::SetNavOpen { open: false });
        }
        if self.has_toggle {
            out.push(NavCommand::SetAriaExpanded { expanded: false });
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn toggle_flips_open_and_aria() {
        let mut nav = Navigation::new(true, true);
        assert_eq!(
            nav.toggle(),
            vec![
                NavCommand::SetNavOpen { open: true },
                NavCommand::SetAriaExpanded { expanded: true },
            ]
        );
        nav.toggle();
        assert!(!nav.is_open());
    }

    #[test]
    fn missing_elements_disable_toggle() {
        assert!(Navigation::new(false, true).toggle().is_empty());
        assert!(Navigation::new(true, false).toggle().is_empty());
    }

    #[test]
    fn anchor_scrolls_and_closes_menu() {
        let mut nav = Navigation::new(true, true);
        nav.toggle();
        assert_eq!(
            nav.follow_anchor("#services", |id| id == "services"),
            vec![
                NavCommand::PreventDefault,
                NavCommand::ScrollIntoView {
                    target: "services".into()
                },
                NavCommand::SetNavOpen { open: false },
                NavCommand::SetAriaExpanded { expanded: false },
            ]
        );
        assert!(!nav.is_open());
    }

    #[test]
    fn missing_target_still_collapses_aria() {
        let mut nav = Navigation::new(true, true);
        assert_eq!(
            nav.follow_anchor("#nowhere", |_| false),
            vec![NavCommand::SetAriaExpanded { expanded: false }]
        );
    }

    #[test]
    fn bare_hash_and_external_links_are_ignored() {
        let mut nav = Navigation::new(true, true);
        assert!(nav.follow_anchor("#", |_| true).is_empty());
        assert!(nav.follow_anchor("", |_| true).is_empty());
        assert!(nav.follow_anchor("/faq#try", |_| true).is_empty());
    }
}
