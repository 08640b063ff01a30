//! Element locators: declarative expressions naming a UI element.
//!
//! A page object declares its elements up front as [`ElementLocator`]s and
//! resolves them lazily against the live accessibility tree on each access.
//! Locators are immutable once declared.
//!
//! Two locator strategies exist, mirroring what the automation backends can
//! answer: lookup by accessibility identifier, and a structural query over
//! element type and name ([`ElementQuery`]).
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use axpage_core::locator::{ElementLocator, ElementQuery, NameMatch};
//!
//! // By accessibility id.
//! let add_button = ElementLocator::by_id("Add");
//!
//! // Structural query: any StaticText whose name contains "Property List",
//! // with a per-locator resolution timeout.
//! let header = ElementLocator::query(
//!     ElementQuery::of_type("Other").name(NameMatch::Contains("Property List".into())),
//! )
//! .with_timeout(Duration::from_secs(30));
//! ```

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::element::UIElement;

/// Predicate applied to an element's name (identifier or label) by a query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NameMatch {
    /// The name equals the given string exactly (case-sensitive).
    Exact(String),
    /// The name contains the given substring.
    Contains(String),
    /// The name matches a glob pattern with `*` and `?` wildcards.
    Glob(String),
    /// Any name, including none. Used to enumerate all elements of a type.
    Any,
}

impl NameMatch {
    /// Applies the predicate to a candidate name.
    pub fn matches(&self, name: &str) -> bool {
        match self {
            NameMatch::Exact(expected) => expected == name,
            NameMatch::Contains(needle) => name.contains(needle.as_str()),
            NameMatch::Glob(pattern) => glob_match(pattern, name),
            NameMatch::Any => true,
        }
    }
}

/// Matches a string against a glob pattern with `*` (any chars) and `?`
/// (single char). Falls back to exact equality when the pattern has no
/// wildcards.
fn glob_match(pattern: &str, text: &str) -> bool {
    if !pattern.contains('*') && !pattern.contains('?') {
        return pattern == text;
    }

    let pat: Vec<char> = pattern.chars().collect();
    let txt: Vec<char> = text.chars().collect();
    let (plen, tlen) = (pat.len(), txt.len());

    // dp[i][j] = pattern[..i] matches text[..j]
    let mut dp = vec![vec![false; tlen + 1]; plen + 1];
    dp[0][0] = true;

    // Leading *'s can match empty text
    for i in 1..=plen {
        if pat[i - 1] == '*' {
            dp[i][0] = dp[i - 1][0];
        }
    }

    for i in 1..=plen {
        for j in 1..=tlen {
            if pat[i - 1] == '*' {
                // * matches zero chars (dp[i-1][j]) or one more char (dp[i][j-1])
                dp[i][j] = dp[i - 1][j] || dp[i][j - 1];
            } else if pat[i - 1] == '?' || pat[i - 1] == txt[j - 1] {
                dp[i][j] = dp[i - 1][j - 1];
            }
        }
    }

    dp[plen][tlen]
}

/// A structural query over the accessibility tree: element type plus a name
/// predicate.
///
/// The name predicate is checked against the element's accessibility
/// identifier and, failing that, its label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementQuery {
    /// Element type to match (e.g. "Button", "StaticText"). `None` matches
    /// any type.
    pub element_type: Option<String>,
    /// Predicate on the element's name.
    pub name: NameMatch,
}

impl ElementQuery {
    /// Query for elements of the given type, any name.
    pub fn of_type(element_type: impl Into<String>) -> Self {
        Self {
            element_type: Some(element_type.into()),
            name: NameMatch::Any,
        }
    }

    /// Restricts the query to elements whose name satisfies the predicate.
    pub fn name(mut self, name: NameMatch) -> Self {
        self.name = name;
        self
    }

    /// Shorthand for an exact-name restriction.
    pub fn named(self, name: impl Into<String>) -> Self {
        self.name(NameMatch::Exact(name.into()))
    }

    /// Returns true if the element satisfies this query.
    pub fn matches(&self, element: &UIElement) -> bool {
        if let Some(typ) = &self.element_type {
            if element.element_type.as_deref() != Some(typ.as_str()) {
                return false;
            }
        }
        match self.name {
            NameMatch::Any => true,
            _ => {
                let by_id = element
                    .identifier
                    .as_deref()
                    .is_some_and(|id| self.name.matches(id));
                let by_label = element
                    .label
                    .as_deref()
                    .is_some_and(|label| self.name.matches(label));
                by_id || by_label
            }
        }
    }
}

/// The locator strategy: how an element is identified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Strategy {
    /// Lookup by accessibility identifier (AXUniqueId), exact match.
    AccessibilityId(String),
    /// Structural query over type and name.
    Query(ElementQuery),
}

/// A declarative expression naming a UI element, with an optional per-locator
/// resolution timeout.
///
/// Locators are immutable; they carry no reference to the live tree and are
/// resolved against it on each access.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementLocator {
    /// How the element is identified.
    pub strategy: Strategy,
    /// Maximum time to wait when resolving this locator. `None` uses the
    /// page's default timeout.
    pub timeout: Option<Duration>,
}

impl ElementLocator {
    /// Locator by accessibility identifier.
    pub fn by_id(identifier: impl Into<String>) -> Self {
        Self {
            strategy: Strategy::AccessibilityId(identifier.into()),
            timeout: None,
        }
    }

    /// Locator by structural query.
    pub fn query(query: ElementQuery) -> Self {
        Self {
            strategy: Strategy::Query(query),
            timeout: None,
        }
    }

    /// Sets a per-locator resolution timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Returns true if the element satisfies this locator.
    pub fn matches(&self, element: &UIElement) -> bool {
        match &self.strategy {
            Strategy::AccessibilityId(id) => element.identifier.as_deref() == Some(id.as_str()),
            Strategy::Query(query) => query.matches(element),
        }
    }
}

impl fmt::Display for ElementLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.strategy {
            Strategy::AccessibilityId(id) => write!(f, "id '{}'", id),
            Strategy::Query(query) => {
                let typ = query.element_type.as_deref().unwrap_or("*");
                match &query.name {
                    NameMatch::Exact(name) => write!(f, "{}[name='{}']", typ, name),
                    NameMatch::Contains(needle) => {
                        write!(f, "{}[contains(name,'{}')]", typ, needle)
                    }
                    NameMatch::Glob(pattern) => write!(f, "{}[name~'{}']", typ, pattern),
                    NameMatch::Any => write!(f, "{}[*]", typ),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn button(id: Option<&str>, label: Option<&str>) -> UIElement {
        UIElement {
            identifier: id.map(String::from),
            label: label.map(String::from),
            value: None,
            element_type: Some("Button".to_string()),
            frame: None,
            children: vec![],
            hittable: None,
        }
    }

    #[test]
    fn by_id_matches_identifier_exactly() {
        let locator = ElementLocator::by_id("Add");
        assert!(locator.matches(&button(Some("Add"), None)));
        assert!(!locator.matches(&button(Some("add"), None)));
        assert!(!locator.matches(&button(None, Some("Add"))));
    }

    #[test]
    fn query_matches_type_and_name() {
        let locator = ElementLocator::query(ElementQuery::of_type("Button").named("Edit"));
        assert!(locator.matches(&button(None, Some("Edit"))));
        assert!(locator.matches(&button(Some("Edit"), None)));

        // Wrong type
        let mut text = button(None, Some("Edit"));
        text.element_type = Some("StaticText".to_string());
        assert!(!locator.matches(&text));
    }

    #[test]
    fn query_contains_matches_substring() {
        let query =
            ElementQuery::of_type("Other").name(NameMatch::Contains("Property List".into()));
        let mut el = button(None, Some("GDPR Property List Screen"));
        el.element_type = Some("Other".to_string());
        assert!(query.matches(&el));

        el.label = Some("Settings".to_string());
        assert!(!query.matches(&el));
    }

    #[test]
    fn query_any_name_matches_unnamed_elements() {
        let query = ElementQuery::of_type("Button");
        assert!(query.matches(&button(None, None)));
    }

    #[test]
    fn glob_match_star_and_question_mark() {
        assert!(glob_match("Log*", "Log In"));
        assert!(glob_match("Log*", "Log"));
        assert!(!glob_match("Log*", "Blog"));
        assert!(glob_match("Item ?", "Item 1"));
        assert!(!glob_match("Item ?", "Item 12"));
        assert!(glob_match("plain", "plain"));
        assert!(!glob_match("plain", "other"));
    }

    #[test]
    fn display_is_readable() {
        assert_eq!(ElementLocator::by_id("Add").to_string(), "id 'Add'");
        assert_eq!(
            ElementLocator::query(ElementQuery::of_type("Button").named("Edit")).to_string(),
            "Button[name='Edit']"
        );
        assert_eq!(
            ElementLocator::query(ElementQuery {
                element_type: None,
                name: NameMatch::Contains("sure".into()),
            })
            .to_string(),
            "*[contains(name,'sure')]"
        );
    }

    #[test]
    fn timeout_is_carried_through() {
        let locator = ElementLocator::by_id("Trash").with_timeout(Duration::from_secs(30));
        assert_eq!(locator.timeout, Some(Duration::from_secs(30)));
    }
}
