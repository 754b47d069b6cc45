// Selector - Pure description of how to find an element
//
// A Selector is a value, not a query. It is rendered into a Playwright
// selector string only when a driver resolves it into a Locator, so every
// action re-resolves against the current page.
//
// Rendering follows the encodings Playwright's own clients use for
// getByRole()/getByLabel(), so `internal:role=...` and `internal:label=...`
// behave exactly like their JS counterparts (case-insensitive substring
// match on the accessible name unless a regex is given).
//
// See: https://playwright.dev/docs/locators

use std::fmt;

/// ARIA roles used by the storefront locators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AriaRole {
    Button,
    Checkbox,
    Combobox,
    Heading,
    Link,
}

impl AriaRole {
    /// Role name as it appears in a role selector
    pub fn as_str(&self) -> &'static str {
        match self {
            AriaRole::Button => "button",
            AriaRole::Checkbox => "checkbox",
            AriaRole::Combobox => "combobox",
            AriaRole::Heading => "heading",
            AriaRole::Link => "link",
        }
    }
}

/// How an accessible name is matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessibleName {
    /// Case-insensitive substring match
    Text(String),
    /// Regular expression match (JS regex syntax)
    Pattern {
        source: String,
        case_insensitive: bool,
    },
}

/// Strategy for locating one or more elements.
///
/// Callers pass already-sanitized values into the constructors. The only
/// escaping performed is what the selector syntax itself needs (quotes and
/// backslashes inside role names and label text). CSS is used verbatim.
///
/// # Example
///
/// ```ignore
/// use storefront_e2e::selector::{AriaRole, Selector};
///
/// let login = Selector::role(AriaRole::Button, "Login");
/// assert_eq!(login.to_playwright(), r#"internal:role=button[name="Login"i]"#);
///
/// let first_cell = Selector::css("table td:first-of-type").first();
/// assert_eq!(first_cell.to_playwright(), "table td:first-of-type >> nth=0");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// By ARIA role and accessible name
    Role { role: AriaRole, name: AccessibleName },
    /// By CSS selector
    Css(String),
    /// By associated `<label>` text
    Label(String),
    /// The n-th (0-based) element matched by another selector
    Nth { base: Box<Selector>, index: usize },
}

impl Selector {
    /// Role selector with a case-insensitive substring name match.
    pub fn role(role: AriaRole, name: impl Into<String>) -> Self {
        Selector::Role {
            role,
            name: AccessibleName::Text(name.into()),
        }
    }

    /// Role selector whose accessible name must match a regex.
    pub fn role_matching(
        role: AriaRole,
        pattern: impl Into<String>,
        case_insensitive: bool,
    ) -> Self {
        Selector::Role {
            role,
            name: AccessibleName::Pattern {
                source: pattern.into(),
                case_insensitive,
            },
        }
    }

    pub fn css(selector: impl Into<String>) -> Self {
        Selector::Css(selector.into())
    }

    pub fn label(text: impl Into<String>) -> Self {
        Selector::Label(text.into())
    }

    /// Narrows this selector to its n-th match.
    pub fn nth(self, index: usize) -> Self {
        Selector::Nth {
            base: Box::new(self),
            index,
        }
    }

    /// Narrows this selector to its first match.
    pub fn first(self) -> Self {
        self.nth(0)
    }

    /// Renders the Playwright selector string.
    pub fn to_playwright(&self) -> String {
        match self {
            Selector::Role { role, name } => {
                let name = match name {
                    AccessibleName::Text(text) => format!("\"{}\"i", escape_attribute(text)),
                    AccessibleName::Pattern {
                        source,
                        case_insensitive,
                    } => {
                        let flags = if *case_insensitive { "i" } else { "" };
                        format!("/{}/{}", source, flags)
                    }
                };
                format!("internal:role={}[name={}]", role.as_str(), name)
            }
            Selector::Css(css) => css.clone(),
            Selector::Label(text) => format!("internal:label={}i", quote_text(text)),
            Selector::Nth { base, index } => format!("{} >> nth={}", base.to_playwright(), index),
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_playwright())
    }
}

// Attribute values inside role selectors only need backslashes and double
// quotes escaped.
fn escape_attribute(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

// Text selectors are JSON string literals.
fn quote_text(value: &str) -> String {
    serde_json::Value::String(value.to_string()).to_string()
}
