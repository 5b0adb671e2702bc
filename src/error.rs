use std::error::Error;
use std::fmt;

/// Configuration faults surfaced at widget construction. None of these are
/// retried; a widget that cannot find its headings is misconfigured.
#[derive(Debug, Clone, PartialEq)]
pub enum NavError {
    /// The headings selector matched nothing inside the container.
    NoHeadings { selector: String },
    /// A selector string could not be parsed.
    BadSelector { input: String },
    /// The configured headings container does not exist in the document.
    MissingContainer { selector: String },
    /// No node carrying the component attribute was found to attach to.
    MissingNavElement,
}

impl fmt::Display for NavError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavError::NoHeadings { selector } => write!(
                f,
                "in-page-nav: no headings matching `{selector}` were found in the document to link to"
            ),
            NavError::BadSelector { input } => {
                write!(f, "in-page-nav: `{input}` is not a valid selector")
            }
            NavError::MissingContainer { selector } => {
                write!(f, "in-page-nav: headings container `{selector}` not found")
            }
            NavError::MissingNavElement => {
                write!(f, "in-page-nav: no element with data-component=\"in-page-nav\"")
            }
        }
    }
}

impl Error for NavError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_selector() {
        let err = NavError::NoHeadings {
            selector: "h2".into(),
        };
        assert!(err.to_string().contains("h2"));

        let err = NavError::MissingContainer {
            selector: "#content".into(),
        };
        assert!(err.to_string().contains("#content"));
    }
}
