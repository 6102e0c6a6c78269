//! Rendering of schema violations for people.

use crate::validator::Violation;
use std::fmt;

/// The first line of every report.
pub const HEADER: &str = "JSON is not valid according to the schema:";

/// The violations found in a document, ready to be shown to a user.
///
/// Displays as [`HEADER`](constant.HEADER.html) followed by one `- ` bullet
/// per violation, in the order the engine produced them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Report {
    violations: Vec<Violation>,
}

impl Report {
    pub fn new(violations: Vec<Violation>) -> Self {
        Self { violations }
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", HEADER)?;
        for violation in &self.violations {
            write!(f, "\n- {}", violation)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::validator::pointer;
    use failure::Error;
    use pretty_assertions::assert_eq;

    #[test]
    fn bullets_in_order() -> Result<(), Error> {
        let report = Report::new(vec![
            Violation::new(
                pointer("")?,
                pointer("/required")?,
                "\"name\" is a required property".to_owned(),
            ),
            Violation::new(
                pointer("/age")?,
                pointer("/properties/age/type")?,
                "\"43\" is not of type \"number\"".to_owned(),
            ),
            Violation::new(
                pointer("/phones/1")?,
                pointer("/properties/phones/items/type")?,
                "442345678 is not of type \"string\"".to_owned(),
            ),
        ]);

        assert_eq!(
            report.to_string(),
            "JSON is not valid according to the schema:\n\
             - (root): \"name\" is a required property\n\
             - /age: \"43\" is not of type \"number\"\n\
             - /phones/1: 442345678 is not of type \"string\""
        );
        Ok(())
    }

    #[test]
    fn header_only() {
        assert_eq!(Report::new(vec![]).to_string(), HEADER);
    }
}
