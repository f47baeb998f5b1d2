//! Path type with validated identifier components.

use std::fmt;

use crate::error::PathError;

/// A validated path into the resource hierarchy.
///
/// Components are separated by `/` and must be valid Unicode identifiers
/// (per UAX#31) or purely numeric strings. This covers idShort-style local
/// identifiers (`Temperature`, `Sensor_1`) as well as index segments.
#[derive(Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Path {
    pub components: Vec<String>,
}

impl Path {
    /// The empty (root) path.
    pub fn root() -> Self {
        Path {
            components: Vec::new(),
        }
    }

    /// Parse a path string, validating each component.
    ///
    /// Empty components are dropped, so `a//b` and `a/b/` normalize to
    /// `a/b`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use twinreg_tree::Path;
    ///
    /// let path = Path::parse("shells/S1/submodels").unwrap();
    /// assert_eq!(path.len(), 3);
    /// assert_eq!(Path::parse("a/b/").unwrap(), Path::parse("a/b").unwrap());
    /// ```
    pub fn parse(s: &str) -> Result<Self, PathError> {
        let components: Vec<String> = s
            .split('/')
            .filter(|c| !c.is_empty())
            .map(|c| c.to_string())
            .collect();

        for (i, component) in components.iter().enumerate() {
            Self::validate_component(component, i)?;
        }

        Ok(Path { components })
    }

    /// Create a path from components, validating each.
    pub fn try_from_components(components: Vec<String>) -> Result<Self, PathError> {
        for (i, component) in components.iter().enumerate() {
            Self::validate_component(component, i)?;
        }
        Ok(Path { components })
    }

    fn validate_component(component: &str, position: usize) -> Result<(), PathError> {
        if component.is_empty() {
            return Err(PathError::InvalidComponent {
                component: component.to_string(),
                position,
                message: "empty component".to_string(),
            });
        }

        // Pure numeric segments are allowed for indexing.
        if component.chars().all(|c| c.is_ascii_digit()) {
            return Ok(());
        }

        let mut chars = component.chars();
        let first = chars.next().unwrap();

        let valid_start = unicode_ident::is_xid_start(first)
            || (first == '_'
                && chars
                    .clone()
                    .next()
                    .is_some_and(unicode_ident::is_xid_continue));

        if !valid_start {
            return Err(PathError::InvalidComponent {
                component: component.to_string(),
                position,
                message: "must start with a letter or underscore followed by letter/digit"
                    .to_string(),
            });
        }

        for c in chars {
            if !unicode_ident::is_xid_continue(c) {
                return Err(PathError::InvalidComponent {
                    component: component.to_string(),
                    position,
                    message: format!("invalid character '{}' in identifier", c),
                });
            }
        }

        Ok(())
    }

    /// True for the root path.
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Number of components.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Iterate over components.
    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.components.iter()
    }

    /// The last component, if any.
    pub fn last(&self) -> Option<&str> {
        self.components.last().map(String::as_str)
    }

    /// The path without its last component. Root yields root.
    #[must_use]
    pub fn parent(&self) -> Path {
        let len = self.components.len().saturating_sub(1);
        Path {
            components: self.components[..len].to_vec(),
        }
    }

    /// This path extended by one already-validated component.
    #[must_use]
    pub(crate) fn child(&self, local_id: &str) -> Path {
        let mut components = self.components.clone();
        components.push(local_id.to_string());
        Path { components }
    }

    /// Concatenation of this path and another.
    #[must_use]
    pub fn join(&self, other: &Path) -> Path {
        let mut components = self.components.clone();
        components.extend(other.components.iter().cloned());
        Path { components }
    }

    /// Check whether `prefix` is a leading sub-path of this path.
    pub fn has_prefix(&self, prefix: &Path) -> bool {
        prefix.components.len() <= self.components.len()
            && prefix.components == self.components[..prefix.components.len()]
    }

    /// Strip a leading sub-path, or `None` if it does not match.
    #[must_use]
    pub fn strip_prefix(&self, prefix: &Path) -> Option<Path> {
        if self.has_prefix(prefix) {
            Some(Path {
                components: self.components[prefix.components.len()..].to_vec(),
            })
        } else {
            None
        }
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.components.join("/"))
    }
}

impl std::ops::Index<usize> for Path {
    type Output = String;

    fn index(&self, i: usize) -> &Self::Output {
        &self.components[i]
    }
}

/// Macro for path literals.
///
/// # Example
///
/// ```rust
/// use twinreg_tree::path;
///
/// let p = path!("shells/S1");
/// assert_eq!(p.len(), 2);
/// ```
#[macro_export]
macro_rules! path {
    ($s:expr) => {
        $crate::Path::parse($s).expect("invalid path literal")
    };
}
