//! Page location and return path types.

use core::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

/// Errors that can occur when parsing a [`PageLocation`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LocationError {
    /// The input string is empty.
    #[error("location cannot be empty")]
    Empty,
    /// The input is neither an absolute URL nor a root-relative path.
    #[error("location must be an absolute URL or start with '/': {0}")]
    NotRootRelative(String),
}

/// The page the user is currently on: its path and query string.
///
/// Mirrors what a browser exposes as `location.pathname` and
/// `location.search` (without the leading `?`). Fragments are discarded.
///
/// ## Examples
///
/// ```
/// use shopfront_core::PageLocation;
///
/// let loc = PageLocation::parse("/products/tea?variant=2#reviews").unwrap();
/// assert_eq!(loc.path(), "/products/tea");
/// assert_eq!(loc.query(), "variant=2");
/// assert_eq!(loc.return_path(), "/products/tea?variant=2");
///
/// let loc = PageLocation::parse("https://shop.example/cart").unwrap();
/// assert_eq!(loc.return_path(), "/cart");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct PageLocation {
    path: String,
    query: String,
}

impl PageLocation {
    /// Parse a location from an absolute URL or a root-relative path.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, or is not an absolute URL and
    /// does not start with `/`.
    pub fn parse(s: &str) -> Result<Self, LocationError> {
        if s.is_empty() {
            return Err(LocationError::Empty);
        }

        if !s.starts_with('/') {
            let url = Url::parse(s)
                .ok()
                .filter(|url| !url.cannot_be_a_base())
                .ok_or_else(|| LocationError::NotRootRelative(s.to_owned()))?;
            return Ok(Self::from(&url));
        }

        let without_fragment = s.split_once('#').map_or(s, |(head, _)| head);
        let (path, query) = without_fragment
            .split_once('?')
            .unwrap_or((without_fragment, ""));

        Ok(Self {
            path: path.to_owned(),
            query: query.to_owned(),
        })
    }

    /// The root page (`/`) with no query.
    #[must_use]
    pub fn root() -> Self {
        Self {
            path: "/".to_owned(),
            query: String::new(),
        }
    }

    /// Returns the path component, always starting with `/`.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the query string without the leading `?`; empty if none.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Path plus `?query`, the value stored as the redirect-after-login marker.
    #[must_use]
    pub fn return_path(&self) -> String {
        if self.query.is_empty() {
            self.path.clone()
        } else {
            format!("{}?{}", self.path, self.query)
        }
    }
}

impl Default for PageLocation {
    fn default() -> Self {
        Self::root()
    }
}

impl From<&Url> for PageLocation {
    fn from(url: &Url) -> Self {
        Self {
            path: url.path().to_owned(),
            query: url.query().unwrap_or_default().to_owned(),
        }
    }
}

impl fmt::Display for PageLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.return_path())
    }
}

impl std::str::FromStr for PageLocation {
    type Err = LocationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Errors that can occur when validating a [`ReturnPath`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ReturnPathError {
    /// The stored value is empty.
    #[error("return path cannot be empty")]
    Empty,
    /// The stored value is too long.
    #[error("return path must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The stored value does not start with `/`.
    #[error("return path must start with '/'")]
    NotRootRelative,
    /// The stored value would leave the site (`//host` or a backslash).
    #[error("return path must stay on the same origin")]
    CrossOrigin,
}

/// A same-origin path to send the user back to after signing in.
///
/// This is the validated form of the redirect-after-login marker, read back
/// by the sign-in flow. Storage is writable by any script on the page, so the
/// value is checked before it is used as a navigation target.
///
/// ## Constraints
///
/// - Length: 1-2048 characters (Unicode scalar values, not bytes)
/// - Must start with `/`
/// - Must not start with `//` and must not contain `\`
///
/// ## Examples
///
/// ```
/// use shopfront_core::ReturnPath;
///
/// assert!(ReturnPath::parse("/cart?step=2").is_ok());
///
/// assert!(ReturnPath::parse("").is_err());
/// assert!(ReturnPath::parse("https://evil.example").is_err());
/// assert!(ReturnPath::parse("//evil.example").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct ReturnPath(String);

impl ReturnPath {
    /// Maximum length of a return path.
    pub const MAX_LENGTH: usize = 2048;

    /// Validate a return path.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, longer than 2048 characters,
    /// not root-relative, or protocol-relative.
    pub fn parse(s: &str) -> Result<Self, ReturnPathError> {
        if s.is_empty() {
            return Err(ReturnPathError::Empty);
        }

        if s.chars().count() > Self::MAX_LENGTH {
            return Err(ReturnPathError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        if !s.starts_with('/') {
            return Err(ReturnPathError::NotRootRelative);
        }

        if s.starts_with("//") || s.contains('\\') {
            return Err(ReturnPathError::CrossOrigin);
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the path as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `ReturnPath` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ReturnPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ReturnPath {
    type Err = ReturnPathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for ReturnPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
