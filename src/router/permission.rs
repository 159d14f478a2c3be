use std::collections::HashSet;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PermissionError {
    #[error("Permission requirement is empty; pass at least one permission")]
    EmptyRequirement,
}

/// Permission strings granted to the current user
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PermissionSet {
    granted: HashSet<String>,
}

impl PermissionSet {
    pub fn new<I, S>(granted: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            granted: granted.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, permission: &str) -> bool {
        self.granted.contains(permission)
    }

    pub fn is_empty(&self) -> bool {
        self.granted.is_empty()
    }

    pub fn len(&self) -> usize {
        self.granted.len()
    }

    /// Route rule: no requirement passes, otherwise any one match passes
    pub fn satisfies<S: AsRef<str>>(&self, required: &[S]) -> bool {
        required.is_empty() || self.has_any(required)
    }

    /// Gate rule: at least one of `required` is granted
    pub fn has_any<S: AsRef<str>>(&self, required: &[S]) -> bool {
        required.iter().any(|p| self.contains(p.as_ref()))
    }

    pub fn gate(&self) -> PermissionGate<'_> {
        PermissionGate { granted: self }
    }
}

impl From<Vec<String>> for PermissionSet {
    fn from(granted: Vec<String>) -> Self {
        Self::new(granted)
    }
}

/// Renders a piece of output only when the user holds one of the
/// required permissions.
pub struct PermissionGate<'a> {
    granted: &'a PermissionSet,
}

impl PermissionGate<'_> {
    pub fn allows<S: AsRef<str>>(&self, required: &[S]) -> Result<bool, PermissionError> {
        if required.is_empty() {
            return Err(PermissionError::EmptyRequirement);
        }
        Ok(self.granted.has_any(required))
    }

    pub fn render_if<S, T, F>(&self, required: &[S], render: F) -> Result<Option<T>, PermissionError>
    where
        S: AsRef<str>,
        F: FnOnce() -> T,
    {
        Ok(if self.allows(required)? { Some(render()) } else { None })
    }
}
