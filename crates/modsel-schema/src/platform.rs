//! Target platform names.

/// Target operating system of a build, used to pick a platform exclude bucket.
///
/// Platform names are free-form because the set of buckets is defined by the
/// build configuration, not by this crate. Some platforms are only aliases
/// for the kernel family they run on and share its exclude bucket.
///
/// # Example
///
/// ```
/// use modsel_schema::TargetOs;
///
/// let os = TargetOs::new("Tizen").unwrap();
/// assert_eq!(os.as_str(), "linux");
/// assert!(TargetOs::new("  ").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct TargetOs(String);

impl TargetOs {
    /// Normalize a platform name, returning `None` for an empty name.
    ///
    /// The name is trimmed and lowercased, then aliases are mapped to the
    /// platform whose bucket they share.
    pub fn new(name: &str) -> Option<Self> {
        let name = name.trim().to_lowercase();
        if name.is_empty() {
            return None;
        }
        Some(Self(Self::canonical(&name).to_string()))
    }

    fn canonical(name: &str) -> &str {
        match name {
            "tizen" => "linux",
            other => other,
        }
    }

    /// Name of the exclude bucket for this platform.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TargetOs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
