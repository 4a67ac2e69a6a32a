use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::de;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::plugin_config::error::VersionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
struct VersionNumber {
    major: u32,
    minor: u32,
    patch: u32,
}

/// Represents a plugin version such as `1.2.3`, or the null version.
///
/// The null version stands for "not set" and is distinct from every concrete
/// version, including `0.0.0`. Versions order lexicographically by major,
/// minor and patch; the null version orders before all of them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VersionInfo {
    number: Option<VersionNumber>,
}

impl VersionInfo {
    /// Creates a new version
    pub fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            number: Some(VersionNumber { major, minor, patch }),
        }
    }

    /// Creates the null version
    pub fn null() -> Self {
        Self { number: None }
    }

    pub fn is_null(&self) -> bool {
        self.number.is_none()
    }

    /// A version is valid when it is set. Every combination of components
    /// is a well-formed version.
    pub fn is_valid(&self) -> bool {
        !self.is_null()
    }

    pub fn major(&self) -> Option<u32> {
        self.number.map(|n| n.major)
    }

    pub fn minor(&self) -> Option<u32> {
        self.number.map(|n| n.minor)
    }

    pub fn patch(&self) -> Option<u32> {
        self.number.map(|n| n.patch)
    }

    /// Checks that `min` and `max` form an inclusive range: both valid and
    /// `min <= max`. Equal bounds accept exactly one version.
    pub fn is_range_valid(min: &VersionInfo, max: &VersionInfo) -> bool {
        min.is_valid() && max.is_valid() && min <= max
    }

    /// Checks if this version satisfies an exact version requirement
    pub fn is_compatible_exact(&self, required: &VersionInfo) -> bool {
        self.is_valid() && required.is_valid() && self == required
    }

    /// Checks if this version lies within the inclusive range `[min, max]`
    pub fn is_compatible_range(&self, min: &VersionInfo, max: &VersionInfo) -> bool {
        self.is_valid() && Self::is_range_valid(min, max) && min <= self && self <= max
    }
}

impl FromStr for VersionInfo {
    type Err = VersionError;

    /// Parses a version string like "1.2.3"
    fn from_str(version: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = version.trim().split('.').collect();
        if parts.len() != 3 {
            return Err(VersionError::InvalidFormat(version.to_string()));
        }

        // u32::from_str accepts a leading '+', so check the digits first
        let parse_part = |part: &str| -> Result<u32, VersionError> {
            let invalid = || VersionError::InvalidComponent {
                version: version.to_string(),
                component: part.to_string(),
            };
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid());
            }
            part.parse::<u32>().map_err(|_| invalid())
        };

        let major = parse_part(parts[0])?;
        let minor = parse_part(parts[1])?;
        let patch = parse_part(parts[2])?;

        Ok(Self::new(major, minor, patch))
    }
}

impl fmt::Display for VersionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.number {
            Some(n) => write!(f, "{}.{}.{}", n.major, n.minor, n.patch),
            None => write!(f, "<null>"),
        }
    }
}

/// Pre-release and build metadata are dropped.
impl From<semver::Version> for VersionInfo {
    fn from(version: semver::Version) -> Self {
        match (
            u32::try_from(version.major),
            u32::try_from(version.minor),
            u32::try_from(version.patch),
        ) {
            (Ok(major), Ok(minor), Ok(patch)) => Self::new(major, minor, patch),
            _ => {
                log::warn!("Version '{}' does not fit into a plugin version, treating it as null", version);
                Self::null()
            }
        }
    }
}

impl TryFrom<VersionInfo> for semver::Version {
    type Error = VersionError;

    fn try_from(version: VersionInfo) -> Result<Self, Self::Error> {
        let n = version.number.ok_or(VersionError::NullVersion)?;
        Ok(semver::Version::new(
            u64::from(n.major),
            u64::from(n.minor),
            u64::from(n.patch),
        ))
    }
}

/// Set versions serialize as their "1.2.3" string, the null version as none.
impl Serialize for VersionInfo {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.number {
            Some(_) => serializer.collect_str(self),
            None => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for VersionInfo {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            Some(text) => text.parse().map_err(de::Error::custom),
            None => Ok(Self::null()),
        }
    }
}

/// The acceptable version(s) of a plugin: one exact version or an inclusive
/// range.
///
/// A plugin config can only ever be in one of the two modes; switching modes
/// replaces the whole value.
///
/// Two specs are equal when their version, lower bound and upper bound views
/// are equal, so an exact spec with a null version equals a range with two
/// null bounds.
#[derive(Debug, Clone, Copy)]
pub enum VersionSpec {
    Exact(VersionInfo),
    Range { min: VersionInfo, max: VersionInfo },
}

impl VersionSpec {
    pub fn exact(version: VersionInfo) -> Self {
        VersionSpec::Exact(version)
    }

    pub fn range(min: VersionInfo, max: VersionInfo) -> Self {
        VersionSpec::Range { min, max }
    }

    /// The exact version, or null in range mode
    pub fn version(&self) -> VersionInfo {
        match self {
            VersionSpec::Exact(version) => *version,
            VersionSpec::Range { .. } => VersionInfo::null(),
        }
    }

    /// The lower bound, or null in exact mode
    pub fn min_version(&self) -> VersionInfo {
        match self {
            VersionSpec::Exact(_) => VersionInfo::null(),
            VersionSpec::Range { min, .. } => *min,
        }
    }

    /// The upper bound, or null in exact mode
    pub fn max_version(&self) -> VersionInfo {
        match self {
            VersionSpec::Exact(_) => VersionInfo::null(),
            VersionSpec::Range { max, .. } => *max,
        }
    }

    /// True iff a version is set and both bounds are null
    pub fn is_exact(&self) -> bool {
        !self.version().is_null() && self.min_version().is_null() && self.max_version().is_null()
    }

    /// True iff the version is null and both bounds are set
    pub fn is_range(&self) -> bool {
        self.version().is_null() && !self.min_version().is_null() && !self.max_version().is_null()
    }

    /// Anything that is not a set exact version is held to the range rule,
    /// so an exact spec with a null version or a range with a null bound fails.
    pub fn is_valid(&self) -> bool {
        if self.is_exact() {
            self.version().is_valid()
        } else {
            VersionInfo::is_range_valid(&self.min_version(), &self.max_version())
        }
    }

    /// Checks if a concrete plugin version satisfies this requirement
    pub fn accepts(&self, version: &VersionInfo) -> bool {
        match self {
            VersionSpec::Exact(required) => version.is_compatible_exact(required),
            VersionSpec::Range { min, max } => version.is_compatible_range(min, max),
        }
    }
}

impl PartialEq for VersionSpec {
    fn eq(&self, other: &Self) -> bool {
        self.version() == other.version()
            && self.min_version() == other.min_version()
            && self.max_version() == other.max_version()
    }
}

impl Eq for VersionSpec {}

impl Hash for VersionSpec {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.version().hash(state);
        self.min_version().hash(state);
        self.max_version().hash(state);
    }
}

impl Default for VersionSpec {
    fn default() -> Self {
        VersionSpec::Exact(VersionInfo::null())
    }
}

impl fmt::Display for VersionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionSpec::Exact(version) => write!(f, "={}", version),
            VersionSpec::Range { min, max } => write!(f, "[{}, {}]", min, max),
        }
    }
}
