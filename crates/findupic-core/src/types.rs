use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::Error;

/// Image container formats considered for hashing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    Jpeg,
    Png,
    Gif,
}

impl ImageFormat {
    /// Determine format from file extension.
    ///
    /// Matching is exact and case-sensitive: `JPG` or `Png` are not candidates.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "png" => Some(Self::Png),
            "gif" => Some(Self::Gif),
            _ => None,
        }
    }

    /// Determine format from the extension of a path
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }
}

/// A regular file yielded by the tree walker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredFile {
    /// Full path to the file
    pub path: PathBuf,

    /// File size in bytes
    pub size: u64,
}

/// Representation of a candidate image file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    /// Full path to the image file
    pub path: PathBuf,

    /// File size in bytes
    pub size: u64,

    /// Image format implied by the extension
    pub format: ImageFormat,
}

/// SHA-256 digest of a canonical RGBA raster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Digest([u8; 32]);

impl From<[u8; 32]> for Digest {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

impl FromStr for Digest {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::Configuration(format!("Invalid SHA-256 digest: {}", s));

        if s.len() != 64 || !s.is_ascii() {
            return Err(invalid());
        }

        let mut bytes = [0u8; 32];
        for (i, byte) in bytes.iter_mut().enumerate() {
            *byte = u8::from_str_radix(&s[i * 2..i * 2 + 2], 16).map_err(|_| invalid())?;
        }
        Ok(Self(bytes))
    }
}

/// Paths whose canonical rasters share one digest, in insertion order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateGroup {
    pub digest: Digest,
    pub paths: Vec<PathBuf>,
}

impl DuplicateGroup {
    pub fn new(digest: Digest) -> Self {
        Self {
            digest,
            paths: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Only groups with two or more members are shown to the user
    pub fn is_reportable(&self) -> bool {
        self.paths.len() > 1
    }
}

/// Mapping from digest to the group of paths sharing it.
///
/// Every successfully hashed image is present, singletons included. Groups
/// iterate in the order their digest was first seen, so output is stable for
/// a fixed input ordering.
#[derive(Debug, Clone, Default)]
pub struct ResultSet {
    groups: Vec<DuplicateGroup>,
    index: HashMap<Digest, usize>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `path` to the group for `digest`, creating the group on first use
    pub fn insert(&mut self, digest: Digest, path: PathBuf) -> &DuplicateGroup {
        let slot = *self.index.entry(digest).or_insert_with(|| {
            self.groups.push(DuplicateGroup::new(digest));
            self.groups.len() - 1
        });

        let group = &mut self.groups[slot];
        group.paths.push(path);
        group
    }

    pub fn get(&self, digest: &Digest) -> Option<&DuplicateGroup> {
        self.index.get(digest).map(|&slot| &self.groups[slot])
    }

    /// Number of distinct digests
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Number of images hashed into this set
    pub fn image_count(&self) -> usize {
        self.groups.iter().map(DuplicateGroup::len).sum()
    }

    /// All groups, singletons included
    pub fn groups(&self) -> &[DuplicateGroup] {
        &self.groups
    }

    /// Groups with two or more members
    pub fn reportable(&self) -> impl Iterator<Item = &DuplicateGroup> {
        self.groups.iter().filter(|group| group.is_reportable())
    }

    /// Number of redundant copies across all reportable groups
    pub fn duplicate_count(&self) -> usize {
        self.reportable().map(|group| group.len() - 1).sum()
    }
}

/// Stage at which a path failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A directory or entry could not be listed or stat'ed
    Traversal,
    /// The image file could not be opened or read
    Open,
    /// The file content is not a supported, well-formed image
    Decode,
}

/// A non-fatal failure recorded during a scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorRecord {
    pub path: PathBuf,
    pub kind: ErrorKind,
    pub message: String,
}

impl ErrorRecord {
    pub fn new(path: impl Into<PathBuf>, kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind,
            message: message.into(),
        }
    }

    /// Classify a per-file processing error
    pub fn from_error(path: impl Into<PathBuf>, error: &Error) -> Self {
        match error {
            Error::Io(e) => Self::new(path, ErrorKind::Open, e.to_string()),
            Error::Image(e) => Self::new(path, ErrorKind::Decode, e.to_string()),
            other => Self::new(path, ErrorKind::Decode, other.to_string()),
        }
    }
}

impl fmt::Display for ErrorRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let action = match self.kind {
            ErrorKind::Traversal => "error reading directory entry",
            ErrorKind::Open => "error opening image",
            ErrorKind::Decode => "error decoding image",
        };
        write!(f, "{} {}: {}", action, self.path.display(), self.message)
    }
}

/// Everything a scan produced
#[derive(Debug, Clone, Default)]
pub struct ScanReport {
    /// Digest groups for every image that hashed successfully
    pub results: ResultSet,

    /// Per-file and per-directory failures, in discovery order
    pub errors: Vec<ErrorRecord>,

    /// Number of candidate images that were attempted
    pub scanned: usize,

    /// Total size of the candidate images, in bytes
    pub bytes_scanned: u64,
}

impl ScanReport {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }
}
