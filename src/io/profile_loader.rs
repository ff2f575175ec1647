use crate::math::Real;
use crate::shape::{Profile, ProfileError};
use std::fs;
use std::path::Path;

/// Errors raised while reading a profile.
#[derive(thiserror::Error, Debug)]
pub enum LoadError {
    /// The file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// A data line does not have exactly two columns.
    #[error("line {line}: expected 2 columns, found {found}.")]
    ColumnCount {
        /// One-based line number.
        line: usize,
        /// Number of columns found.
        found: usize,
    },
    /// A value could not be parsed as a number.
    #[error("line {line}: invalid number `{token}`.")]
    InvalidNumber {
        /// One-based line number.
        line: usize,
        /// The offending token.
        token: String,
    },
    /// The parsed nodes do not form a valid profile.
    #[error("invalid profile: {0}")]
    Profile(#[from] ProfileError),
}

/// Layout of a profile text file.
///
/// A file is a list of lines holding the lateral and the vertical coordinate of one node,
/// separated by whitespace. Blank lines and lines starting with `#` are ignored.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct ProfileFormat {
    /// Number of leading lines to skip unconditionally.
    pub skip_rows: usize,
    /// Negate the vertical coordinate, for files measuring it downward.
    pub flip_vertical: bool,
}

impl ProfileFormat {
    /// Rail profile files: no header, z measured downward.
    pub fn rail() -> Self {
        Self {
            skip_rows: 0,
            flip_vertical: true,
        }
    }

    /// Wheel profile files: a two-line header, z measured downward.
    pub fn wheel() -> Self {
        Self {
            skip_rows: 2,
            flip_vertical: true,
        }
    }
}

/// Parses a profile from the contents of a profile file.
///
/// The nodes are returned in file order; see [`Profile::sorted`] to sort them.
pub fn parse_profile(text: &str, format: &ProfileFormat) -> Result<Profile, LoadError> {
    let mut ys = Vec::new();
    let mut zs = Vec::new();

    for (i, line) in text.lines().enumerate().skip(format.skip_rows) {
        let line_number = i + 1;
        let line = line.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() != 2 {
            return Err(LoadError::ColumnCount {
                line: line_number,
                found: tokens.len(),
            });
        }

        let parse = |token: &str| {
            token
                .parse::<Real>()
                .map_err(|_| LoadError::InvalidNumber {
                    line: line_number,
                    token: token.to_string(),
                })
        };

        ys.push(parse(tokens[0])?);
        zs.push(parse(tokens[1])?);
    }

    let profile = Profile::from_coordinates(ys, zs)?;

    if format.flip_vertical {
        Ok(profile.flipped_vertical())
    } else {
        Ok(profile)
    }
}

/// Reads a profile file from disk.
pub fn load_profile(path: impl AsRef<Path>, format: &ProfileFormat) -> Result<Profile, LoadError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    let profile = parse_profile(&text, format)?;
    log::debug!("loaded {} nodes from {}", profile.len(), path.display());
    Ok(profile)
}
