// src/filename.rs

//! Recording metadata carried in GazeBase-style file names.
//!
//! Names follow `S_<r><ppp>_S<y>_<z>_<www>.csv`:
//! - `r`   recording round (1-3)
//! - `ppp` participant id, zero padded (001-465)
//! - `y`   session (1-2)
//! - `z`   task category (1-5)
//! - `www` task code (VRG, PUR, VID, TEX, RAN)
//!
//! Values are not range checked. Anything that does not parse as an integer is
//! an error.

use std::{path::Path, str::FromStr};

use crate::error::{ConvertError, FileNameError};

/// Minimum number of `_`-separated tokens a stem must have.
const MIN_TOKENS: usize = 4;

/// Metadata derived from one recording's file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordingMeta {
    pub round: i8,
    pub participant: i16,
    pub session: i8,
    pub task: i8,
    /// Fifth token, e.g. `VRG`. Only persisted when asked for.
    pub task_code: Option<String>,
}

impl RecordingMeta {
    /// Parse a file stem (name without extension), e.g. `S_1001_S2_3_VID`.
    pub fn from_stem(stem: &str) -> Result<Self, FileNameError> {
        let tokens: Vec<&str> = stem.split('_').collect();
        if tokens.len() < MIN_TOKENS {
            return Err(FileNameError::TooFewTokens {
                expected: MIN_TOKENS,
                found: tokens.len(),
            });
        }

        // token 1: round digit followed by the participant id
        let mut chars = tokens[1].chars();
        let round_char = chars.next().ok_or_else(|| missing_char(1, tokens[1], 0))?;
        let round = parse_field("round", &round_char.to_string())?;
        let participant = parse_field("participant", chars.as_str())?;

        // token 2: `S<y>`
        let session_char = tokens[2]
            .chars()
            .nth(1)
            .ok_or_else(|| missing_char(2, tokens[2], 1))?;
        let session = parse_field("session", &session_char.to_string())?;

        let task = parse_field("task", tokens[3])?;

        Ok(Self {
            round,
            participant,
            session,
            task,
            task_code: tokens.get(4).map(|s| s.to_string()),
        })
    }

    /// Parse the metadata out of a full path, stripping the last extension.
    pub fn from_path(path: &Path) -> Result<Self, ConvertError> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy())
            .unwrap_or_default();
        Self::from_stem(&stem).map_err(|source| ConvertError::FileName { name, source })
    }
}

fn missing_char(token_index: usize, token: &str, position: usize) -> FileNameError {
    FileNameError::MissingChar {
        token_index,
        token: token.to_string(),
        position,
    }
}

fn parse_field<T>(field: &'static str, value: &str) -> Result<T, FileNameError>
where
    T: FromStr<Err = std::num::ParseIntError>,
{
    value.parse().map_err(|source| FileNameError::NotNumeric {
        field,
        value: value.to_string(),
        source,
    })
}
