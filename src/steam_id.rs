use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::parser::ProfileError;

const STEAM_ID_LEN: usize = 17;

/// Checks whether `candidate` is a numeric 64-bit Steam profile id.
///
/// Accepts anything with a string form (`&str`, `String`, integers), so
/// `is_steam_id(76561198287455504u64)` and `is_steam_id("76561198287455504")`
/// agree.
pub fn is_steam_id(candidate: impl fmt::Display) -> bool {
    is_steam_id_str(&candidate.to_string())
}

fn is_steam_id_str(s: &str) -> bool {
    s.len() == STEAM_ID_LEN && s.bytes().all(|b| b.is_ascii_digit())
}

/// A validated 17-digit Steam profile id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SteamId(String);

impl SteamId {
    pub fn parse(candidate: impl fmt::Display) -> Result<Self, ProfileError> {
        let s = candidate.to_string();
        if is_steam_id_str(&s) {
            Ok(Self(s))
        } else {
            Err(ProfileError::InvalidSteamId(s))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SteamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SteamId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for SteamId {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for SteamId {
    type Error = ProfileError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<SteamId> for String {
    fn from(id: SteamId) -> Self {
        id.0
    }
}
