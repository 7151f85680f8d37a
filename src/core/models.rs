//! Song and lyric data types shared by the store, the catalog client and the
//! resolution engine.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{KaraokeError, Result};

/// Placeholder produced when a textual identifier cannot be parsed.
pub const UNKNOWN_SONG_ID: i64 = -1;

/// Validated song identifier. Only non-negative values are representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct SongId(i64);

impl SongId {
    pub fn new(raw: i64) -> Result<Self> {
        if raw < 0 {
            return Err(KaraokeError::invalid_identifier(raw));
        }
        Ok(SongId(raw))
    }

    pub fn get(self) -> i64 {
        self.0
    }

    /// Lenient parse used for route-style parameters: anything unparsable
    /// becomes [`UNKNOWN_SONG_ID`] and is rejected later by [`SongId::new`].
    pub fn parse_lenient(text: &str) -> i64 {
        text.trim().parse::<i64>().unwrap_or(UNKNOWN_SONG_ID)
    }
}

impl TryFrom<i64> for SongId {
    type Error = KaraokeError;

    fn try_from(raw: i64) -> Result<Self> {
        SongId::new(raw)
    }
}

impl From<SongId> for i64 {
    fn from(id: SongId) -> Self {
        id.0
    }
}

impl FromStr for SongId {
    type Err = KaraokeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().parse::<i64>() {
            Ok(raw) => SongId::new(raw),
            Err(_) => Err(KaraokeError::invalid_identifier(s)),
        }
    }
}

impl fmt::Display for SongId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One row of a chart, search result or downloaded-lyrics listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongEntry {
    #[serde(rename = "track_id")]
    pub id: i64,
    #[serde(rename = "track_name")]
    pub title: String,
    #[serde(rename = "track_artist")]
    pub artist: String,
}

/// Lyrics persisted for offline use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LyricRecord {
    pub id: SongId,
    pub title: String,
    pub artist: String,
    pub lyrics: String,
}

impl LyricRecord {
    pub fn new(id: SongId, title: impl Into<String>, artist: impl Into<String>, lyrics: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            artist: artist.into(),
            lyrics: lyrics.into(),
        }
    }

    pub fn to_entry(&self) -> SongEntry {
        SongEntry {
            id: self.id.get(),
            title: self.title.clone(),
            artist: self.artist.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CacheState {
    Cached,
    NotCached,
}

impl CacheState {
    pub fn as_str(&self) -> &'static str {
        match self {
            CacheState::Cached => "OFFLINE",
            CacheState::NotCached => "REMOTE",
        }
    }
}

/// Outcome of resolving one song's lyrics. Never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub lyrics: String,
    pub is_persisted: bool,
}

impl Resolution {
    pub fn state(&self) -> CacheState {
        if self.is_persisted {
            CacheState::Cached
        } else {
            CacheState::NotCached
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_song_id_rejects_negative() {
        assert!(SongId::new(0).is_ok());
        assert_eq!(SongId::new(42).unwrap().get(), 42);
        assert!(matches!(SongId::new(-1), Err(KaraokeError::InvalidIdentifier { .. })));
    }

    #[test]
    fn test_song_id_from_str() {
        assert_eq!("17".parse::<SongId>().unwrap().get(), 17);
        assert!("abc".parse::<SongId>().is_err());
        assert!("-3".parse::<SongId>().is_err());
    }

    #[test]
    fn test_parse_lenient_falls_back_to_unknown() {
        assert_eq!(SongId::parse_lenient("12"), 12);
        assert_eq!(SongId::parse_lenient("twelve"), UNKNOWN_SONG_ID);
        assert_eq!(SongId::parse_lenient(""), UNKNOWN_SONG_ID);
    }

    #[test]
    fn test_song_entry_wire_names() {
        let json = r#"[{"track_id": 5, "track_name": "Song A", "track_artist": "Artist A"}]"#;
        let entries: Vec<SongEntry> = serde_json::from_str(json).unwrap();
        assert_eq!(entries[0], SongEntry { id: 5, title: "Song A".into(), artist: "Artist A".into() });
    }

    #[test]
    fn test_resolution_state() {
        let cached = Resolution { lyrics: "x".into(), is_persisted: true };
        let remote = Resolution { lyrics: "x".into(), is_persisted: false };
        assert_eq!(cached.state(), CacheState::Cached);
        assert_eq!(remote.state(), CacheState::NotCached);
    }
}
