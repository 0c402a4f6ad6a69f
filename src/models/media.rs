use serde::{Deserialize, Deserializer, Serialize};

/// Suggestion titles longer than this are shortened for display
pub const SUGGESTION_TITLE_MAX_CHARS: usize = 25;

/// Characters kept from a shortened title before the ellipsis
const SUGGESTION_TITLE_KEEP_CHARS: usize = 22;

/// Localized titles of an anime
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct MediaTitle {
    /// Romanized title, used as the display name
    #[serde(default, deserialize_with = "null_as_empty")]
    pub romaji: String,
    #[serde(default)]
    pub native: Option<String>,
    #[serde(default)]
    pub english: Option<String>,
}

/// Poster references at the sizes the catalog serves
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct CoverImage {
    #[serde(default)]
    pub extra_large: Option<String>,
    /// Poster for a committed selection or a match card
    #[serde(default)]
    pub large: Option<String>,
    /// Thumbnail for suggestion lists
    #[serde(default)]
    pub medium: Option<String>,
}

/// An anime as returned by the catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MediaRecord {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: MediaTitle,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub cover_image: CoverImage,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub genres: Vec<String>,
    /// Only requested by the genre search
    #[serde(default)]
    pub season_year: Option<i32>,
}

impl MediaRecord {
    /// Romaji title shortened for a suggestion row
    ///
    /// Titles over [`SUGGESTION_TITLE_MAX_CHARS`] characters keep their first 22
    /// characters followed by `...`. Counts characters, not bytes, so native
    /// scripts are never split mid-codepoint.
    pub fn short_title(&self) -> String {
        let romaji = &self.title.romaji;
        if romaji.chars().count() > SUGGESTION_TITLE_MAX_CHARS {
            let kept: String = romaji.chars().take(SUGGESTION_TITLE_KEEP_CHARS).collect();
            format!("{}...", kept)
        } else {
            romaji.clone()
        }
    }

    /// Large poster, falling back to the nearest size available
    pub fn poster(&self) -> Option<&str> {
        self.cover_image
            .large
            .as_deref()
            .or(self.cover_image.extra_large.as_deref())
            .or(self.cover_image.medium.as_deref())
    }

    /// Suggestion thumbnail, falling back to the nearest size available
    pub fn thumbnail(&self) -> Option<&str> {
        self.cover_image
            .medium
            .as_deref()
            .or(self.cover_image.large.as_deref())
    }
}

/// AniList sends `null` for some list and string fields
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

#[cfg(test)]
pub(crate) fn record(id: i64, romaji: &str, genres: &[&str], season_year: Option<i32>) -> MediaRecord {
    MediaRecord {
        id,
        title: MediaTitle {
            romaji: romaji.to_string(),
            native: None,
            english: None,
        },
        cover_image: CoverImage {
            extra_large: None,
            large: Some(format!("https://img.test/large/{}.jpg", id)),
            medium: Some(format!("https://img.test/medium/{}.jpg", id)),
        },
        genres: genres.iter().map(|g| g.to_string()).collect(),
        season_year,
    }
}
