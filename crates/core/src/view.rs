//! Presentation hints computed for public project view-models.

use serde::Serialize;

/// Characters of content read per minute when estimating reading time.
const CHARS_PER_MINUTE: usize = 1000;

/// How a project card should be rendered.
///
/// Priority is image, then music, then text. A project with none of the three
/// renders its title only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CardDisplay {
    Image,
    Music,
    Text,
    TitleOnly,
}

impl CardDisplay {
    pub fn classify(has_image: bool, has_music: bool, has_text: bool) -> Self {
        if has_image {
            Self::Image
        } else if has_music {
            Self::Music
        } else if has_text {
            Self::Text
        } else {
            Self::TitleOnly
        }
    }
}

/// Estimated reading time in whole minutes, never less than one.
pub fn reading_minutes(content: Option<&str>) -> u32 {
    let chars = content.map_or(0, |c| c.chars().count());
    let minutes = chars.div_ceil(CHARS_PER_MINUTE).max(1);
    u32::try_from(minutes).unwrap_or(u32::MAX)
}

/// Split long-form content into paragraphs on blank lines.
pub fn paragraphs(content: &str) -> Vec<&str> {
    content
        .split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect()
}
