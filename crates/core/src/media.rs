//! Media URL resolution, object naming and per-category media conventions.

use serde::Serialize;

/// Name of the object-storage bucket holding project images.
pub const PROJECT_IMAGES_BUCKET: &str = "project_images";

/// Prefix under which uploads are stored inside the bucket.
pub const UPLOAD_PREFIX: &str = "public";

/// Whether `value` is already an absolute `http(s)` URL.
pub fn is_absolute_url(value: &str) -> bool {
    value.starts_with("http://") || value.starts_with("https://")
}

/// Resolve a stored image reference into an absolute URL.
///
/// - `None` or an empty string resolves to `None`.
/// - Absolute `http(s)` URLs pass through unchanged.
/// - Anything else is treated as a path inside the bucket and prefixed with
///   `public_base_url` (the bucket's public URL).
pub fn resolve_media_url(stored: Option<&str>, public_base_url: &str) -> Option<String> {
    let stored = stored.map(str::trim).filter(|s| !s.is_empty())?;
    if is_absolute_url(stored) {
        return Some(stored.to_string());
    }
    Some(format!(
        "{}/{}",
        public_base_url.trim_end_matches('/'),
        stored.trim_start_matches('/')
    ))
}

/// Recover the bucket object path from a stored image reference.
///
/// For absolute URLs this is everything after the `bucket` path segment
/// (query strings and fragments dropped). Relative values are already object
/// paths. Returns `None` when an absolute URL does not contain the bucket
/// segment, since no object can be derived from it.
pub fn storage_path_from_url(stored: &str, bucket: &str) -> Option<String> {
    let stored = stored.trim();
    if stored.is_empty() {
        return None;
    }

    if !is_absolute_url(stored) {
        return Some(stored.trim_start_matches('/').to_string());
    }

    let without_scheme = stored.split_once("://").map_or(stored, |(_, rest)| rest);
    let path = without_scheme
        .split_once('/')
        .map_or("", |(_, path)| path)
        .split(['?', '#'])
        .next()
        .unwrap_or("");

    let segments: Vec<&str> = path.split('/').collect();
    let bucket_index = segments.iter().position(|s| *s == bucket)?;
    let object_path = segments[bucket_index + 1..].join("/");
    if object_path.is_empty() {
        None
    } else {
        Some(object_path)
    }
}

/// Object path for a stored reference written by a store at `public_base_url`.
///
/// URLs under the store's own base are stripped of it; anything else falls
/// back to [`storage_path_from_url`].
pub fn object_path_for(stored: &str, public_base_url: &str, bucket: &str) -> Option<String> {
    let base = public_base_url.trim_end_matches('/');
    if let Some(rest) = stored.trim().strip_prefix(base).and_then(|r| r.strip_prefix('/')) {
        let rest = rest.split(['?', '#']).next().unwrap_or("");
        return (!rest.is_empty()).then(|| rest.to_string());
    }
    storage_path_from_url(stored, bucket)
}

/// Build a unique object name for an uploaded file.
///
/// Convention: `public/{unix_millis}-{random_hex}-{sanitized_file_name}`.
/// Characters other than ASCII alphanumerics, `.`, `_` and `-` become `-`.
/// The random segment keeps same-millisecond uploads of one file name apart.
pub fn upload_object_name(file_name: &str, unix_millis: i64) -> String {
    let base = file_name.rsplit(['/', '\\']).next().unwrap_or(file_name);
    let mut sanitized = String::with_capacity(base.len());
    for ch in base.chars() {
        let mapped = if ch.is_ascii_alphanumeric() || matches!(ch, '.' | '_' | '-') {
            ch
        } else {
            '-'
        };
        if mapped == '-' && sanitized.ends_with('-') {
            continue;
        }
        sanitized.push(mapped);
    }
    let sanitized = sanitized.trim_matches('-');
    let sanitized = if sanitized.is_empty() { "upload" } else { sanitized };

    let nonce = uuid::Uuid::new_v4().simple();
    format!("{UPLOAD_PREFIX}/{unix_millis}-{nonce}-{sanitized}")
}

/// The media field a category's projects are expected to populate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    Image,
    Music,
    Text,
}

impl MediaKind {
    /// Convention for the built-in sections. Unknown categories have none.
    pub fn for_category(category_slug: &str) -> Option<Self> {
        match category_slug {
            "art" | "architecture" => Some(Self::Image),
            "music" => Some(Self::Music),
            "literature" => Some(Self::Text),
            _ => None,
        }
    }

    /// Whether a project with the given populated fields follows this convention.
    pub fn is_satisfied_by(self, has_image: bool, has_music: bool, has_text: bool) -> bool {
        match self {
            Self::Image => has_image,
            Self::Music => has_music,
            Self::Text => has_text,
        }
    }
}
