use crate::config::TrackDisplayField;

/// Build a display string for a track according to the provided `fields` and separator.
///
/// This composes metadata fields (artist, title, album, genre) in the
/// configured order and falls back to `title` when no parts were produced.
pub fn display_from_fields(
    title: &str,
    artist: Option<&str>,
    album: Option<&str>,
    genre: Option<&str>,
    fields: &[TrackDisplayField],
    sep: &str,
) -> String {
    fn non_empty(v: Option<&str>) -> Option<&str> {
        v.map(str::trim).filter(|s| !s.is_empty())
    }

    let parts: Vec<&str> = fields
        .iter()
        .filter_map(|f| match f {
            TrackDisplayField::Title => non_empty(Some(title)),
            TrackDisplayField::Artist => non_empty(artist),
            TrackDisplayField::Album => non_empty(album),
            TrackDisplayField::Genre => non_empty(genre),
        })
        .collect();

    if parts.is_empty() {
        title.to_string()
    } else {
        parts.join(sep)
    }
}
