//! Accept-Language Parsing
//!
//! Turns an `Accept-Language` header into tags ordered by client preference.

use langdetect_log::trace;

/// One parsed `Accept-Language` entry.
#[derive(Debug, Clone, PartialEq)]
pub struct AcceptedLanguage {
    /// Sanitized language tag, e.g. `"de-DE"`
    pub tag: String,
    /// Quality value in `[0, 1]`, `1.0` when not given
    pub quality: f32,
}

impl AcceptedLanguage {
    /// Two-letter language code for this entry.
    ///
    /// The tag is lower-cased; a tag starting with `xx-yy` is reduced to
    /// its first two letters. Other tags are returned whole.
    ///
    /// ```
    /// use langdetect::AcceptedLanguage;
    ///
    /// let entry = AcceptedLanguage { tag: "de-DE".into(), quality: 1.0 };
    /// assert_eq!(entry.iso2(), "de");
    ///
    /// let entry = AcceptedLanguage { tag: "es-419".into(), quality: 1.0 };
    /// assert_eq!(entry.iso2(), "es-419");
    /// ```
    pub fn iso2(&self) -> String {
        let tag = self.tag.to_lowercase();
        if has_region_prefix(&tag) {
            tag[..2].to_string()
        } else {
            tag
        }
    }
}

/// `^[a-z]{2}-[a-z]{2}` on an already lower-cased tag.
fn has_region_prefix(tag: &str) -> bool {
    let bytes = tag.as_bytes();
    bytes.len() >= 5
        && bytes[..2].iter().all(u8::is_ascii_lowercase)
        && bytes[2] == b'-'
        && bytes[3..5].iter().all(u8::is_ascii_lowercase)
}

/// Parse an `Accept-Language` header.
///
/// Entries come back sorted by quality, highest first. Equal qualities keep
/// the order in which their tags first appeared. A tag listed twice keeps
/// its first position and the later quality. Quality values that are
/// missing or unparseable count as `1.0`; parsed values are clamped to
/// `[0, 1]`. Only the first parameter after the tag is read as the quality.
///
/// ```
/// use langdetect::parse_accept_language;
///
/// let entries = parse_accept_language("fr;q=0.5, de-DE, en;q=0.8");
/// let tags: Vec<_> = entries.iter().map(|e| e.tag.as_str()).collect();
/// assert_eq!(tags, ["de-DE", "en", "fr"]);
/// ```
pub fn parse_accept_language(header: &str) -> Vec<AcceptedLanguage> {
    let mut entries: Vec<AcceptedLanguage> = Vec::new();

    for part in header.split(',').map(str::trim) {
        let mut split = part.split(';').map(str::trim);
        let tag = split.next().unwrap_or_default();
        if tag.is_empty() {
            continue;
        }

        let quality = split.next().map(parse_quality).unwrap_or(1.0);

        match entries.iter_mut().find(|e| e.tag == tag) {
            Some(existing) => existing.quality = quality,
            None => entries.push(AcceptedLanguage {
                tag: tag.to_string(),
                quality,
            }),
        }
    }

    // Stable: ties keep header order.
    entries.sort_by(|a, b| b.quality.total_cmp(&a.quality));

    for entry in &mut entries {
        entry.tag = sanitize_tag(&entry.tag);
    }

    trace!(target: "langdetect::accept", "Parsed Accept-Language {:?} into {:?}", header, entries);

    entries
}

/// Quality from a `q=<float>` parameter: everything after the first two
/// characters.
fn parse_quality(param: &str) -> f32 {
    param
        .get(2..)
        .and_then(|value| value.trim().parse::<f32>().ok())
        .filter(|q| !q.is_nan())
        .map(|q| q.clamp(0.0, 1.0))
        .unwrap_or(1.0)
}

/// Drop every character other than ASCII letters, digits, `-` and the
/// umlauts `ä Ä ö Ö ü Ü`.
///
/// ```
/// use langdetect::sanitize_tag;
///
/// assert_eq!(sanitize_tag("de-DE<script>"), "de-DEscript");
/// assert_eq!(sanitize_tag("en_US"), "enUS");
/// assert_eq!(sanitize_tag("Ümlaut-ä"), "Ümlaut-ä");
/// ```
pub fn sanitize_tag(tag: &str) -> String {
    tag.chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | 'ä' | 'Ä' | 'ö' | 'Ö' | 'ü' | 'Ü'))
        .collect()
}
