//! Pure row derivation: domain extraction, free-text filtering,
//! sorting, and display abbreviation.
//!
//! Everything here is side-effect-free and idempotent; the table view
//! re-derives its rows from the store on every render.

use credscope_models::Record;

/// Displayed when a URL yields no usable host.
pub const DOMAIN_SENTINEL: &str = "N/A";

/// Character budget for abbreviated email/password cells.
pub const ABBREVIATION_BUDGET: usize = 15;

/// Derive a bare hostname from a possibly-malformed URL string.
///
/// Strips an optional `http://`/`https://` scheme and a leading `www.`
/// (both case-insensitive), then takes the run up to the first `/` or
/// whitespace. Empty or unparseable input yields [`DOMAIN_SENTINEL`].
pub fn extract_domain(url: &str) -> String {
    let rest = strip_prefix_ignore_case(url, "https://")
        .or_else(|| strip_prefix_ignore_case(url, "http://"))
        .unwrap_or(url);
    let rest = strip_prefix_ignore_case(rest, "www.").unwrap_or(rest);

    let end = rest
        .find(|c: char| c == '/' || c.is_whitespace())
        .unwrap_or(rest.len());
    let host = &rest[..end];

    if host.is_empty() {
        DOMAIN_SENTINEL.to_string()
    } else {
        host.to_string()
    }
}

fn strip_prefix_ignore_case<'a>(text: &'a str, prefix: &str) -> Option<&'a str> {
    // A prefix-length offset inside a multi-byte character cannot
    // match an ASCII prefix; get() returns None there instead of
    // panicking.
    let head = text.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix)
        .then(|| &text[prefix.len()..])
}

/// Truncate `text` to `budget` characters with a trailing ellipsis.
/// Text within the budget is returned verbatim.
pub fn abbreviate(text: &str, budget: usize) -> String {
    if is_truncated(text, budget) {
        let head: String = text.chars().take(budget).collect();
        format!("{head}...")
    } else {
        text.to_string()
    }
}

/// Whether [`abbreviate`] would shorten `text` — controls the copy affordance.
pub fn is_truncated(text: &str, budget: usize) -> bool {
    text.chars().count() > budget
}

/// Column a table sort can be keyed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Email,
    Password,
    Url,
    Domain,
    Risk,
}

impl SortKey {
    /// Cycle order used by the UI.
    pub const ALL: [SortKey; 5] = [
        SortKey::Email,
        SortKey::Password,
        SortKey::Url,
        SortKey::Domain,
        SortKey::Risk,
    ];

    pub fn next(self) -> SortKey {
        let idx = Self::ALL.iter().position(|k| *k == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn label(self) -> &'static str {
        match self {
            SortKey::Email => "email",
            SortKey::Password => "password",
            SortKey::Url => "url",
            SortKey::Domain => "domain",
            SortKey::Risk => "risk",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn reversed(self) -> SortDirection {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// Whether `filter` (case-insensitive) is a substring of any searchable
/// facet of `record`: email, password, url, derived domain, or the
/// severity label. An empty filter matches everything.
pub fn matches_filter(record: &Record, filter: &str) -> bool {
    if filter.is_empty() {
        return true;
    }
    let needle = filter.to_lowercase();
    let severity = record.severity.map(|s| s.label()).unwrap_or("");

    [record.email.as_str(), record.password.as_str(), record.url.as_str(), severity]
        .iter()
        .any(|haystack| haystack.to_lowercase().contains(&needle))
        || extract_domain(&record.url).to_lowercase().contains(&needle)
}

fn sort_value(record: &Record, key: SortKey) -> String {
    match key {
        SortKey::Email => record.email.clone(),
        SortKey::Password => record.password.clone(),
        SortKey::Url => record.url.clone(),
        SortKey::Domain => extract_domain(&record.url),
        SortKey::Risk => record
            .severity
            .map(|s| s.label().to_string())
            .unwrap_or_default(),
    }
}

/// Derive the rows to render: filter, then (stably) sort.
///
/// No sort key set preserves fetch order. Comparison is case-sensitive
/// ordinal on the keyed field; `Desc` inverts it.
pub fn visible_rows<'a>(
    records: &'a [Record],
    filter: &str,
    sort: Option<(SortKey, SortDirection)>,
) -> Vec<&'a Record> {
    let mut rows: Vec<&Record> = records
        .iter()
        .filter(|record| matches_filter(record, filter))
        .collect();

    if let Some((key, direction)) = sort {
        rows.sort_by(|a, b| {
            let ordering = sort_value(a, key).cmp(&sort_value(b, key));
            match direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });
    }

    rows
}
