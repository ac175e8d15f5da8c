//! Path normalization, query parsing, and link classification.
//!
//! Paths arrive from the address bar and from authored links, so they
//! carry stray whitespace, doubled slashes, inconsistent trailing
//! slashes, and a small set of recurring misspellings. `normalize`
//! folds all of that into the one canonical spelling per route that the
//! route table is keyed by.

/// Ordered alias table: exact non-canonical spellings and the canonical
/// path each one folds into. Applied after trailing-slash collapsing.
///
/// The canonical forms themselves (`/`, `/news`, `/news/live`,
/// `/news/item`, `/login/`, `/dash/admin/`, `/dash/student`) are fixed
/// points of `normalize`.
const ALIASES: &[(&str, &str)] = &[
    // Routes whose canonical form requires a trailing slash.
    ("/login", "/login/"),
    ("/dash/admin", "/dash/admin/"),
    // Routes whose canonical form has none.
    ("/news/", "/news"),
    ("/news/live/", "/news/live"),
    ("/news/item/", "/news/item"),
    ("/dash/student/", "/dash/student"),
    // Recurring misspellings seen in authored links.
    ("/dash/adimn", "/dash/admin/"),
    ("/dash/adimn/", "/dash/admin/"),
    ("/dash/studnet", "/dash/student"),
    ("/dash/studnet/", "/dash/student"),
];

/// Canonicalize a raw path.
///
/// Trims whitespace, collapses repeated trailing slashes to exactly one
/// (the root stays `/`), then applies the alias table. Pure and
/// idempotent; callers that see the path change must rewrite the visible
/// address with a history *replace*, never a push.
pub fn normalize(raw: &str) -> String {
    let mut path = raw.trim().to_string();
    if path.is_empty() {
        return "/".to_string();
    }
    if path.len() > 1 && path.ends_with('/') {
        while path.ends_with('/') {
            path.pop();
        }
        if path.is_empty() {
            return "/".to_string();
        }
        path.push('/');
    }
    for (alias, canonical) in ALIASES {
        if path == *alias {
            return (*canonical).to_string();
        }
    }
    path
}

/// Split a navigation target into its path and optional query string
/// (without the leading `?`). Fragments are dropped.
pub fn split_target(target: &str) -> (&str, Option<&str>) {
    let target = match target.find('#') {
        Some(i) => &target[..i],
        None => target,
    };
    match target.find('?') {
        Some(i) => (&target[..i], Some(&target[i + 1..])),
        None => (target, None),
    }
}

/// Parse a query string into key/value pairs. Keys without `=` map to
/// the empty string.
pub fn parse_query(query: &str) -> Vec<(String, String)> {
    query
        .split('&')
        .filter(|part| !part.is_empty())
        .map(|part| match part.find('=') {
            Some(i) => (part[..i].to_string(), part[i + 1..].to_string()),
            None => (part.to_string(), String::new()),
        })
        .collect()
}

/// Look up a single query parameter.
pub fn query_param(query: Option<&str>, key: &str) -> Option<String> {
    let query = query?;
    parse_query(query)
        .into_iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v)
}

/// The news-item id for a render: the `id` query parameter, falling
/// back to a purely numeric trailing path segment (`/news/item/42`).
pub fn item_id(path: &str, query: Option<&str>) -> Option<String> {
    if let Some(id) = query_param(query, "id") {
        if !id.is_empty() {
            return Some(id);
        }
    }
    let last = path.split('/').filter(|s| !s.is_empty()).next_back()?;
    if !last.is_empty() && last.bytes().all(|b| b.is_ascii_digit()) {
        return Some(last.to_string());
    }
    None
}

/// Whether a link target leaves the document's origin.
///
/// Absolute URLs with a different origin (and scheme-only targets like
/// `mailto:`) are never intercepted -- default navigation proceeds.
/// Relative and same-origin targets are ours.
pub fn is_external(href: &str, origin: &str) -> bool {
    let href = href.trim();
    let origin = origin.trim_end_matches('/');

    if let Some(rest) = href.strip_prefix("//") {
        let host = rest.split(['/', '?', '#']).next().unwrap_or("");
        let origin_host = origin.split("://").nth(1).unwrap_or(origin);
        return !host.eq_ignore_ascii_case(origin_host);
    }
    if let Some(idx) = href.find("://") {
        let after = &href[idx + 3..];
        let href_origin = match after.find(['/', '?', '#']) {
            Some(i) => &href[..idx + 3 + i],
            None => href,
        };
        return !href_origin.eq_ignore_ascii_case(origin);
    }
    // Scheme-only targets (mailto:, tel:) have a colon before any slash.
    if let Some(colon) = href.find(':') {
        if !href[..colon].contains('/') {
            return true;
        }
    }
    false
}

/// Reduce a same-origin absolute link to its path-and-query form.
/// Relative targets come back unchanged.
pub fn strip_origin<'a>(href: &'a str, origin: &str) -> &'a str {
    let origin = origin.trim_end_matches('/');
    match href.trim().strip_prefix(origin) {
        Some("") => "/",
        Some(rest) if rest.starts_with(['/', '?', '#']) => rest,
        _ => href,
    }
}
