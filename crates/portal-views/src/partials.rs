//! Shared markup partials: section headers, cards, dashboard nav.
//!
//! Plain string building, same as every other fragment in the portal.
//! Only attribute values are escaped; body text comes from the
//! school's own data files.

use portal_core::text::clean;

/// Escape a string for use inside a double-quoted attribute.
pub fn attr(value: &str) -> String {
    value.replace('&', "&amp;").replace('"', "&quot;")
}

/// A section heading with optional action links on the right.
pub fn section_header(title: &str, actions: &str) -> String {
    format!(
        "<section class=\"section-header\"><h2 class=\"section-title\">{title}</h2>\
         <div class=\"section-actions\">{actions}</div></section>"
    )
}

/// A content card: title, optional body, optional meta line, optional
/// leading image.
pub fn card(title: &str, body: Option<&str>, meta: Option<&str>, image_url: Option<&str>) -> String {
    let mut out = String::from("<article class=\"card\">");
    if let Some(url) = image_url {
        if !url.trim().is_empty() {
            out.push_str(&format!(
                "<div class=\"card-media\">{}</div>",
                image_or_nothing(url, "news-image")
            ));
        }
    }
    out.push_str("<div class=\"card-content\">");
    out.push_str(&format!("<h3 class=\"card-title\">{}</h3>", clean(title)));
    if let Some(body) = body {
        out.push_str(&format!("<p class=\"card-body\">{}</p>", clean(body)));
    }
    if let Some(meta) = meta {
        out.push_str(&format!("<div class=\"card-meta\">{meta}</div>"));
    }
    out.push_str("</div></article>");
    out
}

/// An image tag, or nothing when the URL is empty. Broken images are
/// the host stylesheet's problem, not ours.
pub fn image_or_nothing(url: &str, css_class: &str) -> String {
    if url.trim().is_empty() {
        return String::new();
    }
    format!(
        "<img src=\"{}\" alt=\"\" class=\"{css_class}\">",
        attr(url.trim())
    )
}

/// One dashboard side-nav entry.
pub struct NavItem {
    pub href: String,
    pub text: String,
    pub active: bool,
}

/// The dashboard side navigation.
pub fn side_nav(items: &[NavItem]) -> String {
    let mut out = String::from("<aside class=\"left-nav\"><nav class=\"side-nav\">");
    for item in items {
        let active = if item.active { " active" } else { "" };
        out.push_str(&format!(
            "<a href=\"{}\" data-link class=\"side-link{active}\">\
             <span class=\"side-text\">{}</span></a>",
            attr(&item.href),
            item.text
        ));
    }
    out.push_str("</nav></aside>");
    out
}

/// Dashboard layout: side nav next to the section content.
pub fn layout_with_nav(nav: &str, content: &str) -> String {
    format!(
        "<div class=\"dash-layout\">{nav}<section class=\"dash-content\">{content}</section></div>"
    )
}

/// The date-and-author meta line under cards.
pub fn meta_line(published_at: Option<&str>, author: Option<&str>) -> String {
    let date = published_at
        .map(portal_core::text::format_date)
        .unwrap_or_default();
    match author {
        Some(author) if !author.trim().is_empty() => {
            format!("{date} \u{2022} {}", clean(author))
        },
        _ => date,
    }
}

/// A muted inline note (empty lists, unavailable features).
pub fn note(text: &str) -> String {
    format!("<p class=\"note\">{text}</p>")
}

/// A "this thing does not exist" card. Distinct from the router's
/// error fragment: nothing failed.
pub fn not_found(title: &str, body: &str) -> String {
    format!("<section class=\"card\"><h3>{title}</h3>{}</section>", note(body))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attr_escapes_quotes_and_ampersands() {
        assert_eq!(attr(r#"a"b&c"#), "a&quot;b&amp;c");
    }

    #[test]
    fn card_with_everything() {
        let html = card(
            "Sports  day",
            Some("The annual\nsports day."),
            Some("2025-09-01"),
            Some("/img/sports.jpg"),
        );
        assert!(html.contains("Sports day"));
        assert!(html.contains("The annual sports day."));
        assert!(html.contains("2025-09-01"));
        assert!(html.contains("src=\"/img/sports.jpg\""));
    }

    #[test]
    fn card_without_optionals() {
        let html = card("Title", None, None, None);
        assert!(html.contains("Title"));
        assert!(!html.contains("card-media"));
        assert!(!html.contains("card-body"));
        assert!(!html.contains("card-meta"));
    }

    #[test]
    fn blank_image_urls_render_nothing() {
        assert_eq!(image_or_nothing("", "x"), "");
        assert_eq!(image_or_nothing("   ", "x"), "");
        assert!(image_or_nothing("/a.png", "x").contains("src=\"/a.png\""));
    }

    #[test]
    fn side_nav_marks_the_active_item() {
        let html = side_nav(&[
            NavItem { href: "/dash/admin/".into(), text: "Home".into(), active: true },
            NavItem {
                href: "/dash/admin/?section=students".into(),
                text: "Students".into(),
                active: false,
            },
        ]);
        assert!(html.contains("side-link active"));
        assert!(html.contains("href=\"/dash/admin/?section=students\""));
    }

    #[test]
    fn meta_line_variants() {
        assert_eq!(
            meta_line(Some("2025-09-01T08:30:00Z"), Some("Office")),
            "2025-09-01 08:30 \u{2022} Office"
        );
        assert_eq!(meta_line(Some("2025-09-01T08:30:00Z"), None), "2025-09-01 08:30");
        assert_eq!(meta_line(None, None), "");
    }

    #[test]
    fn not_found_is_a_card_not_an_error() {
        let html = not_found("News item not found", "The id is invalid.");
        assert!(html.contains("News item not found"));
        assert!(!html.contains("error"));
    }
}
