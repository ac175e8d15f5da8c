//! The home page: announcements plus a news digest.

use futures::FutureExt;
use portal_core::text::{clean, truncate};
use portal_core::{Freshness, ViewContext, ViewFuture};
use portal_types::{Announcement, NewsItem};

use crate::partials::{self, card, meta_line, note, section_header};
use crate::strings;

/// How much of a news body the digest shows.
const SUMMARY_LEN: usize = 180;

pub fn view(ctx: ViewContext) -> ViewFuture {
    async move {
        let announcements: Vec<Announcement> =
            serde_json::from_value(ctx.data.get("announcements", Freshness::Cached).await?)?;
        let news: Vec<NewsItem> =
            serde_json::from_value(ctx.data.get("news", Freshness::Cached).await?)?;
        Ok(render(&announcements, &news))
    }
    .boxed_local()
}

fn render(announcements: &[Announcement], news: &[NewsItem]) -> String {
    let mut out = String::new();

    out.push_str(&section_header(strings::ANNOUNCEMENTS_TITLE, ""));
    let ann_cards: String = announcements
        .iter()
        .map(|a| {
            card(
                a.title.as_deref().unwrap_or(""),
                a.body.as_deref(),
                Some(&meta_line(a.published_at.as_deref(), a.author.as_deref())),
                a.image_url.as_deref(),
            )
        })
        .collect();
    out.push_str(&wrap_list(&ann_cards, strings::NO_ANNOUNCEMENTS));

    let actions = format!(
        "<a href=\"/news\" data-link class=\"btn\">{}</a> \
         <a href=\"/news/live\" data-link class=\"btn btn-secondary\">{}</a>",
        strings::ALL_NEWS,
        strings::LIVE_NEWS
    );
    out.push_str(&section_header(strings::NEWS_TITLE, &actions));
    let news_cards: String = news.iter().map(|n| news_digest_card(n)).collect();
    out.push_str(&wrap_list(&news_cards, strings::NO_NEWS));

    out
}

fn wrap_list(items: &str, empty_note: &str) -> String {
    if items.is_empty() {
        format!("<div class=\"list\">{}</div>", note(empty_note))
    } else {
        format!("<div class=\"list\">{items}</div>")
    }
}

fn news_digest_card(item: &NewsItem) -> String {
    let title = clean(item.title.as_deref().unwrap_or(strings::NEWS_TITLE));
    let summary = truncate(&clean(item.body.as_deref().unwrap_or("")), SUMMARY_LEN);
    let meta = meta_line(item.published_at.as_deref(), item.author.as_deref());
    let media = item
        .image_url
        .as_deref()
        .filter(|url| !url.trim().is_empty())
        .map(|url| {
            format!(
                "<div class=\"card-media\">{}</div>",
                partials::image_or_nothing(url, "news-image")
            )
        })
        .unwrap_or_default();
    format!(
        "<article class=\"card\">{media}<div class=\"card-content\">\
         <h3 class=\"card-title\"><a href=\"/news/item?id={}\" data-link class=\"link-btn\">{title}</a></h3>\
         <p class=\"card-body\">{summary}</p>\
         <div class=\"card-meta\">{meta}</div></div></article>",
        partials::attr(&item.id)
    )
}
