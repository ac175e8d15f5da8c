//! News pages: the full list and the per-item detail view.

use futures::FutureExt;
use portal_core::text::{clean, parse_timestamp, truncate};
use portal_core::{Freshness, ViewContext, ViewFuture};
use portal_types::NewsItem;

use crate::partials::{self, image_or_nothing, meta_line, not_found, note, section_header};
use crate::strings;

/// Summary lengths, per page.
const LIST_SUMMARY_LEN: usize = 220;
const RELATED_SUMMARY_LEN: usize = 130;
/// How many related items the detail page shows.
const RELATED_COUNT: usize = 6;

/// `/news` -- the full list.
pub fn list(ctx: ViewContext) -> ViewFuture {
    async move {
        let news: Vec<NewsItem> =
            serde_json::from_value(ctx.data.get("news", Freshness::Cached).await?)?;
        Ok(render_list(&news))
    }
    .boxed_local()
}

/// `/news/item?id=` -- one item with media and a related-items rail.
pub fn item(ctx: ViewContext) -> ViewFuture {
    async move {
        let news: Vec<NewsItem> =
            serde_json::from_value(ctx.data.get("news", Freshness::Cached).await?)?;
        let id = ctx.item_id().unwrap_or_default();
        Ok(render_item(&news, &id))
    }
    .boxed_local()
}

fn render_list(news: &[NewsItem]) -> String {
    let mut out = section_header(strings::NEWS_TITLE, "");
    let items: String = news
        .iter()
        .map(|n| list_card(n, LIST_SUMMARY_LEN, "hover-soft"))
        .collect();
    if items.is_empty() {
        out.push_str(&format!("<div class=\"list\">{}</div>", note(strings::NO_NEWS)));
    } else {
        out.push_str(&format!("<div class=\"list\">{items}</div>"));
    }
    out
}

fn list_card(item: &NewsItem, summary_len: usize, extra_class: &str) -> String {
    let title = clean(item.title.as_deref().unwrap_or(strings::NEWS_TITLE));
    let summary = truncate(&clean(item.body.as_deref().unwrap_or("")), summary_len);
    let meta = meta_line(item.published_at.as_deref(), item.author.as_deref());
    let media = item
        .image_url
        .as_deref()
        .filter(|url| !url.trim().is_empty())
        .map(|url| {
            format!(
                "<div class=\"card-media\">{}</div>",
                image_or_nothing(url, "news-image")
            )
        })
        .unwrap_or_default();
    format!(
        "<article class=\"card {extra_class}\">{media}<div class=\"card-content\">\
         <h3 class=\"card-title\"><a href=\"/news/item?id={}\" data-link class=\"link-btn\">{title}</a></h3>\
         <p class=\"card-body\">{summary}</p>\
         <div class=\"card-meta\">{meta}</div></div></article>",
        partials::attr(&item.id)
    )
}

fn render_item(news: &[NewsItem], id: &str) -> String {
    let Some(item) = news.iter().find(|n| n.id == id) else {
        let mut out = section_header(strings::NEWS_DETAIL_TITLE, "");
        out.push_str(&not_found(
            strings::NEWS_NOT_FOUND_TITLE,
            strings::NEWS_NOT_FOUND_BODY,
        ));
        return out;
    };

    let title = clean(item.title.as_deref().unwrap_or(strings::NEWS_TITLE));
    let body = clean(item.body.as_deref().unwrap_or(""));
    let meta = meta_line(item.published_at.as_deref(), item.author.as_deref());

    let mut out = format!(
        "<nav class=\"breadcrumbs\"><a href=\"/news\" data-link class=\"link-btn\">{}</a>\
         <span class=\"pipe\"></span><span class=\"muted\">{}</span></nav>",
        strings::NEWS_TITLE,
        strings::NEWS_DETAIL_TITLE
    );
    out.push_str(&format!(
        "<section class=\"card\"><h3 class=\"heading-line\">{title}</h3>\
         <div class=\"card-media\">{}</div>\
         <div class=\"card-body\"><p>{body}</p></div>\
         <div class=\"card-meta\">{meta}</div></section>",
        media_block(item)
    ));

    let related: String = related_items(news, id)
        .iter()
        .map(|n| related_card(n))
        .collect();
    out.push_str(&format!(
        "<section class=\"card\"><h4 class=\"heading-line\">{}</h4>\
         <div class=\"grid-auto-fit mt-12\">{}</div></section>",
        strings::RELATED_NEWS_TITLE,
        if related.is_empty() {
            note(strings::NO_RELATED_NEWS)
        } else {
            related
        }
    ));
    out
}

/// Image first, then video: native playback for known extensions, the
/// raw embed string otherwise.
fn media_block(item: &NewsItem) -> String {
    let mut out = String::new();
    if let Some(url) = item.image_url.as_deref() {
        if !url.trim().is_empty() {
            out.push_str(&format!(
                "<div class=\"mb-12\">{}</div>",
                image_or_nothing(url, "news-image")
            ));
        }
    }
    if let Some(url) = item.video_url.as_deref() {
        let url = url.trim();
        if !url.is_empty() {
            if let Some(ext) = video_extension(url) {
                out.push_str(&format!(
                    "<video class=\"news-image\" controls preload=\"metadata\">\
                     <source src=\"{}\" type=\"video/{ext}\">{}</video>",
                    partials::attr(url),
                    strings::VIDEO_UNSUPPORTED
                ));
            } else {
                out.push_str(&format!("<div class=\"mb-12\">{url}</div>"));
            }
        }
    }
    out
}

fn video_extension(url: &str) -> Option<&'static str> {
    let ext = url.rsplit('.').next()?.to_ascii_lowercase();
    match ext.as_str() {
        "mp4" => Some("mp4"),
        "webm" => Some("webm"),
        "ogg" => Some("ogg"),
        _ => None,
    }
}

/// The newest items other than the current one.
fn related_items<'a>(news: &'a [NewsItem], current_id: &str) -> Vec<&'a NewsItem> {
    let mut others: Vec<&NewsItem> = news.iter().filter(|n| n.id != current_id).collect();
    others.sort_by_key(|n| {
        std::cmp::Reverse(
            n.published_at
                .as_deref()
                .and_then(parse_timestamp)
                .unwrap_or(0),
        )
    });
    others.truncate(RELATED_COUNT);
    others
}

fn related_card(item: &NewsItem) -> String {
    let title = clean(item.title.as_deref().unwrap_or(strings::NEWS_TITLE));
    let summary = truncate(&clean(item.body.as_deref().unwrap_or("")), RELATED_SUMMARY_LEN);
    let meta = meta_line(item.published_at.as_deref(), item.author.as_deref());
    let media = item
        .image_url
        .as_deref()
        .filter(|url| !url.trim().is_empty())
        .map(|url| {
            format!(
                "<div class=\"card-media\">{}</div>",
                image_or_nothing(url, "news-image")
            )
        })
        .unwrap_or_default();
    format!(
        "<article class=\"card card-slim lift\">{media}<div class=\"card-content\">\
         <h4 class=\"card-title\"><a class=\"link-btn\" href=\"/news/item?id={}\" data-link>{title}</a></h4>\
         <p class=\"card-body\">{summary}</p>\
         <div class=\"card-meta\">{meta}</div></div></article>",
        partials::attr(&item.id)
    )
}
