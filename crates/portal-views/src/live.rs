//! The live-broadcast page.

use futures::FutureExt;
use portal_core::text::clean;
use portal_core::{Freshness, ViewContext, ViewFuture};
use portal_types::LiveBroadcast;

use crate::partials::{meta_line, note, section_header};
use crate::strings;

pub fn view(ctx: ViewContext) -> ViewFuture {
    async move {
        let live: LiveBroadcast =
            serde_json::from_value(ctx.data.get("live", Freshness::Cached).await?)?;
        Ok(render(&live))
    }
    .boxed_local()
}

fn render(live: &LiveBroadcast) -> String {
    let embed = live
        .live_embed_code
        .as_deref()
        .filter(|code| !code.trim().is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| note(strings::LIVE_UNAVAILABLE));

    let mut out = section_header(strings::LIVE_TITLE, "");
    out.push_str(&format!("<div class=\"live-wrapper\">{embed}</div>"));
    out.push_str(&format!(
        "<div class=\"live-meta\"><h3>{}</h3><p>{}</p><small>{}</small></div>",
        clean(live.title.as_deref().unwrap_or("")),
        clean(live.body.as_deref().unwrap_or("")),
        meta_line(live.published_at.as_deref(), None)
    ));
    out
}
