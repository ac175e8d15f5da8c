//! The student dashboard: home, profile, own schedule, report cards.

use std::rc::Rc;
use std::time::Duration;

use futures::FutureExt;
use portal_core::text::clean;
use portal_core::{Freshness, ViewContext, ViewFuture};
use portal_types::{PortalError, ReportCard, Schedules, UserProfile};

use crate::dash_admin::schedule_grid;
use crate::partials::{NavItem, attr, image_or_nothing, layout_with_nav, note, side_nav};
use crate::strings;

const CLOCK_ID: &str = "student-clock";

pub fn view(ctx: ViewContext) -> ViewFuture {
    async move {
        let Some(session) = ctx.session.clone() else {
            return Err(PortalError::View("dashboard requires a session".into()));
        };
        let user = session.user;
        let section = ctx.section();
        let content = match section.as_str() {
            "home" => home_section(&ctx, &user).await?,
            "profile" => profile_section(&user),
            "schedule" => schedule_section(&ctx, &user).await?,
            "reportcards" => reportcards_section(&ctx, &user).await?,
            _ => String::new(),
        };
        Ok(layout_with_nav(&nav(&section), &content))
    }
    .boxed_local()
}

fn nav(section: &str) -> String {
    side_nav(&[
        NavItem {
            href: "/dash/student".into(),
            text: strings::DASH_HOME.into(),
            active: section == "home",
        },
        NavItem {
            href: "/dash/student?section=profile".into(),
            text: strings::DASH_PROFILE.into(),
            active: section == "profile",
        },
        NavItem {
            href: "/dash/student?section=schedule".into(),
            text: strings::DASH_SCHEDULE.into(),
            active: section == "schedule",
        },
        NavItem {
            href: "/dash/student?section=reportcards".into(),
            text: strings::DASH_REPORTCARDS.into(),
            active: section == "reportcards",
        },
    ])
}

async fn my_reportcards(ctx: &ViewContext, user: &UserProfile) -> Result<Vec<ReportCard>, PortalError> {
    let all: Vec<ReportCard> =
        serde_json::from_value(ctx.data.get("reportcards", Freshness::Cached).await?)?;
    let mine = all
        .into_iter()
        .filter(|r| clean(&r.student_national_id) == clean(&user.national_id))
        .collect();
    Ok(mine)
}

async fn home_section(ctx: &ViewContext, user: &UserProfile) -> Result<String, PortalError> {
    let reports = my_reportcards(ctx, user).await?;
    let terms = if reports.is_empty() {
        "\u{2014}".to_string()
    } else {
        reports
            .iter()
            .map(|r| format!("{} {}", strings::TERM, clean(&r.term)))
            .collect::<Vec<_>>()
            .join(", ")
    };

    let host = Rc::clone(&ctx.host);
    ctx.lifecycle.every(Duration::from_secs(1), move |now| {
        host.set_text(CLOCK_ID, &now.format("%Y-%m-%d %H:%M:%S").to_string());
    });

    Ok(format!(
        "<section class=\"card\"><div class=\"panel-head\"><h3>{}</h3>\
         <div class=\"info-line\"><span class=\"label\">Student:</span>\
         <strong>{}</strong></div></div>\
         <div class=\"grid-2\"><div class=\"student-status\">{}<div>\
         <div><span class=\"label\">Name:</span> {}</div>\
         <div><span class=\"label\">Class:</span> {}</div>\
         <div><span class=\"label\">Grade:</span> {}</div>\
         <div><span class=\"label\">{}</span> <span id=\"{CLOCK_ID}\" class=\"clock\"></span></div>\
         <div><span class=\"label\">{}:</span> {terms}</div>\
         </div></div></div></section>",
        strings::DASH_HOME,
        clean(&user.full_name),
        image_or_nothing(user.profile_image.as_deref().unwrap_or(""), "avatar xl"),
        clean(&user.full_name),
        clean(user.class_name.as_deref().unwrap_or("-")),
        clean(user.grade_level.as_deref().unwrap_or("-")),
        strings::CURRENT_TIME,
        strings::DASH_REPORTCARDS,
    ))
}

fn profile_section(user: &UserProfile) -> String {
    format!(
        "<section class=\"card\"><h3>{}</h3><div class=\"profile-view\">{}\
         <div class=\"profile-grid\">\
         <div><span class=\"label\">Name:</span> {}</div>\
         <div><span class=\"label\">National id:</span> {}</div>\
         <div><span class=\"label\">Grade:</span> {}</div>\
         <div><span class=\"label\">Class:</span> {}</div>\
         </div></div></section>",
        strings::DASH_PROFILE,
        image_or_nothing(user.profile_image.as_deref().unwrap_or(""), "avatar xl"),
        clean(&user.full_name),
        clean(&user.national_id),
        clean(user.grade_level.as_deref().unwrap_or("-")),
        clean(user.class_name.as_deref().unwrap_or("-")),
    )
}

async fn schedule_section(ctx: &ViewContext, user: &UserProfile) -> Result<String, PortalError> {
    let schedules: Schedules =
        serde_json::from_value(ctx.data.get("schedules", Freshness::Cached).await?)?;
    let grid = match user.class_name.as_deref() {
        Some(class) if schedules.contains_key(class) => schedule_grid(&schedules, class),
        _ => note(strings::NO_SCHEDULE),
    };
    Ok(format!(
        "<section class=\"card\"><h3>{}</h3>{grid}</section>",
        strings::DASH_SCHEDULE
    ))
}

async fn reportcards_section(ctx: &ViewContext, user: &UserProfile) -> Result<String, PortalError> {
    let reports = my_reportcards(ctx, user).await?;
    let body = if reports.is_empty() {
        note(strings::NO_REPORTCARDS)
    } else {
        let items: String = reports
            .iter()
            .map(|r| {
                format!(
                    "<li class=\"report-item\"><span>{} {}</span>\
                     <a class=\"btn btn-secondary\" href=\"{}\" target=\"_blank\" rel=\"noopener\">{}</a></li>",
                    strings::TERM,
                    clean(&r.term),
                    attr(&r.file_url),
                    strings::VIEW_REPORTCARD,
                )
            })
            .collect();
        format!("<ul class=\"report-list\">{items}</ul>")
    };
    Ok(format!(
        "<section class=\"card\"><h3>{}</h3>{body}</section>",
        strings::DASH_REPORTCARDS
    ))
}
