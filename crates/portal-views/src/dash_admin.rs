//! The administrator dashboard: home, student search, class schedules.

use std::rc::Rc;
use std::time::Duration;

use futures::FutureExt;
use portal_core::text::clean;
use portal_core::{Freshness, UiAction, ViewContext, ViewFuture};
use portal_types::{PortalError, Schedules, UserDirectory, UserProfile, UserRecord};

use crate::partials::{self, NavItem, image_or_nothing, layout_with_nav, note, side_nav};
use crate::strings;

const CLOCK_ID: &str = "admin-clock";
pub const SEARCH_BTN: &str = "search-btn";
pub const SCHEDULE_BTN: &str = "show-schedule-btn";
const RESULTS_ID: &str = "results";
const SCHEDULE_CONTAINER_ID: &str = "schedule-container";

pub fn view(ctx: ViewContext) -> ViewFuture {
    async move {
        let Some(session) = ctx.session.clone() else {
            return Err(PortalError::View("dashboard requires a session".into()));
        };
        let section = ctx.section();
        let content = match section.as_str() {
            "home" => home_section(&ctx, &session.user),
            "students" => students_section(&ctx).await?,
            "schedules" => schedules_section(&ctx).await?,
            _ => String::new(),
        };
        Ok(layout_with_nav(&nav(&section), &content))
    }
    .boxed_local()
}

fn nav(section: &str) -> String {
    side_nav(&[
        NavItem {
            href: "/dash/admin/".into(),
            text: strings::DASH_HOME.into(),
            active: section == "home",
        },
        NavItem {
            href: "/dash/admin/?section=students".into(),
            text: strings::DASH_STUDENTS.into(),
            active: section == "students",
        },
        NavItem {
            href: "/dash/admin/?section=schedules".into(),
            text: strings::DASH_SCHEDULES.into(),
            active: section == "schedules",
        },
    ])
}

fn home_section(ctx: &ViewContext, user: &UserProfile) -> String {
    let host = Rc::clone(&ctx.host);
    ctx.lifecycle.every(Duration::from_secs(1), move |now| {
        host.set_text(CLOCK_ID, &now.format("%Y-%m-%d %H:%M:%S").to_string());
    });

    format!(
        "<section class=\"card\"><div class=\"panel-head\"><h3>{}</h3>\
         <div class=\"info-line\"><span class=\"label\">Administrator:</span>\
         <strong>{}</strong></div></div>\
         <div class=\"grid-2\">\
         <div class=\"soft-card\"><p>Use the side menu to browse students and class schedules.</p></div>\
         <div class=\"clock-box\"><div class=\"label\">{}</div>\
         <div id=\"{CLOCK_ID}\" class=\"clock\"></div></div>\
         </div></section>",
        strings::DASH_HOME,
        clean(&user.full_name),
        strings::CURRENT_TIME,
    )
}

/// The roster changes during enrollment, so this section bypasses the
/// data cache.
async fn students_section(ctx: &ViewContext) -> Result<String, PortalError> {
    let directory: UserDirectory =
        serde_json::from_value(ctx.data.get("students", Freshness::Fresh).await?)?;
    let students = Rc::new(directory.students);

    {
        let students = Rc::clone(&students);
        ctx.lifecycle.on_click(
            SEARCH_BTN,
            Rc::new(move |form| {
                let students = Rc::clone(&students);
                async move {
                    let query = clean(form.get("q").map(String::as_str).unwrap_or(""));
                    let class_query = clean(form.get("class_q").map(String::as_str).unwrap_or(""));
                    let filtered = filter_students(&students, &query, &class_query);
                    vec![UiAction::SetText {
                        id: RESULTS_ID.to_string(),
                        text: student_list(&filtered),
                    }]
                }
                .boxed_local()
            }),
        );
    }

    Ok(format!(
        "<section class=\"card\"><h3>{}</h3>\
         <div class=\"filters\">\
         <input type=\"text\" id=\"q\" name=\"q\">\
         <input type=\"text\" id=\"class_q\" name=\"class_q\">\
         <button class=\"btn\" id=\"{SEARCH_BTN}\">{}</button></div>\
         <div id=\"{RESULTS_ID}\" class=\"student-list\">{}</div></section>",
        strings::DASH_STUDENTS,
        strings::SEARCH,
        student_list(&students.iter().collect::<Vec<_>>()),
    ))
}

fn filter_students<'a>(
    students: &'a [UserRecord],
    query: &str,
    class_query: &str,
) -> Vec<&'a UserRecord> {
    students
        .iter()
        .filter(|s| {
            let full_name = clean(&s.full_name);
            let national_id = clean(&s.national_id);
            let class_name = clean(s.class_name.as_deref().unwrap_or(""));
            let matches_query =
                query.is_empty() || full_name.contains(query) || national_id.contains(query);
            let matches_class = class_query.is_empty() || class_name == class_query;
            matches_query && matches_class
        })
        .collect()
}

fn student_list(students: &[&UserRecord]) -> String {
    if students.is_empty() {
        return note(strings::NO_RESULTS);
    }
    students
        .iter()
        .map(|s| {
            format!(
                "<div class=\"student-item\">{}<div class=\"student-meta\">\
                 <div class=\"strong\">{}</div>\
                 <div>National id: {}</div>\
                 <div>Class: {}</div>\
                 <div>Grade: {}</div></div></div>",
                image_or_nothing(s.profile_image.as_deref().unwrap_or(""), "avatar"),
                clean(&s.full_name),
                clean(&s.national_id),
                clean(s.class_name.as_deref().unwrap_or("-")),
                clean(s.grade_level.as_deref().unwrap_or("-")),
            )
        })
        .collect()
}

async fn schedules_section(ctx: &ViewContext) -> Result<String, PortalError> {
    let schedules: Schedules =
        serde_json::from_value(ctx.data.get("schedules", Freshness::Cached).await?)?;
    let schedules = Rc::new(schedules);

    let first_class = schedules.keys().next().cloned().unwrap_or_default();
    let initial = schedule_grid(&schedules, &first_class);

    {
        let schedules = Rc::clone(&schedules);
        ctx.lifecycle.on_click(
            SCHEDULE_BTN,
            Rc::new(move |form| {
                let schedules = Rc::clone(&schedules);
                async move {
                    let class = form
                        .get("class_select")
                        .map(String::as_str)
                        .unwrap_or("")
                        .to_string();
                    vec![UiAction::SetText {
                        id: SCHEDULE_CONTAINER_ID.to_string(),
                        text: schedule_grid(&schedules, &class),
                    }]
                }
                .boxed_local()
            }),
        );
    }

    let options: String = schedules
        .keys()
        .map(|class| {
            format!(
                "<option value=\"{}\">{}</option>",
                partials::attr(class),
                clean(class)
            )
        })
        .collect();
    Ok(format!(
        "<section class=\"card\"><h3>{}</h3>\
         <div class=\"filters\"><select id=\"class_select\" name=\"class_select\">{options}</select>\
         <button class=\"btn\" id=\"{SCHEDULE_BTN}\">{}</button></div>\
         <div id=\"{SCHEDULE_CONTAINER_ID}\">{initial}</div></section>",
        strings::DASH_SCHEDULES,
        strings::SHOW_SCHEDULE,
    ))
}

/// The weekly grid for one class, shared with the student dashboard.
pub(crate) fn schedule_grid(schedules: &Schedules, class: &str) -> String {
    let Some(days) = schedules.get(class) else {
        return note(strings::NO_SCHEDULE);
    };
    let day_blocks: String = days
        .iter()
        .map(|(day, lessons)| {
            let items: String = lessons
                .iter()
                .map(|lesson| format!("<li class=\"lesson-item\">{}</li>", clean(lesson)))
                .collect();
            format!(
                "<div class=\"schedule-day\"><div class=\"day-name\">{}</div>\
                 <ul class=\"lesson-list\">{items}</ul></div>",
                clean(day)
            )
        })
        .collect();
    format!("<div class=\"schedule-grid\">{day_blocks}</div>")
}
