//! The login form and its submit flow.
//!
//! Credentials are matched against the user directory in priority
//! order (administrators, then students, then teachers). A successful
//! match writes the session and navigates to the role's dashboard.
//! The lookup suspends on the directory fetch, so the handler keeps an
//! in-flight flag: a second submit while one is pending is ignored.

use std::cell::Cell;
use std::rc::Rc;

use futures::FutureExt;
use portal_core::{
    Freshness, LoginOutcome, RouteId, UiAction, ViewContext, ViewFuture, check_credentials,
};
use portal_types::{Role, Session, UserDirectory};

use crate::strings;

/// Element id the form-level message renders into.
const ERROR_ID: &str = "login-error";
/// Widget id of the form itself.
pub const FORM_ID: &str = "login-form";

pub fn view(ctx: ViewContext) -> ViewFuture {
    async move {
        let data = Rc::clone(&ctx.data);
        let session_store = Rc::clone(&ctx.session_store);
        let in_flight = Rc::new(Cell::new(false));

        ctx.lifecycle.on_submit(
            FORM_ID,
            Rc::new(move |form| {
                let data = Rc::clone(&data);
                let session_store = Rc::clone(&session_store);
                let in_flight = Rc::clone(&in_flight);
                async move {
                    if in_flight.get() {
                        log::debug!("ignoring re-entrant login submit");
                        return Vec::new();
                    }
                    in_flight.set(true);

                    let full_name = form.get("full_name").map(String::as_str).unwrap_or("").trim();
                    let national_id =
                        form.get("national_id").map(String::as_str).unwrap_or("").trim();
                    let password = form.get("password").map(String::as_str).unwrap_or("");

                    let result = data.get("students", Freshness::Cached).await;
                    in_flight.set(false);

                    let directory: UserDirectory = match result
                        .and_then(|value| serde_json::from_value(value).map_err(Into::into))
                    {
                        Ok(directory) => directory,
                        Err(e) => {
                            log::warn!("login directory load failed: {e}");
                            return vec![set_error(strings::LOGIN_DATA_FAILED)];
                        },
                    };

                    match check_credentials(&directory, full_name, national_id, password) {
                        LoginOutcome::Admin(record) => {
                            session_store.set(&Session {
                                role: Role::Admin,
                                user: record.profile(),
                            });
                            vec![UiAction::Navigate(
                                RouteId::DashAdmin.canonical_path().to_string(),
                            )]
                        },
                        LoginOutcome::Student(record) => {
                            session_store.set(&Session {
                                role: Role::Student,
                                user: record.profile(),
                            });
                            vec![UiAction::Navigate(
                                RouteId::DashStudent.canonical_path().to_string(),
                            )]
                        },
                        LoginOutcome::TeacherUnsupported => {
                            vec![set_error(strings::LOGIN_TEACHER_UNSUPPORTED)]
                        },
                        LoginOutcome::NoMatch => vec![set_error(strings::LOGIN_FAILED)],
                    }
                }
                .boxed_local()
            }),
        );

        Ok(render_form())
    }
    .boxed_local()
}

fn set_error(message: &str) -> UiAction {
    UiAction::SetText {
        id: ERROR_ID.to_string(),
        text: message.to_string(),
    }
}

fn render_form() -> String {
    format!(
        "<section class=\"login-section\">\
         <form id=\"{FORM_ID}\" class=\"card form-card\">\
         <h2>{}</h2>\
         <label>{}<input type=\"text\" name=\"full_name\" required></label>\
         <label>{}<input type=\"text\" name=\"national_id\" required></label>\
         <label>{}<input type=\"password\" name=\"password\" required></label>\
         <div class=\"form-actions\"><button type=\"submit\" class=\"btn\">{}</button></div>\
         <p id=\"{ERROR_ID}\" class=\"error\"></p>\
         </form></section>",
        strings::LOGIN_TITLE,
        strings::LOGIN_FULL_NAME,
        strings::LOGIN_NATIONAL_ID,
        strings::LOGIN_PASSWORD,
        strings::LOGIN_SUBMIT,
    )
}
