//! User-facing copy, centralized so the shell can relocalize in one
//! place.

pub const ANNOUNCEMENTS_TITLE: &str = "Announcements";
pub const NO_ANNOUNCEMENTS: &str = "No announcements yet.";

pub const NEWS_TITLE: &str = "News";
pub const NO_NEWS: &str = "No news yet.";
pub const ALL_NEWS: &str = "All news";
pub const LIVE_NEWS: &str = "Live broadcast";
pub const NEWS_DETAIL_TITLE: &str = "News detail";
pub const NEWS_NOT_FOUND_TITLE: &str = "News item not found";
pub const NEWS_NOT_FOUND_BODY: &str = "The id is invalid or the item has been removed.";
pub const RELATED_NEWS_TITLE: &str = "Related news";
pub const NO_RELATED_NEWS: &str = "No related news found.";
pub const VIDEO_UNSUPPORTED: &str = "Your browser cannot play this video.";

pub const LIVE_TITLE: &str = "Live broadcast";
pub const LIVE_UNAVAILABLE: &str = "The live broadcast is not available right now.";

pub const LOGIN_TITLE: &str = "Dashboard login";
pub const LOGIN_SUBMIT: &str = "Log in";
pub const LOGIN_FULL_NAME: &str = "Full name";
pub const LOGIN_NATIONAL_ID: &str = "National id";
pub const LOGIN_PASSWORD: &str = "Password";
pub const LOGIN_FAILED: &str = "Login failed. Please check your details.";
pub const LOGIN_DATA_FAILED: &str = "Could not load login data. Try again shortly.";
pub const LOGIN_TEACHER_UNSUPPORTED: &str = "Teacher dashboards are not supported yet.";

pub const DASH_HOME: &str = "Home";
pub const DASH_STUDENTS: &str = "Students";
pub const DASH_SCHEDULES: &str = "Class schedules";
pub const DASH_PROFILE: &str = "Profile";
pub const DASH_SCHEDULE: &str = "My schedule";
pub const DASH_REPORTCARDS: &str = "Report cards";
pub const CURRENT_TIME: &str = "Current time:";
pub const SEARCH: &str = "Search";
pub const SHOW_SCHEDULE: &str = "Show schedule";
pub const NO_RESULTS: &str = "No matching students.";
pub const NO_SCHEDULE: &str = "No schedule recorded for this class.";
pub const NO_REPORTCARDS: &str = "No report cards available.";
pub const VIEW_REPORTCARD: &str = "View";
pub const TERM: &str = "Term";
