//! Credential matching for the login form.
//!
//! Collections are checked in a fixed priority order: administrators,
//! then students, then teachers. The first structural match by
//! name + national id + password wins. Teachers are recognized but
//! have no dashboard, so a teacher match is a distinct outcome, not a
//! failed login.

use portal_types::{UserDirectory, UserRecord};

use crate::text::clean;

/// Result of matching submitted credentials against the directory.
#[derive(Debug, Clone, PartialEq)]
pub enum LoginOutcome {
    /// Matched an administrator record.
    Admin(UserRecord),
    /// Matched a student record.
    Student(UserRecord),
    /// Matched a teacher record; the teacher dashboard does not exist
    /// yet, so access is denied with its own message.
    TeacherUnsupported,
    /// No record matched.
    NoMatch,
}

/// Name and national id are compared after whitespace cleanup, so
/// stray double spaces or line breaks in authored records never cause
/// a false mismatch. The password is compared exactly, unnormalized.
fn matches(record: &UserRecord, full_name: &str, national_id: &str, password: &str) -> bool {
    clean(&record.full_name) == clean(full_name)
        && clean(&record.national_id) == clean(national_id)
        && record.password == password
}

/// Match submitted credentials against the user directory.
pub fn check_credentials(
    directory: &UserDirectory,
    full_name: &str,
    national_id: &str,
    password: &str,
) -> LoginOutcome {
    if let Some(admin) = directory
        .admins
        .iter()
        .find(|r| matches(r, full_name, national_id, password))
    {
        return LoginOutcome::Admin(admin.clone());
    }
    if let Some(student) = directory
        .students
        .iter()
        .find(|r| matches(r, full_name, national_id, password))
    {
        return LoginOutcome::Student(student.clone());
    }
    if directory
        .teachers
        .iter()
        .any(|r| matches(r, full_name, national_id, password))
    {
        return LoginOutcome::TeacherUnsupported;
    }
    LoginOutcome::NoMatch
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(full_name: &str, national_id: &str, password: &str) -> UserRecord {
        UserRecord {
            full_name: full_name.into(),
            national_id: national_id.into(),
            password: password.into(),
            class_name: None,
            grade_level: None,
            profile_image: None,
        }
    }

    fn directory() -> UserDirectory {
        UserDirectory {
            admins: vec![record("Ali Rezaei", "1111111111", "pass1")],
            students: vec![record("Sara Karimi", "2222222222", "pass2")],
            teachers: vec![record("Maryam Ahmadi", "3333333333", "pass3")],
        }
    }

    #[test]
    fn admin_match_wins() {
        let outcome = check_credentials(&directory(), "Ali Rezaei", "1111111111", "pass1");
        assert!(matches!(outcome, LoginOutcome::Admin(r) if r.full_name == "Ali Rezaei"));
    }

    #[test]
    fn student_match() {
        let outcome = check_credentials(&directory(), "Sara Karimi", "2222222222", "pass2");
        assert!(matches!(outcome, LoginOutcome::Student(_)));
    }

    #[test]
    fn teacher_match_is_unsupported_not_a_failure() {
        let outcome = check_credentials(&directory(), "Maryam Ahmadi", "3333333333", "pass3");
        assert_eq!(outcome, LoginOutcome::TeacherUnsupported);
    }

    #[test]
    fn wrong_password_is_no_match() {
        let outcome = check_credentials(&directory(), "Ali Rezaei", "1111111111", "wrong");
        assert_eq!(outcome, LoginOutcome::NoMatch);
    }

    #[test]
    fn admins_checked_before_students() {
        // Same credentials in both collections: the admin record wins.
        let mut dir = directory();
        dir.students.push(record("Ali Rezaei", "1111111111", "pass1"));
        let outcome = check_credentials(&dir, "Ali Rezaei", "1111111111", "pass1");
        assert!(matches!(outcome, LoginOutcome::Admin(_)));
    }

    #[test]
    fn name_and_id_are_whitespace_tolerant() {
        let mut dir = directory();
        // The stored record carries an accidental line break.
        dir.admins[0].full_name = "Ali\nRezaei".into();
        let outcome = check_credentials(&dir, "Ali  Rezaei", " 1111111111 ", "pass1");
        assert!(matches!(outcome, LoginOutcome::Admin(_)));
    }

    #[test]
    fn password_is_compared_exactly() {
        let mut dir = directory();
        dir.admins[0].password = "pass 1".into();
        // Whitespace in the password is significant.
        let outcome = check_credentials(&dir, "Ali Rezaei", "1111111111", "pass  1");
        assert_eq!(outcome, LoginOutcome::NoMatch);
    }

    #[test]
    fn empty_directory_is_no_match() {
        let outcome =
            check_credentials(&UserDirectory::default(), "Ali Rezaei", "1111111111", "pass1");
        assert_eq!(outcome, LoginOutcome::NoMatch);
    }
}
