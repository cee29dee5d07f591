//! Required-field validation for non-tombstone changes.
//!
//! A failed check marks a malformed payload. Unlike a conflict, which is a
//! normal reconciliation outcome, a malformed payload fails the whole push,
//! so clients notice broken serialization instead of silently losing data.

use stride_protocol::{ApplicationChange, CheckInChange, GoalChange, RoutineChange};

fn blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |v| v.trim().is_empty())
}

pub(crate) fn validate_goal(change: &GoalChange) -> Result<(), &'static str> {
    if blank(&change.title) {
        return Err("title must not be empty");
    }
    if change.status.is_none() {
        return Err("status is required");
    }
    Ok(())
}

pub(crate) fn validate_routine(change: &RoutineChange) -> Result<(), &'static str> {
    if blank(&change.title) {
        return Err("title must not be empty");
    }
    if change.schedule_days.is_empty() {
        return Err("at least one scheduled day is required");
    }
    if change.active.is_none() {
        return Err("active flag is required");
    }
    Ok(())
}

pub(crate) fn validate_check_in(change: &CheckInChange) -> Result<(), &'static str> {
    if change.routine_id.is_none() {
        return Err("routineId is required");
    }
    if change.date.is_none() {
        return Err("date is required");
    }
    if change.completed.is_none() {
        return Err("completed flag is required");
    }
    Ok(())
}

pub(crate) fn validate_application(change: &ApplicationChange) -> Result<(), &'static str> {
    if blank(&change.company) {
        return Err("company must not be empty");
    }
    if blank(&change.role) {
        return Err("role must not be empty");
    }
    if change.source.is_none() {
        return Err("source is required");
    }
    if change.status.is_none() {
        return Err("status is required");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use stride_core::{ApplicationSource, ApplicationStatus, GoalStatus, RecordId, Weekday};

    fn goal_change() -> GoalChange {
        GoalChange {
            id: RecordId::new(),
            title: Some("Run a marathon".into()),
            description: None,
            target_date: None,
            status: Some(GoalStatus::Active),
            completed_at: None,
            client_updated_at: Utc::now(),
            deleted_at: None,
        }
    }

    #[test]
    fn goal_requires_nonblank_title_and_status() {
        assert!(validate_goal(&goal_change()).is_ok());

        let mut missing = goal_change();
        missing.title = None;
        assert_eq!(validate_goal(&missing), Err("title must not be empty"));

        let mut whitespace = goal_change();
        whitespace.title = Some("   ".into());
        assert_eq!(validate_goal(&whitespace), Err("title must not be empty"));

        let mut no_status = goal_change();
        no_status.status = None;
        assert_eq!(validate_goal(&no_status), Err("status is required"));
    }

    #[test]
    fn routine_requires_a_schedule() {
        let change = RoutineChange {
            id: RecordId::new(),
            title: Some("Stretch".into()),
            color_tag: None,
            schedule_days: vec![Weekday::Monday],
            active: Some(true),
            client_updated_at: Utc::now(),
            deleted_at: None,
        };
        assert!(validate_routine(&change).is_ok());

        let mut no_days = change.clone();
        no_days.schedule_days.clear();
        assert_eq!(
            validate_routine(&no_days),
            Err("at least one scheduled day is required")
        );

        let mut no_active = change;
        no_active.active = None;
        assert_eq!(validate_routine(&no_active), Err("active flag is required"));
    }

    #[test]
    fn check_in_requires_its_key_fields() {
        let change = CheckInChange {
            id: RecordId::new(),
            routine_id: Some(RecordId::new()),
            date: Some("2024-03-15".parse().unwrap()),
            completed: Some(true),
            completed_at: None,
            client_updated_at: Utc::now(),
            deleted_at: None,
        };
        assert!(validate_check_in(&change).is_ok());

        let mut no_routine = change.clone();
        no_routine.routine_id = None;
        assert_eq!(validate_check_in(&no_routine), Err("routineId is required"));

        let mut no_date = change.clone();
        no_date.date = None;
        assert_eq!(validate_check_in(&no_date), Err("date is required"));

        let mut no_flag = change;
        no_flag.completed = None;
        assert_eq!(validate_check_in(&no_flag), Err("completed flag is required"));
    }

    #[test]
    fn application_requires_company_role_source_status() {
        let change = ApplicationChange {
            id: RecordId::new(),
            company: Some("Acme".into()),
            role: Some("Engineer".into()),
            location: None,
            source: Some(ApplicationSource::LinkedIn),
            status: Some(ApplicationStatus::Applied),
            applied_date: None,
            notes: None,
            url: None,
            client_updated_at: Utc::now(),
            deleted_at: None,
        };
        assert!(validate_application(&change).is_ok());

        let mut no_company = change.clone();
        no_company.company = Some(String::new());
        assert_eq!(
            validate_application(&no_company),
            Err("company must not be empty")
        );

        let mut no_role = change.clone();
        no_role.role = None;
        assert_eq!(validate_application(&no_role), Err("role must not be empty"));

        let mut no_source = change.clone();
        no_source.source = None;
        assert_eq!(validate_application(&no_source), Err("source is required"));

        let mut no_status = change;
        no_status.status = None;
        assert_eq!(validate_application(&no_status), Err("status is required"));
    }
}
