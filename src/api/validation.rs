//! Request validation for task fields.
//!
//! Violations are reported as stable message codes, collected so a
//! single response can list every failed rule. Lengths are counted in
//! characters, not bytes.

use crate::store::{NewTask, TaskPatch};

use super::types::{CreateTaskRequest, UpdateTaskRequest};

pub const TITLE_MIN_LENGTH: usize = 5;
pub const TITLE_MAX_LENGTH: usize = 150;
pub const DESCRIPTION_MAX_LENGTH: usize = 550;

/// Validate a create request, where both fields are required.
///
/// Returns the fields for the new task, or every violated rule code.
pub fn validate_create(body: CreateTaskRequest) -> Result<NewTask, Vec<&'static str>> {
    let mut errors = Vec::new();

    match body.title.as_deref() {
        None | Some("") => errors.push("TITLE_REQUIRED"),
        Some(title) => {
            let len = title.chars().count();
            if len < TITLE_MIN_LENGTH {
                errors.push("TITLE_MIN_LENGTH");
            }
            if len > TITLE_MAX_LENGTH {
                errors.push("TITLE_MAX_LENGTH");
            }
        }
    }

    match body.description.as_deref() {
        None | Some("") => errors.push("DESCRIPTION_REQUIRED"),
        Some(description) => {
            if description.chars().count() > DESCRIPTION_MAX_LENGTH {
                errors.push("DESCRIPTION_MAX_LENGTH");
            }
        }
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(NewTask {
        // Both checked above
        title: body.title.unwrap_or_default(),
        description: body.description.unwrap_or_default(),
    })
}

/// Validate an update request, where both fields are optional.
pub fn validate_update(body: UpdateTaskRequest) -> Result<TaskPatch, Vec<&'static str>> {
    let mut errors = Vec::new();

    if let Some(title) = body.title.as_deref() {
        if title.chars().count() < TITLE_MIN_LENGTH {
            errors.push("TITLE_MIN_LENGTH");
        }
    }
    if let Some(description) = body.description.as_deref() {
        if description.chars().count() > DESCRIPTION_MAX_LENGTH {
            errors.push("DESCRIPTION_MAX_LENGTH");
        }
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(TaskPatch {
        title: body.title,
        // A provided-but-empty description counts as absent: it neither
        // overwrites the stored value nor refreshes updated_at. An
        // empty title is already rejected by the minimum length above.
        description: body.description.filter(|d| !d.is_empty()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_body(title: Option<&str>, description: Option<&str>) -> CreateTaskRequest {
        CreateTaskRequest {
            title: title.map(str::to_string),
            description: description.map(str::to_string),
        }
    }

    #[test]
    fn create_accepts_valid_fields() {
        let fields = validate_create(create_body(Some("Buy groceries"), Some("Milk, eggs")))
            .expect("valid body");
        assert_eq!(fields.title, "Buy groceries");
        assert_eq!(fields.description, "Milk, eggs");
    }

    #[test]
    fn create_collects_all_missing_fields() {
        let errors = validate_create(create_body(None, None)).unwrap_err();
        assert_eq!(errors, vec!["TITLE_REQUIRED", "DESCRIPTION_REQUIRED"]);
    }

    #[test]
    fn create_rejects_empty_strings_as_missing() {
        let errors = validate_create(create_body(Some(""), Some(""))).unwrap_err();
        assert_eq!(errors, vec!["TITLE_REQUIRED", "DESCRIPTION_REQUIRED"]);
    }

    #[test]
    fn create_enforces_title_bounds() {
        let errors = validate_create(create_body(Some("abc"), Some("fine"))).unwrap_err();
        assert_eq!(errors, vec!["TITLE_MIN_LENGTH"]);

        let long_title = "t".repeat(151);
        let errors = validate_create(create_body(Some(&long_title), Some("fine"))).unwrap_err();
        assert_eq!(errors, vec!["TITLE_MAX_LENGTH"]);
    }

    #[test]
    fn create_enforces_description_bound() {
        let long_description = "d".repeat(551);
        let errors =
            validate_create(create_body(Some("Long enough"), Some(&long_description)))
                .unwrap_err();
        assert_eq!(errors, vec!["DESCRIPTION_MAX_LENGTH"]);
    }

    #[test]
    fn update_accepts_empty_body() {
        let patch = validate_update(UpdateTaskRequest::default()).expect("valid body");
        assert!(patch.title.is_none());
        assert!(patch.description.is_none());
    }

    #[test]
    fn update_treats_empty_description_as_absent() {
        let patch = validate_update(UpdateTaskRequest {
            title: None,
            description: Some(String::new()),
        })
        .expect("valid body");
        assert!(patch.description.is_none());
    }

    #[test]
    fn update_rejects_short_title() {
        let errors = validate_update(UpdateTaskRequest {
            title: Some("abc".to_string()),
            description: None,
        })
        .unwrap_err();
        assert_eq!(errors, vec!["TITLE_MIN_LENGTH"]);
    }

    #[test]
    fn update_rejects_long_description() {
        let errors = validate_update(UpdateTaskRequest {
            title: None,
            description: Some("d".repeat(551)),
        })
        .unwrap_err();
        assert_eq!(errors, vec!["DESCRIPTION_MAX_LENGTH"]);
    }
}
