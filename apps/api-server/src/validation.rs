//! Request validation - field constraints checked before the services run.

use scribe_shared::dto::{
    CreatePostRequest, RegisterRequest, UpdatePostRequest, UpdateProfileRequest,
};

use crate::middleware::error::AppError;

fn char_len(s: &str) -> usize {
    s.chars().count()
}

fn check_len(errors: &mut Vec<String>, field: &str, value: &str, min: usize, max: usize) {
    let len = char_len(value.trim());
    if len < min || len > max {
        errors.push(format!("{field} must be between {min} and {max} characters"));
    }
}

fn check_opt_len(errors: &mut Vec<String>, field: &str, value: &Option<String>, min: usize, max: usize) {
    if let Some(value) = value {
        check_len(errors, field, value, min, max);
    }
}

fn check_email(errors: &mut Vec<String>, email: &str) {
    let valid = email.split_once('@').is_some_and(|(local, domain)| {
        !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
    });
    if !valid {
        errors.push("Please provide a valid email address".to_string());
    }
}

fn check_password(errors: &mut Vec<String>, password: &str) {
    if password.len() < 6 {
        errors.push("Password must be at least 6 characters long".to_string());
    }
    let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    if !(has_lower && has_upper && has_digit) {
        errors.push(
            "Password must contain at least one lowercase letter, one uppercase letter, and one number"
                .to_string(),
        );
    }
}

fn check_tags(errors: &mut Vec<String>, tags: &[String]) {
    if tags.iter().any(|t| char_len(t) < 1 || char_len(t) > 30) {
        errors.push("Each tag must be between 1 and 30 characters".to_string());
    }
}

fn finish(errors: Vec<String>) -> Result<(), AppError> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(errors))
    }
}

pub fn validate_register(req: &RegisterRequest) -> Result<(), AppError> {
    let mut errors = Vec::new();
    check_len(&mut errors, "First name", &req.first_name, 2, 50);
    check_len(&mut errors, "Last name", &req.last_name, 2, 50);
    check_email(&mut errors, &req.email);
    check_password(&mut errors, &req.password);
    finish(errors)
}

pub fn validate_profile_update(req: &UpdateProfileRequest) -> Result<(), AppError> {
    let mut errors = Vec::new();
    check_opt_len(&mut errors, "First name", &req.first_name, 2, 50);
    check_opt_len(&mut errors, "Last name", &req.last_name, 2, 50);
    check_opt_len(&mut errors, "Bio", &req.bio, 0, 500);
    if let Some(password) = &req.password {
        check_password(&mut errors, password);
    }
    finish(errors)
}

pub fn validate_post_create(req: &CreatePostRequest) -> Result<(), AppError> {
    let mut errors = Vec::new();
    check_len(&mut errors, "Title", &req.title, 3, 200);
    check_len(&mut errors, "Content", &req.content, 10, 10000);
    check_opt_len(&mut errors, "Excerpt", &req.excerpt, 0, 500);
    check_opt_len(&mut errors, "Category", &req.category, 2, 50);
    check_opt_len(&mut errors, "Meta title", &req.meta_title, 0, 200);
    check_opt_len(&mut errors, "Meta description", &req.meta_description, 0, 500);
    check_tags(&mut errors, &req.tags);
    finish(errors)
}

pub fn validate_post_update(req: &UpdatePostRequest) -> Result<(), AppError> {
    let mut errors = Vec::new();
    check_opt_len(&mut errors, "Title", &req.title, 3, 200);
    check_opt_len(&mut errors, "Content", &req.content, 10, 10000);
    check_opt_len(&mut errors, "Excerpt", &req.excerpt, 0, 500);
    check_opt_len(&mut errors, "Category", &req.category, 2, 50);
    check_opt_len(&mut errors, "Meta title", &req.meta_title, 0, 200);
    check_opt_len(&mut errors, "Meta description", &req.meta_description, 0, 500);
    if let Some(tags) = &req.tags {
        check_tags(&mut errors, tags);
    }
    finish(errors)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_rejects_short_names_and_weak_passwords() {
        let req = RegisterRequest {
            first_name: "A".to_string(),
            last_name: "Lovelace".to_string(),
            email: "not-an-email".to_string(),
            password: "weak".to_string(),
        };
        let err = validate_register(&req).unwrap_err();
        match err {
            AppError::Validation(errors) => {
                assert_eq!(errors.len(), 4);
            }
            other => panic!("expected validation error, got {other}"),
        }
    }

    #[test]
    fn register_accepts_valid_input() {
        let req = RegisterRequest {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            password: "Sup3rSecret".to_string(),
        };
        assert!(validate_register(&req).is_ok());
    }

    #[test]
    fn post_create_checks_lengths() {
        let req = CreatePostRequest {
            title: "Ok".to_string(),
            content: "short".to_string(),
            tags: vec!["".to_string()],
            ..Default::default()
        };
        let err = validate_post_create(&req).unwrap_err();
        match err {
            AppError::Validation(errors) => assert_eq!(errors.len(), 3),
            other => panic!("expected validation error, got {other}"),
        }
    }

    #[test]
    fn post_update_allows_sparse_patches() {
        let req = UpdatePostRequest {
            category: Some("rust".to_string()),
            ..Default::default()
        };
        assert!(validate_post_update(&req).is_ok());
    }
}
