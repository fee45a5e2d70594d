//! Input validation for admin and student forms.
//!
//! Every check returns [`CoreError::Validation`] carrying the message shown
//! to the user, so handlers can propagate it with `?`.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::CoreError;

/// Minimum length for course, module and lesson titles.
pub const MIN_TITLE_LENGTH: usize = 3;

/// Minimum length for course slugs.
pub const MIN_SLUG_LENGTH: usize = 3;

/// Minimum length for course and lesson descriptions.
pub const MIN_DESCRIPTION_LENGTH: usize = 10;

/// Maximum length of a lesson comment.
pub const MAX_COMMENT_LENGTH: usize = 2000;

/// Minimum password length for registration and password changes.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Maximum title length accepted by the video host.
pub const MAX_VIDEO_TITLE_LENGTH: usize = 256;

/// Title used when a video is created without one.
pub const DEFAULT_VIDEO_TITLE: &str = "Untitled Video";

static SLUG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").expect("valid regex"));

static THUMBNAIL_PATH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"thumbnails/(.+)$").expect("valid regex"));

fn invalid(msg: impl Into<String>) -> CoreError {
    CoreError::Validation(msg.into())
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

// ---------------------------------------------------------------------------
// Courses, modules, lessons
// ---------------------------------------------------------------------------

/// Validate the fields of a new course.
pub fn validate_course(
    title: &str,
    slug: &str,
    description: &str,
    thumbnail_url: &str,
) -> Result<(), CoreError> {
    if char_len(title) < MIN_TITLE_LENGTH {
        return Err(invalid("El título debe tener al menos 3 caracteres"));
    }
    validate_slug(slug)?;
    if char_len(description) < MIN_DESCRIPTION_LENGTH {
        return Err(invalid("La descripción debe tener al menos 10 caracteres"));
    }
    validate_url(thumbnail_url)?;
    Ok(())
}

/// Lowercase letters, digits and single hyphens between groups.
pub fn validate_slug(slug: &str) -> Result<(), CoreError> {
    if char_len(slug) < MIN_SLUG_LENGTH {
        return Err(invalid("El slug debe tener al menos 3 caracteres"));
    }
    if !SLUG_RE.is_match(slug) {
        return Err(invalid(
            "El slug solo puede contener letras minúsculas, números y guiones",
        ));
    }
    Ok(())
}

/// Absolute `http` or `https` URL.
pub fn validate_url(value: &str) -> Result<(), CoreError> {
    match url::Url::parse(value) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.has_host() => Ok(()),
        _ => Err(invalid("Debe ser una URL válida")),
    }
}

/// Validate a module title, returning it trimmed.
pub fn validate_module_title(title: &str) -> Result<String, CoreError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(invalid("El título del módulo es obligatorio"));
    }
    if char_len(title) < MIN_TITLE_LENGTH {
        return Err(invalid("El título debe tener al menos 3 caracteres"));
    }
    Ok(title.to_string())
}

/// Trimmed, validated lesson fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonFields {
    pub title: String,
    pub description: String,
    pub days_to_unlock: i32,
}

/// Validate the fields of a new or edited lesson.
pub fn validate_lesson(
    title: &str,
    description: &str,
    days_to_unlock: i32,
) -> Result<LessonFields, CoreError> {
    let title = title.trim();
    let description = description.trim();

    if title.is_empty() {
        return Err(invalid("El título de la lección es obligatorio"));
    }
    if char_len(title) < MIN_TITLE_LENGTH {
        return Err(invalid("El título debe tener al menos 3 caracteres"));
    }
    if description.is_empty() {
        return Err(invalid("La descripción es obligatoria"));
    }
    if char_len(description) < MIN_DESCRIPTION_LENGTH {
        return Err(invalid("La descripción debe tener al menos 10 caracteres"));
    }
    if days_to_unlock < 0 {
        return Err(invalid(
            "Los días para desbloquear deben ser un número positivo",
        ));
    }

    Ok(LessonFields {
        title: title.to_string(),
        description: description.to_string(),
        days_to_unlock,
    })
}

// ---------------------------------------------------------------------------
// Comments
// ---------------------------------------------------------------------------

/// Validate a lesson comment, returning it trimmed.
pub fn validate_comment(content: &str) -> Result<String, CoreError> {
    let content = content.trim();
    if content.is_empty() {
        return Err(invalid("Escribe un comentario"));
    }
    if char_len(content) > MAX_COMMENT_LENGTH {
        return Err(invalid("El comentario no puede exceder 2000 caracteres"));
    }
    Ok(content.to_string())
}

// ---------------------------------------------------------------------------
// Accounts
// ---------------------------------------------------------------------------

/// Check a new password and its confirmation.
pub fn validate_new_password(password: &str, confirmation: &str) -> Result<(), CoreError> {
    if password.is_empty() {
        return Err(invalid("Escribe la nueva contraseña."));
    }
    if char_len(password) < MIN_PASSWORD_LENGTH {
        return Err(invalid("La contraseña debe tener al menos 6 caracteres."));
    }
    if password != confirmation {
        return Err(invalid("Las contraseñas no coinciden."));
    }
    Ok(())
}

/// Sign-up form fields, before validation.
#[derive(Debug, Clone, Default)]
pub struct Registration<'a> {
    pub email: &'a str,
    pub password: &'a str,
    pub confirm_password: &'a str,
    pub display_name: &'a str,
    pub phone: &'a str,
}

/// Validate a sign-up form. All fields are required.
pub fn validate_registration(form: &Registration<'_>) -> Result<(), CoreError> {
    let required = [
        form.email.trim(),
        form.password,
        form.confirm_password,
        form.display_name.trim(),
        form.phone.trim(),
    ];
    if required.iter().any(|v| v.is_empty()) {
        return Err(invalid("Todos los campos son obligatorios."));
    }
    if form.password != form.confirm_password {
        return Err(invalid("Las contraseñas no coinciden."));
    }
    if char_len(form.password) < MIN_PASSWORD_LENGTH {
        return Err(invalid("La contraseña debe tener al menos 6 caracteres."));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Media
// ---------------------------------------------------------------------------

/// Trim a video title, default it when blank, and cap its length.
pub fn normalize_video_title(title: Option<&str>) -> String {
    let title = title.map(str::trim).filter(|t| !t.is_empty());
    title
        .unwrap_or(DEFAULT_VIDEO_TITLE)
        .chars()
        .take(MAX_VIDEO_TITLE_LENGTH)
        .collect()
}

/// Object path inside the thumbnails bucket.
///
/// Accepts either a full public URL (`.../thumbnails/abc/file.jpg` yields
/// `abc/file.jpg`) or a bare path, which is returned trimmed. Blank input
/// yields `None`.
pub fn thumbnail_storage_path(path_or_url: &str) -> Option<String> {
    let trimmed = path_or_url.trim();
    if trimmed.is_empty() {
        return None;
    }
    let path = THUMBNAIL_PATH_RE
        .captures(trimmed)
        .and_then(|c| c.get(1))
        .map_or(trimmed, |m| m.as_str());
    Some(path.to_string())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn message(err: CoreError) -> String {
        match err {
            CoreError::Validation(msg) => msg,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn valid_course_passes() {
        assert!(validate_course(
            "Acordeón básico",
            "acordeon-basico",
            "Aprende desde cero",
            "https://cdn.example.com/thumbnails/a.jpg"
        )
        .is_ok());
    }

    #[test]
    fn slug_rejects_uppercase_and_double_hyphen() {
        assert_matches!(validate_slug("Acordeon"), Err(CoreError::Validation(_)));
        assert_matches!(validate_slug("curso--uno"), Err(CoreError::Validation(_)));
        assert_matches!(validate_slug("-curso"), Err(CoreError::Validation(_)));
        assert!(validate_slug("curso-1").is_ok());
    }

    #[test]
    fn short_slug_reports_length_first() {
        let msg = message(validate_slug("ab").unwrap_err());
        assert!(msg.contains("al menos 3"));
    }

    #[test]
    fn course_requires_absolute_http_url() {
        let err = validate_course("Título", "slug-ok", "Descripción larga", "not a url");
        assert_eq!(message(err.unwrap_err()), "Debe ser una URL válida");
        assert!(validate_url("ftp://example.com/x.png").is_err());
    }

    #[test]
    fn module_title_is_trimmed() {
        assert_eq!(validate_module_title("  Intro  ").unwrap(), "Intro");
        assert_eq!(
            message(validate_module_title("   ").unwrap_err()),
            "El título del módulo es obligatorio"
        );
        assert!(validate_module_title("ab").is_err());
    }

    #[test]
    fn lesson_rejects_negative_days() {
        let err = validate_lesson("Escalas", "Practica las escalas mayores", -1).unwrap_err();
        assert!(message(err).contains("número positivo"));
    }

    #[test]
    fn lesson_fields_are_trimmed() {
        let fields = validate_lesson(" Escalas ", " Practica las escalas mayores ", 7).unwrap();
        assert_eq!(fields.title, "Escalas");
        assert_eq!(fields.description, "Practica las escalas mayores");
        assert_eq!(fields.days_to_unlock, 7);
    }

    #[test]
    fn comment_length_limit_counts_characters() {
        let at_limit = "ñ".repeat(MAX_COMMENT_LENGTH);
        assert!(validate_comment(&at_limit).is_ok());

        let over = "a".repeat(MAX_COMMENT_LENGTH + 1);
        assert!(validate_comment(&over).is_err());
        assert!(validate_comment("   ").is_err());
    }

    #[test]
    fn registration_requires_every_field() {
        let form = Registration {
            email: "a@b.com",
            password: "secret1",
            confirm_password: "secret1",
            display_name: "Ana",
            phone: "",
        };
        assert_eq!(
            message(validate_registration(&form).unwrap_err()),
            "Todos los campos son obligatorios."
        );
    }

    #[test]
    fn registration_checks_confirmation_before_length() {
        let form = Registration {
            email: "a@b.com",
            password: "abc",
            confirm_password: "abd",
            display_name: "Ana",
            phone: "555",
        };
        assert_eq!(
            message(validate_registration(&form).unwrap_err()),
            "Las contraseñas no coinciden."
        );
    }

    #[test]
    fn new_password_rules() {
        assert!(validate_new_password("", "").is_err());
        assert!(validate_new_password("12345", "12345").is_err());
        assert!(validate_new_password("123456", "1234567").is_err());
        assert!(validate_new_password("123456", "123456").is_ok());
    }

    #[test]
    fn video_title_defaults_and_truncates() {
        assert_eq!(normalize_video_title(None), DEFAULT_VIDEO_TITLE);
        assert_eq!(normalize_video_title(Some("   ")), DEFAULT_VIDEO_TITLE);
        assert_eq!(normalize_video_title(Some(" Clase 1 ")), "Clase 1");
        let long = "x".repeat(300);
        assert_eq!(normalize_video_title(Some(&long)).len(), MAX_VIDEO_TITLE_LENGTH);
    }

    #[test]
    fn thumbnail_path_from_public_url() {
        assert_eq!(
            thumbnail_storage_path(
                "https://xyz.example.co/storage/v1/object/public/thumbnails/abc/file.jpg"
            ),
            Some("abc/file.jpg".to_string())
        );
        assert_eq!(
            thumbnail_storage_path(" abc/file.jpg "),
            Some("abc/file.jpg".to_string())
        );
        assert_eq!(thumbnail_storage_path("  "), None);
    }
}
