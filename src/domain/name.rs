use crate::domain::error::{BatfishError, BatfishResult};

/// Check a network or snapshot name before it is used in a request path.
///
/// Names are non-empty and built from ASCII letters, digits, `-`, `_` and `.`,
/// excluding the path components `.` and `..`.
pub fn validate_name(kind: &str, name: &str) -> BatfishResult<()> {
    if name.is_empty() {
        return Err(BatfishError::Configuration(format!("{} name must not be empty", kind)));
    }
    if name == "." || name == ".." {
        return Err(BatfishError::Configuration(format!("invalid {} name '{}'", kind, name)));
    }
    if let Some(c) = name.chars().find(|c| !is_name_char(*c)) {
        return Err(BatfishError::Configuration(format!(
            "invalid character {:?} in {} name '{}'",
            c, kind, name
        )));
    }
    Ok(())
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')
}
