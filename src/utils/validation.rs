//! Input validation utilities

use crate::constants;

/// Validate username format
pub fn validate_username(username: &str) -> Result<(), &'static str> {
    if username.len() < 3 {
        return Err("Username must be at least 3 characters");
    }
    if username.len() > 32 {
        return Err("Username must be at most 32 characters");
    }
    if !username
        .chars()
        .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
    {
        return Err("Username can only contain letters, numbers, underscores, and hyphens");
    }
    Ok(())
}

/// Validate password strength
pub fn validate_password(password: &str) -> Result<(), &'static str> {
    if password.len() < 8 {
        return Err("Password must be at least 8 characters");
    }
    if password.len() > 128 {
        return Err("Password must be at most 128 characters");
    }
    Ok(())
}

/// Validate user role
pub fn validate_role(role: &str) -> Result<(), &'static str> {
    if constants::roles::ALL.contains(&role) {
        Ok(())
    } else {
        Err("Invalid role")
    }
}

/// Validate a booking option identifier code
pub fn validate_identifier(identifier: &str) -> Result<(), &'static str> {
    if identifier.is_empty() {
        return Err("Identifier cannot be empty");
    }
    if identifier.len() > 32 {
        return Err("Identifier must be at most 32 characters");
    }
    if !identifier
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err("Identifier can only contain letters, numbers, underscores, and hyphens");
    }
    Ok(())
}

/// Sanitize string input (remove control characters, trim whitespace)
pub fn sanitize_string(input: &str) -> String {
    input
        .chars()
        .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
        .collect::<String>()
        .trim()
        .to_string()
}

/// Validate and sanitize a booking option title
pub fn validate_option_title(title: &str) -> Result<String, &'static str> {
    let sanitized = sanitize_string(title);
    if sanitized.is_empty() {
        return Err("Option title cannot be empty");
    }
    if sanitized.len() as u64 > constants::MAX_OPTION_TITLE_LENGTH {
        return Err("Option title must be at most 256 characters");
    }
    Ok(sanitized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_identifier() {
        assert!(validate_identifier("RUSTHIST1").is_ok());
        assert!(validate_identifier("with-dash_ok").is_ok());
        assert!(validate_identifier("").is_err());
        assert!(validate_identifier("no spaces").is_err());
    }

    #[test]
    fn test_validate_option_title_sanitizes() {
        let title = validate_option_title("  Rust for historians\u{7}  ").unwrap();
        assert_eq!(title, "Rust for historians");
        assert!(validate_option_title("   ").is_err());
    }

    #[test]
    fn test_validate_role() {
        assert!(validate_role("admin").is_ok());
        assert!(validate_role("wizard").is_err());
    }
}
