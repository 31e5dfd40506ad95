use shoplist_core::{ShoplistError, ShoplistResult};

/// Trims `input` and rejects it when nothing is left.
pub fn required_text(field: &str, input: &str) -> ShoplistResult<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ShoplistError::Validation(format!("{field} is required")));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_blank_input() {
        assert!(required_text("Title", "").is_err());
        assert!(required_text("Title", " \t\n").is_err());
    }

    #[test]
    fn test_trims_surrounding_whitespace() {
        assert_eq!(required_text("Title", "  Groceries ").unwrap(), "Groceries");
    }

    #[test]
    fn test_message_names_field() {
        let err = required_text("Member ID", " ").unwrap_err();
        assert_eq!(err.to_string(), "Validation error: Member ID is required");
    }
}
