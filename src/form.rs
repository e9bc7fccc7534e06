//! Wish form validation — turns raw field text into a [`WishRequest`].
//!
//! Validation happens at this boundary only: `name` and `gift_wishes` must be
//! non-empty (whitespace-only counts as empty); the nice/naughty lists are
//! optional free text and pass through unchanged.  Invalid input never
//! reaches the session orchestrator or the network layer.

use serde::Serialize;
use thiserror::Error;

// ---------------------------------------------------------------------------
// ValidationError
// ---------------------------------------------------------------------------

/// Errors produced by [`WishForm::validate`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// The child's name field was empty.
    #[error("Please enter the child's name")]
    EmptyName,

    /// The gift-wishes field was empty.
    #[error("Please enter at least one gift wish")]
    EmptyGiftWishes,
}

// ---------------------------------------------------------------------------
// WishRequest
// ---------------------------------------------------------------------------

/// The validated payload submitted to the transcript service.
///
/// Field names are renamed to the camelCase wire format the service expects
/// (`niceItems`, `naughtyItems`, `gifts`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WishRequest {
    /// Child's name (non-empty).
    pub name: String,
    /// Free-text list of nice things done this year (may be empty).
    #[serde(rename = "niceItems")]
    pub nice_items: String,
    /// Free-text list of naughty things done this year (may be empty).
    #[serde(rename = "naughtyItems")]
    pub naughty_items: String,
    /// What the child is wishing for (non-empty).
    #[serde(rename = "gifts")]
    pub gift_wishes: String,
}

// ---------------------------------------------------------------------------
// WishForm
// ---------------------------------------------------------------------------

/// Stateless validator for the four raw form fields.
pub struct WishForm;

impl WishForm {
    /// Validate the raw field values and build a [`WishRequest`].
    ///
    /// `name` and `gift_wishes` are required; a value consisting only of
    /// whitespace is rejected.  The optional fields are passed through
    /// verbatim, empty or not.
    pub fn validate(
        name: &str,
        nice_items: &str,
        naughty_items: &str,
        gift_wishes: &str,
    ) -> Result<WishRequest, ValidationError> {
        if name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if gift_wishes.trim().is_empty() {
            return Err(ValidationError::EmptyGiftWishes);
        }

        Ok(WishRequest {
            name: name.to_string(),
            nice_items: nice_items.to_string(),
            naughty_items: naughty_items.to_string(),
            gift_wishes: gift_wishes.to_string(),
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_input_builds_request() {
        let req = WishForm::validate("Lina", "helped grandma", "", "a red bicycle").unwrap();
        assert_eq!(req.name, "Lina");
        assert_eq!(req.nice_items, "helped grandma");
        assert_eq!(req.naughty_items, "");
        assert_eq!(req.gift_wishes, "a red bicycle");
    }

    #[test]
    fn empty_name_is_rejected() {
        let err = WishForm::validate("", "", "", "a sled").unwrap_err();
        assert_eq!(err, ValidationError::EmptyName);
    }

    #[test]
    fn whitespace_name_is_rejected() {
        let err = WishForm::validate("   ", "", "", "a sled").unwrap_err();
        assert_eq!(err, ValidationError::EmptyName);
    }

    #[test]
    fn empty_gift_wishes_is_rejected() {
        let err = WishForm::validate("Lina", "nice", "naughty", "").unwrap_err();
        assert_eq!(err, ValidationError::EmptyGiftWishes);
    }

    #[test]
    fn whitespace_gift_wishes_is_rejected() {
        let err = WishForm::validate("Lina", "", "", " \n\t").unwrap_err();
        assert_eq!(err, ValidationError::EmptyGiftWishes);
    }

    /// Empty optional fields are permitted and preserved as-is.
    #[test]
    fn optional_fields_may_be_empty() {
        let req = WishForm::validate("Lina", "", "", "books").unwrap();
        assert!(req.nice_items.is_empty());
        assert!(req.naughty_items.is_empty());
    }

    /// Optional fields are not trimmed — they are passed through unchanged.
    #[test]
    fn optional_fields_are_not_trimmed() {
        let req = WishForm::validate("Lina", "  shared toys  ", "\tteased cat", "books").unwrap();
        assert_eq!(req.nice_items, "  shared toys  ");
        assert_eq!(req.naughty_items, "\tteased cat");
    }

    /// The serialised request must use the camelCase wire field names.
    #[test]
    fn request_serialises_to_wire_format() {
        let req = WishForm::validate("Lina", "nice", "naughty", "books").unwrap();
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["name"], "Lina");
        assert_eq!(json["niceItems"], "nice");
        assert_eq!(json["naughtyItems"], "naughty");
        assert_eq!(json["gifts"], "books");
    }

    #[test]
    fn validation_messages_are_user_facing() {
        assert_eq!(
            ValidationError::EmptyName.to_string(),
            "Please enter the child's name"
        );
        assert_eq!(
            ValidationError::EmptyGiftWishes.to_string(),
            "Please enter at least one gift wish"
        );
    }
}
