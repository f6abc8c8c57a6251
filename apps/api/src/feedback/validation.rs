use serde::Deserialize;
use uuid::Uuid;

pub const MIN_RATING: i16 = 1;
pub const MAX_RATING: i16 = 5;
pub const MAX_COMMENT_CHARS: usize = 2000;

#[derive(Debug, Clone, Deserialize)]
pub struct FeedbackRequest {
    #[serde(default)]
    pub user_id: Option<Uuid>,
    #[serde(default)]
    pub prompt_id: Option<Uuid>,
    pub rating: i16,
    #[serde(default)]
    pub comment: Option<String>,
}

/// Validates a feedback submission and normalises the comment: surrounding
/// whitespace trimmed, blank comments dropped.
pub fn validate_feedback(mut request: FeedbackRequest) -> Result<FeedbackRequest, String> {
    if !(MIN_RATING..=MAX_RATING).contains(&request.rating) {
        return Err(format!(
            "rating must be between {MIN_RATING} and {MAX_RATING}, got {}",
            request.rating
        ));
    }

    request.comment = request
        .comment
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty());

    if let Some(comment) = &request.comment {
        let len = comment.chars().count();
        if len > MAX_COMMENT_CHARS {
            return Err(format!(
                "comment must be at most {MAX_COMMENT_CHARS} characters, got {len}"
            ));
        }
    }

    Ok(request)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(rating: i16, comment: Option<&str>) -> FeedbackRequest {
        FeedbackRequest {
            user_id: None,
            prompt_id: Some(Uuid::new_v4()),
            rating,
            comment: comment.map(String::from),
        }
    }

    #[test]
    fn test_rating_bounds() {
        assert!(validate_feedback(request(0, None)).is_err());
        assert!(validate_feedback(request(6, None)).is_err());
        assert!(validate_feedback(request(1, None)).is_ok());
        assert!(validate_feedback(request(5, None)).is_ok());
    }

    #[test]
    fn test_blank_comment_dropped() {
        let validated = validate_feedback(request(4, Some("   "))).unwrap();
        assert!(validated.comment.is_none());
    }

    #[test]
    fn test_comment_trimmed() {
        let validated = validate_feedback(request(4, Some("  great result \n"))).unwrap();
        assert_eq!(validated.comment.as_deref(), Some("great result"));
    }

    #[test]
    fn test_overlong_comment_rejected() {
        let long = "a".repeat(MAX_COMMENT_CHARS + 1);
        let err = validate_feedback(request(3, Some(&long))).unwrap_err();
        assert!(err.contains("at most"));
    }
}
