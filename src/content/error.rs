//! Rendering error types.

use thiserror::Error;

/// Failure to turn a post body into HTML
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("markup conversion failed: {cause}")]
    Conversion { cause: String },

    #[error("content is {size} bytes, over the {limit} byte limit")]
    TooLarge { size: usize, limit: usize },
}

impl RenderError {
    pub fn conversion(cause: impl ToString) -> Self {
        RenderError::Conversion {
            cause: cause.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_error_display() {
        let err = RenderError::conversion("unbalanced input");
        assert_eq!(
            err.to_string(),
            "markup conversion failed: unbalanced input"
        );

        let err = RenderError::TooLarge { size: 10, limit: 4 };
        assert!(err.to_string().contains("10 bytes"));
        assert!(err.to_string().contains("4 byte limit"));
    }
}
