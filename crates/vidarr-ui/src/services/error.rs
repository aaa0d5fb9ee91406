//! API error taxonomy and user-facing copy.
//!
//! # Design
//! - Classification is pure so the status-code contract is testable
//!   natively: 409 is a soft "already applied", 422 carries a structured
//!   list of offending season/episode pairs, everything else is a plain
//!   rejection with the server's message shown verbatim.
//! - Known machine codes get bespoke localised copy instead of the raw
//!   server string.

use crate::i18n::TranslationBundle;
use std::fmt;
use vidarr_api_models::{EpisodeRef, ErrorBody};

/// Client-side classification of a failed API call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ApiError {
    /// The fetch itself failed (network down, DNS, aborted).
    Transport(String),
    /// Non-2xx response outside the specially-handled codes.
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Server `error` string when the body carried one.
        message: Option<String>,
    },
    /// 409: the change was already applied server-side.
    Conflict {
        /// Machine-readable code when the body carried one.
        code: Option<String>,
    },
    /// 422: partial validation failure with offending sub-items.
    Unprocessable {
        /// Machine-readable code when the body carried one.
        code: Option<String>,
        /// Season/episode pairs the server could not match.
        missing: Vec<EpisodeRef>,
    },
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport(detail) => write!(f, "transport failure: {detail}"),
            Self::Rejected { status, message } => match message {
                Some(message) => write!(f, "rejected ({status}): {message}"),
                None => write!(f, "rejected ({status})"),
            },
            Self::Conflict { code } => {
                write!(f, "conflict: {}", code.as_deref().unwrap_or("already exists"))
            }
            Self::Unprocessable { code, missing } => write!(
                f,
                "unprocessable ({}, {} items)",
                code.as_deref().unwrap_or("validation"),
                missing.len()
            ),
        }
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    /// Classify a non-2xx response from its status and (defensively parsed)
    /// error envelope.
    #[must_use]
    pub fn from_response(status: u16, body: ErrorBody) -> Self {
        match status {
            409 => Self::Conflict { code: body.error },
            422 => Self::Unprocessable {
                code: body.error,
                missing: body.missing_episodes,
            },
            _ => Self::Rejected {
                status,
                message: body.error,
            },
        }
    }

    /// Whether the error means the requested change was already applied,
    /// which callers treat as success with an informational notice.
    #[must_use]
    pub fn is_already_applied(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }

    /// Localised copy for the user. Known machine codes get bespoke text;
    /// unknown server messages are shown verbatim.
    #[must_use]
    pub fn user_message(&self, bundle: &TranslationBundle) -> String {
        match self {
            Self::Transport(_) => bundle.text("error.network"),
            Self::Conflict { code } | Self::Unprocessable { code, missing: _ } => code
                .as_deref()
                .and_then(|code| bespoke_copy(code, bundle))
                .unwrap_or_else(|| self.fallback_copy(bundle)),
            Self::Rejected { message, .. } => message
                .as_deref()
                .map_or_else(
                    || bundle.text("error.generic"),
                    |message| {
                        bespoke_copy(message, bundle).unwrap_or_else(|| message.to_string())
                    },
                ),
        }
    }

    fn fallback_copy(&self, bundle: &TranslationBundle) -> String {
        match self {
            Self::Conflict { .. } => bundle.text("error.already_applied"),
            Self::Unprocessable { missing, .. } => format!(
                "{} ({})",
                bundle.text("error.validation_failed"),
                missing.len()
            ),
            _ => bundle.text("error.generic"),
        }
    }
}

fn bespoke_copy(code: &str, bundle: &TranslationBundle) -> Option<String> {
    match code {
        "already_requested" => Some(bundle.text("error.already_requested")),
        "notifications_required" => Some(bundle.text("error.notifications_required")),
        "missing_episodes" => Some(bundle.text("error.missing_episodes")),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::{LocaleCode, TranslationBundle};

    fn bundle() -> TranslationBundle {
        TranslationBundle::new(LocaleCode::En)
    }

    #[test]
    fn conflict_and_unprocessable_have_dedicated_variants() {
        let conflict = ApiError::from_response(
            409,
            ErrorBody {
                error: Some("already_requested".to_string()),
                missing_episodes: vec![],
            },
        );
        assert!(conflict.is_already_applied());

        let unprocessable = ApiError::from_response(
            422,
            ErrorBody {
                error: Some("missing_episodes".to_string()),
                missing_episodes: vec![EpisodeRef {
                    season_number: 2,
                    episode_number: 9,
                }],
            },
        );
        match unprocessable {
            ApiError::Unprocessable { missing, .. } => assert_eq!(missing.len(), 1),
            other => panic!("expected unprocessable, got {other:?}"),
        }
    }

    #[test]
    fn known_codes_get_bespoke_copy() {
        let bundle = bundle();
        let already = ApiError::Conflict {
            code: Some("already_requested".to_string()),
        };
        assert_eq!(
            already.user_message(&bundle),
            bundle.text("error.already_requested")
        );

        let notifications = ApiError::Rejected {
            status: 400,
            message: Some("notifications_required".to_string()),
        };
        assert_eq!(
            notifications.user_message(&bundle),
            bundle.text("error.notifications_required")
        );
    }

    #[test]
    fn unknown_server_messages_are_shown_verbatim() {
        let bundle = bundle();
        let rejected = ApiError::Rejected {
            status: 403,
            message: Some("quota exhausted for this user".to_string()),
        };
        assert_eq!(rejected.user_message(&bundle), "quota exhausted for this user");
    }

    #[test]
    fn empty_envelope_still_produces_copy() {
        let bundle = bundle();
        let rejected = ApiError::from_response(500, ErrorBody::default());
        assert_eq!(rejected.user_message(&bundle), bundle.text("error.generic"));
        let transport = ApiError::Transport("connection refused".to_string());
        assert_eq!(transport.user_message(&bundle), bundle.text("error.network"));
    }
}
