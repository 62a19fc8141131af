//! One-shot messages (toasts).
//!
//! A message that has to survive a redirect travels as `?notice=<code>`;
//! only the fixed codes below are accepted, so nothing user-controlled is
//! echoed back. Messages shown on the same response are built directly with
//! [`Toast`].

use serde::Deserialize;

/// Codes that may be carried across a redirect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// Application accepted.
    Submitted,
    /// Signed in.
    SignedIn,
    /// Signed out.
    SignedOut,
    /// Registration needs email confirmation.
    ConfirmEmail,
}

impl Notice {
    /// Query-string code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Submitted => "submitted",
            Self::SignedIn => "signed-in",
            Self::SignedOut => "signed-out",
            Self::ConfirmEmail => "confirm-email",
        }
    }

    /// Parse a query-string code. Unknown codes are ignored.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        [
            Self::Submitted,
            Self::SignedIn,
            Self::SignedOut,
            Self::ConfirmEmail,
        ]
        .into_iter()
        .find(|n| n.code() == code)
    }

    /// Append this notice to a path.
    #[must_use]
    pub fn on(self, path: &str) -> String {
        format!("{path}?notice={}", self.code())
    }

    /// The toast to show.
    #[must_use]
    pub fn toast(self) -> Toast {
        match self {
            Self::Submitted => Toast::success("Application submitted successfully!"),
            Self::SignedIn => Toast::success("Welcome back!"),
            Self::SignedOut => Toast::success("You have been logged out"),
            Self::ConfirmEmail => {
                Toast::success("Check your email to confirm your account, then log in")
            }
        }
    }
}

/// Query parameters carrying a notice.
#[derive(Debug, Default, Deserialize)]
pub struct NoticeQuery {
    /// Optional notice code.
    #[serde(default)]
    pub notice: Option<String>,
}

impl NoticeQuery {
    /// The toast to show, if any.
    #[must_use]
    pub fn toast(&self) -> Option<Toast> {
        self.notice
            .as_deref()
            .and_then(Notice::from_code)
            .map(Notice::toast)
    }
}

/// Toast severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    /// Green.
    Success,
    /// Red.
    Error,
}

/// A user-visible message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    /// Severity.
    pub kind: ToastKind,
    /// Text.
    pub message: String,
}

impl Toast {
    /// Success message.
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Success,
            message: message.into(),
        }
    }

    /// Error message.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Error,
            message: message.into(),
        }
    }
}
