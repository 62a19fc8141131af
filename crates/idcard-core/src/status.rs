//! Application status lifecycle and badge presentation.
//!
//! The portal only ever creates applications in `Pending`. Every other
//! transition is made by staff outside this system; the portal just reads the
//! value back and maps it to a badge.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Lifecycle stage of an application record.
///
/// Unknown strings coming back from the record store are kept verbatim in
/// `Other` so they survive a read and still render.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(from = "String", into = "String")]
pub enum ApplicationStatus {
    /// Submitted, awaiting review.
    #[default]
    Pending,
    /// Under review or being printed.
    Processing,
    /// Printed.
    Completed,
    /// Ready for pickup at the ICT unit.
    Ready,
    /// Rejected by staff.
    Rejected,
    /// A value this build does not know about.
    Other(String),
}

impl ApplicationStatus {
    /// The wire representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Completed => "completed",
            Self::Ready => "ready",
            Self::Rejected => "rejected",
            Self::Other(raw) => raw,
        }
    }

    /// Whether the card can be collected.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready)
    }

    /// Badge lookup for the dashboard.
    #[must_use]
    pub fn badge(&self) -> StatusBadge {
        let (icon, variant, color) = match self {
            Self::Pending => (BadgeIcon::Clock, BadgeVariant::Secondary, "text-yellow-600"),
            Self::Processing => (BadgeIcon::AlertCircle, BadgeVariant::Default, "text-blue-600"),
            Self::Completed => (BadgeIcon::CheckCircle, BadgeVariant::Default, "text-green-600"),
            Self::Ready => (BadgeIcon::IdCard, BadgeVariant::Default, "text-green-600"),
            Self::Rejected => (BadgeIcon::Clock, BadgeVariant::Destructive, "text-red-600"),
            Self::Other(_) => (BadgeIcon::Clock, BadgeVariant::Secondary, "text-gray-600"),
        };

        StatusBadge {
            icon,
            variant,
            color,
            label: self.label(),
        }
    }

    fn label(&self) -> String {
        let raw = match self {
            Self::Other(raw) if raw.trim().is_empty() => "pending",
            other => other.as_str(),
        };
        capitalize(raw.trim())
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl From<String> for ApplicationStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "pending" => Self::Pending,
            "processing" => Self::Processing,
            "completed" => Self::Completed,
            "ready" => Self::Ready,
            "rejected" => Self::Rejected,
            _ => Self::Other(value),
        }
    }
}

impl From<ApplicationStatus> for String {
    fn from(status: ApplicationStatus) -> Self {
        match status {
            ApplicationStatus::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Icon shown inside a status badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeIcon {
    /// Clock face.
    Clock,
    /// Circle with exclamation mark.
    AlertCircle,
    /// Circle with check mark.
    CheckCircle,
    /// ID card.
    IdCard,
}

impl BadgeIcon {
    /// Icon name as used by the stylesheet (`icon-{name}`).
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Clock => "clock",
            Self::AlertCircle => "alert-circle",
            Self::CheckCircle => "check-circle",
            Self::IdCard => "id-card",
        }
    }
}

/// Visual weight of a status badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeVariant {
    /// Filled primary badge.
    Default,
    /// Muted badge.
    Secondary,
    /// Red, destructive badge.
    Destructive,
}

impl BadgeVariant {
    /// Variant name as used by the stylesheet (`badge-{name}`).
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Secondary => "secondary",
            Self::Destructive => "destructive",
        }
    }
}

/// Everything needed to draw a status badge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusBadge {
    /// Badge icon.
    pub icon: BadgeIcon,
    /// Badge variant.
    pub variant: BadgeVariant,
    /// Text color class.
    pub color: &'static str,
    /// Human label.
    pub label: String,
}
