//! Storage buckets and upload object naming.
//!
//! Object names are `{user_id}-{epoch_millis}.{extension}`, with only ASCII
//! letters and digits kept in the extension so the name can be placed in a
//! URL path as is. Two uploads by the same user in the same millisecond
//! would collide; the storage provider rejects the second one rather than
//! overwriting.

use std::fmt;

use chrono::{DateTime, Utc};

use crate::UserId;

/// Storage bucket for an uploaded file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bucket {
    /// Passport photographs.
    PassportPhotos,
    /// Signature images.
    Signatures,
}

impl Bucket {
    /// Bucket name in the storage provider.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::PassportPhotos => "passport-photos",
            Self::Signatures => "signatures",
        }
    }

    /// User-facing message when an upload to this bucket fails.
    #[must_use]
    pub const fn failure_message(self) -> &'static str {
        match self {
            Self::PassportPhotos => "Failed to upload passport photo",
            Self::Signatures => "Failed to upload signature",
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Extension of an uploaded file: everything after the last `.`, or the
/// whole name when there is no `.`.
#[must_use]
pub fn file_extension(file_name: &str) -> &str {
    file_name.rsplit('.').next().unwrap_or(file_name)
}

/// Object name for an upload made by `user` at `now`.
#[must_use]
pub fn object_name(user: UserId, now: DateTime<Utc>, original_file_name: &str) -> String {
    let extension: String = file_extension(original_file_name)
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect();
    format!("{user}-{}.{extension}", now.timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn extension_is_text_after_last_dot() {
        assert_eq!(file_extension("me.photo.JPG"), "JPG");
        assert_eq!(file_extension("signature.png"), "png");
        assert_eq!(file_extension("noext"), "noext");
        assert_eq!(file_extension("trailing."), "");
    }

    #[test]
    fn object_name_uses_user_and_millis() {
        let user: UserId = "5b8f1c3e-2a4d-4e6f-8a9b-0c1d2e3f4a5b".parse().unwrap();
        let now = Utc.timestamp_millis_opt(1_717_000_000_123).unwrap();
        assert_eq!(
            object_name(user, now, "passport.jpeg"),
            "5b8f1c3e-2a4d-4e6f-8a9b-0c1d2e3f4a5b-1717000000123.jpeg"
        );
    }

    #[test]
    fn object_name_is_url_safe() {
        let user: UserId = "5b8f1c3e-2a4d-4e6f-8a9b-0c1d2e3f4a5b".parse().unwrap();
        let now = Utc.timestamp_millis_opt(1_717_000_000_123).unwrap();
        assert_eq!(
            object_name(user, now, "My Passport"),
            "5b8f1c3e-2a4d-4e6f-8a9b-0c1d2e3f4a5b-1717000000123.MyPassport"
        );
        assert_eq!(
            object_name(user, now, "sig.p#n?g"),
            "5b8f1c3e-2a4d-4e6f-8a9b-0c1d2e3f4a5b-1717000000123.png"
        );
    }

    #[test]
    fn bucket_names() {
        assert_eq!(Bucket::PassportPhotos.name(), "passport-photos");
        assert_eq!(Bucket::Signatures.to_string(), "signatures");
    }
}
