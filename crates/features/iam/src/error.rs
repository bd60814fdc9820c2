use std::borrow::Cow;

/// A specialized [`IamError`] enum of this crate.
#[ccentral_derive::ccentral_error]
pub enum IamError {
    /// A record (or the document holding it) is missing required fields or has the wrong shape.
    #[error("Malformed permission group {location}{}: {message}", format_context(.context))]
    MalformedRecord {
        location: Cow<'static, str>,
        message: Cow<'static, str>,
        context: Option<Cow<'static, str>>,
    },

    #[error("Duplicate permission group name '{name}'{}", format_context(.context))]
    DuplicateName { name: String, context: Option<Cow<'static, str>> },

    #[error(
        "Permission group '{group}' lists unknown editable group '{target}'{}",
        format_context(.context)
    )]
    DanglingReference { group: String, target: String, context: Option<Cow<'static, str>> },

    #[error(
        "Permission group '{group}' has invalid access scope '{value}' for module '{module}'{}",
        format_context(.context)
    )]
    InvalidAccessScope {
        group: String,
        module: String,
        value: String,
        context: Option<Cow<'static, str>>,
    },

    /// Lookup of an unknown group. Callers usually treat this as "no permissions".
    #[error("Permission group '{name}' not found{}", format_context(.context))]
    NotFound { name: String, context: Option<Cow<'static, str>> },

    #[error("No permission group registry has been published{}", format_context(.context))]
    NotLoaded { context: Option<Cow<'static, str>> },

    #[error("Definitions IO error{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    #[error("Definitions JSON error{}: {source}", format_context(.context))]
    Json { source: serde_json::Error, context: Option<Cow<'static, str>> },

    /// Internal fallback for unexpected issues or logic errors.
    #[error("Internal IAM error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl IamError {
    /// Returns `true` for errors produced while validating a dataset.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::MalformedRecord { .. }
                | Self::DuplicateName { .. }
                | Self::DanglingReference { .. }
                | Self::InvalidAccessScope { .. }
        )
    }
}
