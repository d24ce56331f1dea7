//! Errors surfaced by the activity registry.
//!
//! Every variant is a caller-input error. The `Display` text is what clients
//! receive in the `detail` field, so keep the wording stable: consumers match
//! on "not found", "already signed up", "full" and "not registered".

use thiserror::Error;

/// Result type alias using [`RegistryError`].
pub type Result<T> = std::result::Result<T, RegistryError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// No activity with the requested name exists.
    #[error("Activity not found")]
    NotFound {
        /// The name that was looked up.
        activity: String,
    },

    /// The email is already on the activity's roster.
    #[error("Student {email} is already signed up for {activity}")]
    AlreadyRegistered { activity: String, email: String },

    /// The roster has reached `max_participants`.
    #[error("Activity {activity} is full")]
    ActivityFull { activity: String, max_participants: usize },

    /// Unregister was asked for an email that is not on the roster.
    #[error("Student {email} is not registered for {activity}")]
    NotRegistered { activity: String, email: String },
}

impl RegistryError {
    pub fn not_found(activity: impl Into<String>) -> Self {
        Self::NotFound {
            activity: activity.into(),
        }
    }

    /// Name of the activity the failed operation targeted.
    pub fn activity(&self) -> &str {
        match self {
            Self::NotFound { activity }
            | Self::AlreadyRegistered { activity, .. }
            | Self::ActivityFull { activity, .. }
            | Self::NotRegistered { activity, .. } => activity,
        }
    }

    /// Short machine-friendly tag, used as a log field.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "not_found",
            Self::AlreadyRegistered { .. } => "already_registered",
            Self::ActivityFull { .. } => "activity_full",
            Self::NotRegistered { .. } => "not_registered",
        }
    }
}
