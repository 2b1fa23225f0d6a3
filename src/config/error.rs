use std::fmt;

/// Setup problems that must stop the player from entering its tick loop.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    NonPositive { field: &'static str, value: f32 },
    NonFinite { field: &'static str },
    NegativeDeadzone(f32),
    ZeroMaxAmmo,
    MissingCollaborator { what: &'static str },
    /// The tuning file exists but could not be read.
    Unreadable(String),
    /// The tuning file is not valid RON for `Tuning`.
    Malformed(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositive { field, value } => {
                write!(f, "tuning field `{field}` must be positive, got {value}")
            }
            Self::NonFinite { field } => write!(f, "tuning field `{field}` must be finite"),
            Self::NegativeDeadzone(value) => {
                write!(f, "directional deadzone must be >= 0, got {value}")
            }
            Self::ZeroMaxAmmo => write!(f, "max_ammo must be at least 1"),
            Self::MissingCollaborator { what } => write!(f, "missing collaborator: {what}"),
            Self::Unreadable(reason) => write!(f, "cannot read tuning file: {reason}"),
            Self::Malformed(reason) => write!(f, "cannot parse tuning file: {reason}"),
        }
    }
}

impl std::error::Error for ConfigError {}
