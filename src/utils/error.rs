use std::fmt;
use thiserror::Error;

/// Broad category of a failure, preserved through any amount of wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Config,
    Fetch,
    Extraction,
    Store,
    Notification,
    Network,
    Io,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Config => "config",
            ErrorKind::Fetch => "fetch",
            ErrorKind::Extraction => "extraction",
            ErrorKind::Store => "store",
            ErrorKind::Notification => "notification",
            ErrorKind::Network => "network",
            ErrorKind::Io => "io",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug)]
pub enum WatchError {
    #[error("Missing configuration: {field} environment variable is required")]
    MissingConfigError { field: String },

    #[error("Invalid configuration value for {field} ('{value}'): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("{0}")]
    HttpError(#[from] reqwest::Error),

    #[error("{0}")]
    IoError(#[from] std::io::Error),

    #[error("{message}")]
    FetchError { message: String },

    #[error("{message}")]
    ExtractionError { message: String },

    #[error("{message}")]
    StoreError { message: String },

    #[error("{message}")]
    NotificationError { message: String },

    #[error("{context}: {source}")]
    Context {
        kind: ErrorKind,
        context: String,
        #[source]
        source: Box<WatchError>,
    },
}

pub type Result<T> = std::result::Result<T, WatchError>;

impl WatchError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            WatchError::MissingConfigError { .. }
            | WatchError::InvalidConfigValueError { .. }
            | WatchError::ConfigError { .. } => ErrorKind::Config,
            WatchError::HttpError(_) => ErrorKind::Network,
            WatchError::IoError(_) => ErrorKind::Io,
            WatchError::FetchError { .. } => ErrorKind::Fetch,
            WatchError::ExtractionError { .. } => ErrorKind::Extraction,
            WatchError::StoreError { .. } => ErrorKind::Store,
            WatchError::NotificationError { .. } => ErrorKind::Notification,
            WatchError::Context { kind, .. } => *kind,
        }
    }

    /// Wraps `self` under a context message, keeping it as the source.
    pub fn wrap(self, kind: ErrorKind, context: impl Into<String>) -> Self {
        WatchError::Context {
            kind,
            context: context.into(),
            source: Box::new(self),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.kind() {
            ErrorKind::Config => "Set CRECHE_NE, CRECHE_DA, TELEGRAM_BOT_TOKEN and TELEGRAM_CHAT_ID and check optional overrides",
            ErrorKind::Fetch | ErrorKind::Network => {
                "Check network access to the waitlist site; the next scheduled run will try again"
            }
            ErrorKind::Extraction => {
                "The results page layout may have changed or the applicant identifiers are wrong"
            }
            ErrorKind::Store | ErrorKind::Io => {
                "Inspect or delete the position file; it must contain only digits"
            }
            ErrorKind::Notification => "Verify the bot token and chat id",
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self.kind() {
            ErrorKind::Config => 2,
            _ => 1,
        }
    }
}

pub trait ResultExt<T> {
    fn context(self, kind: ErrorKind, context: impl Into<String>) -> Result<T>;
}

impl<T, E: Into<WatchError>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, kind: ErrorKind, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.into().wrap(kind, context))
    }
}
