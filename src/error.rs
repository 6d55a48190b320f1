use std::fmt;
use thiserror::Error;

/// Exit status used for every failed command.
pub const FAILURE_EXIT_CODE: i32 = -1;

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Cli(#[from] CliError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Prompt(#[from] PromptError),
    #[error("{stage}: {source}")]
    Stage {
        stage: Stage,
        #[source]
        source: Box<AppError>,
    },
}

#[derive(Error, Debug)]
pub enum CliError {
    #[error("{message}")]
    Usage { command: String, message: String },
    #[error("{0}")]
    InvalidArguments(String),
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64, endpoint: String },
    #[error("HTTP error: {status} {message}")]
    Http {
        status: u16,
        endpoint: String,
        message: String,
    },
    #[error("Authentication failed")]
    Unauthorized {
        status: u16,
        endpoint: String,
        server_message: String,
    },
}

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("You must be logged in to run this command")]
    MustLogin,
    #[error("OAuth provider rejected the request: {reason}")]
    ProviderRejected { reason: String },
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Keyring error: {0}")]
    KeyringError(String),
    #[error("File I/O error at {path}: {source}")]
    FileIo {
        path: String,
        source: std::io::Error,
    },
    #[error("Configuration parse error: {message}")]
    ConfigParseError { message: String },
    #[error("Configuration directory not found")]
    ConfigDirNotFound,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration value for '{field}': {value}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Error, Debug)]
pub enum PromptError {
    #[error("aborted")]
    Aborted,
    #[error("failed to read input: {0}")]
    Input(String),
    #[error("invalid {field}: {reason}")]
    InvalidCard { field: String, reason: String },
}

/// The step of a command that failed, used as the message prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    LoadConfig,
    RetrieveSession,
    Tokenize,
    BillingClient,
    AnalyticsClient,
    AddProfile,
    UpdateProfile,
    ConfirmLink,
    LinkAccounts,
    OAuthLogin,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Stage::LoadConfig => "Could not load config",
            Stage::RetrieveSession => "Could not retrieve session",
            Stage::Tokenize => "Failed to tokenize credit card",
            Stage::BillingClient => "Failed to create a Billing API client",
            Stage::AnalyticsClient => "A problem occurred",
            Stage::AddProfile => "Failed to add billing profile",
            Stage::UpdateProfile => "Failed to update billing profile",
            Stage::ConfirmLink => "Could not link accounts",
            Stage::LinkAccounts => "Unable to link accounts",
            Stage::OAuthLogin => "Could not login with OAuth provider",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ErrorSeverity {
    Critical,
    High,
    Medium,
    Low,
}

impl ErrorSeverity {
    pub fn emoji(&self) -> &'static str {
        match self {
            ErrorSeverity::Critical => "🚨",
            ErrorSeverity::High => "❌",
            ErrorSeverity::Medium => "⚠️",
            ErrorSeverity::Low => "ℹ️",
        }
    }
}

/// Attach a stage description to any error convertible into [`AppError`].
pub trait StageContext<T> {
    fn stage(self, stage: Stage) -> Result<T, AppError>;
}

impl<T, E> StageContext<T> for Result<T, E>
where
    E: Into<AppError>,
{
    fn stage(self, stage: Stage) -> Result<T, AppError> {
        self.map_err(|e| AppError::Stage {
            stage,
            source: Box::new(e.into()),
        })
    }
}

impl AppError {
    /// Innermost error, skipping stage wrappers.
    pub fn root(&self) -> &AppError {
        match self {
            AppError::Stage { source, .. } => source.root(),
            other => other,
        }
    }

    /// Outermost stage this error was raised in, if any.
    pub fn failed_stage(&self) -> Option<Stage> {
        match self {
            AppError::Stage { stage, .. } => Some(*stage),
            _ => None,
        }
    }

    pub fn is_must_login(&self) -> bool {
        matches!(self.root(), AppError::Auth(AuthError::MustLogin))
    }

    /// Name of the command whose usage text should accompany this error.
    pub fn usage_command(&self) -> Option<&str> {
        match self.root() {
            AppError::Cli(CliError::Usage { command, .. }) => Some(command.as_str()),
            _ => None,
        }
    }

    pub fn exit_code(&self) -> i32 {
        FAILURE_EXIT_CODE
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            AppError::Cli(_) => ErrorSeverity::Medium,
            AppError::Api(api_error) => match api_error {
                ApiError::Unauthorized { .. } => ErrorSeverity::High,
                ApiError::Timeout { .. } => ErrorSeverity::Medium,
                ApiError::Http { status, .. } if *status >= 500 => ErrorSeverity::High,
                _ => ErrorSeverity::Medium,
            },
            AppError::Config(_) => ErrorSeverity::High,
            AppError::Auth(_) => ErrorSeverity::High,
            AppError::Storage(_) => ErrorSeverity::Medium,
            AppError::Prompt(PromptError::Aborted) => ErrorSeverity::Low,
            AppError::Prompt(_) => ErrorSeverity::Medium,
            AppError::Stage { source, .. } => source.severity(),
        }
    }

    pub fn troubleshooting_hint(&self) -> Option<String> {
        match self.root() {
            AppError::Auth(AuthError::MustLogin) => {
                Some("'manifold oauth --github' to log in".to_string())
            }
            AppError::Storage(StorageError::ConfigParseError { .. }) => {
                Some("Check the syntax of your manifold config.toml".to_string())
            }
            AppError::Api(ApiError::Timeout { .. }) => {
                Some("Check your internet connection and try again".to_string())
            }
            AppError::Api(ApiError::Unauthorized { .. }) => {
                Some("Your session may have expired, log in again".to_string())
            }
            _ => None,
        }
    }
}
