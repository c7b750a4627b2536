use fit_ranker::FitError;
use serde_json::{Value, json};
use thiserror::Error;

pub const CLI_VERSION: &str = "1.0";

pub const EXIT_OK: i32 = 0;
pub const EXIT_SEMANTIC: i32 = 1;
pub const EXIT_IO: i32 = 2;
pub const EXIT_INVALID_COMMAND: i32 = 3;

/// Malformed command-line value that clap accepted as a string.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct UsageError(pub String);

/// Result of one subcommand: machine data plus its human rendering.
pub struct Output {
    pub data: Value,
    pub text: String,
}

#[derive(Debug)]
pub struct CliError {
    pub code: i32,
    pub command: String,
    pub kind: String,
    pub message: String,
}

impl CliError {
    pub fn invalid(command: &str, message: impl Into<String>) -> Self {
        Self {
            code: EXIT_INVALID_COMMAND,
            command: command.to_string(),
            kind: "InvalidCommand".to_string(),
            message: message.into(),
        }
    }

    /// Exit code and kind come from the first engine or usage error in the chain.
    pub fn from_anyhow(command: &str, err: anyhow::Error) -> Self {
        let (code, kind) = err
            .chain()
            .find_map(|cause| {
                if let Some(fit) = cause.downcast_ref::<FitError>() {
                    Some(classify(fit))
                } else if cause.is::<UsageError>() {
                    Some((EXIT_INVALID_COMMAND, "InvalidArgument"))
                } else {
                    None
                }
            })
            .unwrap_or((EXIT_SEMANTIC, "EngineError"));
        Self {
            code,
            command: command.to_string(),
            kind: kind.to_string(),
            message: format!("{err:#}"),
        }
    }
}

fn classify(err: &FitError) -> (i32, &'static str) {
    match err {
        FitError::MissingInstrument(_) => (EXIT_SEMANTIC, "MissingInstrument"),
        FitError::Io { .. } => (EXIT_IO, "IoError"),
        FitError::Json { .. } => (EXIT_IO, "InvalidJson"),
        FitError::InvalidSortMode(_) | FitError::InvalidDrive(_) => {
            (EXIT_INVALID_COMMAND, "InvalidArgument")
        }
    }
}

fn to_pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

pub fn print_success(json_mode: bool, command: &str, output: Output) {
    if json_mode {
        let response = json!({
            "status": "ok",
            "version": CLI_VERSION,
            "command": command,
            "data": output.data,
            "error": null
        });
        println!("{}", to_pretty(&response));
    } else {
        println!("{}", output.text);
    }
}

pub fn print_error(json_mode: bool, err: &CliError) {
    if json_mode {
        let response = json!({
            "status": "error",
            "version": CLI_VERSION,
            "command": err.command,
            "data": null,
            "error": {
                "code": err.code,
                "type": err.kind,
                "message": err.message
            }
        });
        eprintln!("{}", to_pretty(&response));
    } else {
        eprintln!("Error: {}", err.message);
    }
}

pub fn round3(v: f64) -> f64 {
    (v * 1_000.0).round() / 1_000.0
}

#[cfg(test)]
mod tests {
    use drive_model::Instrument;
    use fit_ranker::FitError;

    use super::{CliError, EXIT_INVALID_COMMAND, EXIT_IO, EXIT_SEMANTIC, UsageError};

    #[test]
    fn engine_errors_map_to_exit_codes() {
        let missing = anyhow::Error::new(FitError::MissingInstrument(Instrument::Private))
            .context("building profile");
        let err = CliError::from_anyhow("profile", missing);
        assert_eq!(err.code, EXIT_SEMANTIC);
        assert_eq!(err.kind, "MissingInstrument");
        assert_eq!(err.message, "building profile: missing private instrument answers");

        let io = FitError::Io {
            path: "/nope".into(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert_eq!(CliError::from_anyhow("rank", io.into()).code, EXIT_IO);
    }

    #[test]
    fn usage_errors_are_invalid_commands() {
        let err = CliError::from_anyhow("custom", UsageError("bad demand".into()).into());
        assert_eq!(err.code, EXIT_INVALID_COMMAND);
        assert_eq!(err.kind, "InvalidArgument");
    }
}
