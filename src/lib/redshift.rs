use std::process::{Command, ExitStatus};

const PROGRAM: &str = "redshift";

/// Invocation failures. The command runner logs and discards these; the
/// adjustment is best-effort.
#[derive(Debug, thiserror::Error)]
pub enum AdjusterError {
    #[error("failed to launch {program}: {source}")]
    Launch {
        program: &'static str,
        source: std::io::Error,
    },

    #[error("{program} exited with {status}")]
    Exit {
        program: &'static str,
        status: ExitStatus,
    },
}

/// The external display-temperature capability: two operations, both
/// synchronous. Results are surfaced so the caller can decide to ignore them.
pub trait Adjuster {
    /// Cancel any active adjustment and reset the screen.
    fn disable(&self) -> Result<(), AdjusterError>;

    /// Apply `temperature` in one-shot mode, preserving gamma.
    fn set_temperature(&self, temperature: i32) -> Result<(), AdjusterError>;
}

/// Shells out to the redshift binary found in PATH.
#[derive(Debug, Default)]
pub struct Redshift;

impl Redshift {
    pub fn new() -> Self {
        Self
    }

    fn exec(&self, args: &[&str]) -> Result<(), AdjusterError> {
        tracing::debug!(program = PROGRAM, ?args, "Executing adjuster.");
        let out = Command::new(PROGRAM).args(args).output().map_err(|source| {
            AdjusterError::Launch {
                program: PROGRAM,
                source,
            }
        })?;
        if out.status.success() {
            Ok(())
        } else {
            tracing::debug!(
                program = PROGRAM,
                ?args,
                stderr = %String::from_utf8_lossy(&out.stderr),
                "Adjuster reported failure."
            );
            Err(AdjusterError::Exit {
                program: PROGRAM,
                status: out.status,
            })
        }
    }
}

impl Adjuster for Redshift {
    fn disable(&self) -> Result<(), AdjusterError> {
        self.exec(&["-o", "-x"])
    }

    fn set_temperature(&self, temperature: i32) -> Result<(), AdjusterError> {
        self.exec(&["-P", "-o", "-O", &temperature.to_string()])
    }
}
