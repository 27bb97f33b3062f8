
use std::io;

use anyhow::Result;

use crate::redshift::Adjuster;
use crate::state::{Power, RedshiftState, Store};

/// Which field of the stored record `get` should print.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    State,
    Temperature,
}

impl Field {
    fn from_str(s: &str) -> Option<Self> {
        match s {
            "state" => Some(Self::State),
            "temperature" => Some(Self::Temperature),
            _ => None,
        }
    }
}

/// One invocation's worth of parsed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cmd {
    Help,
    Load,
    Toggle(Option<Power>),
    Increase(i32),
    Decrease(i32),
    Set(i32),
    Get(Field),
}

/// Parse failures, printed verbatim as the tool's only user-facing errors.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("insufficient args")]
    InsufficientArgs,

    #[error("invalid {0} value")]
    InvalidValue(String),

    #[error("invalid get arg {0}")]
    InvalidGetArg(String),

    #[error("unknown command {0}")]
    UnknownCommand(String),
}

/// Interpret the invocation arguments (program name excluded).
pub fn parse(args: &[String]) -> Result<Cmd, ParseError> {
    match args {
        [cmd] if cmd == "help" => Ok(Cmd::Help),
        [cmd] if cmd == "load" => Ok(Cmd::Load),
        [cmd] if cmd == "toggle" => Ok(Cmd::Toggle(None)),
        [cmd, arg] => match cmd.as_str() {
            "increase" => int_arg(arg).map(Cmd::Increase),
            "decrease" => int_arg(arg).map(Cmd::Decrease),
            "set" => int_arg(arg).map(Cmd::Set),
            "get" => Field::from_str(arg)
                .map(Cmd::Get)
                .ok_or_else(|| ParseError::InvalidGetArg(arg.clone())),
            "toggle" => Power::from_str(arg)
                .map(|power| Cmd::Toggle(Some(power)))
                .ok_or_else(|| ParseError::InvalidValue(arg.clone())),
            _ => Err(ParseError::UnknownCommand(cmd.clone())),
        },
        _ => Err(ParseError::InsufficientArgs),
    }
}

fn int_arg(arg: &str) -> Result<i32, ParseError> {
    arg.parse()
        .map_err(|_| ParseError::InvalidValue(arg.to_string()))
}

/// Execute a parsed command against the stored state: load, transition,
/// invoke the adjuster, persist. Adjuster and store failures are logged and
/// discarded; only output failures surface to the caller.
pub fn run(
    cmd: &Cmd,
    store: &Store,
    adjuster: &impl Adjuster,
    mut out: impl io::Write,
) -> Result<()> {
    if let Cmd::Help = cmd {
        return help(&mut out, store);
    }
    let mut state = store.load().unwrap_or_else(|error| {
        tracing::warn!(?error, "Failed to load state, assuming defaults.");
        RedshiftState::default()
    });
    apply(cmd, &mut state, adjuster, &mut out)?;
    if let Err(error) = store.store(&state) {
        tracing::warn!(?error, "Failed to persist state.");
    }
    Ok(())
}

fn apply(
    cmd: &Cmd,
    state: &mut RedshiftState,
    adjuster: &impl Adjuster,
    mut out: impl io::Write,
) -> Result<()> {
    match cmd {
        Cmd::Help => (), // handled by the caller, never persists
        Cmd::Toggle(target) => {
            let turn_off = match target {
                None => state.state == Power::On,
                Some(target) => *target == Power::Off,
            };
            if turn_off {
                disable(adjuster);
                state.state = Power::Off;
            } else {
                override_temperature(adjuster, state.temperature);
                state.state = Power::On;
            }
        }
        // TODO Clamp to redshift's supported range once one is chosen.
        Cmd::Increase(delta) => {
            let temperature = state.temperature + delta;
            override_temperature(adjuster, temperature);
            state.temperature = temperature;
        }
        Cmd::Decrease(delta) => {
            let temperature = state.temperature - delta;
            override_temperature(adjuster, temperature);
            state.temperature = temperature;
        }
        Cmd::Set(temperature) => {
            override_temperature(adjuster, *temperature);
            state.temperature = *temperature;
        }
        Cmd::Get(Field::State) => writeln!(out, "{}", state.state)?,
        Cmd::Get(Field::Temperature) => writeln!(out, "{}", state.temperature)?,
        Cmd::Load => match state.state {
            Power::Off => disable(adjuster),
            Power::On => override_temperature(adjuster, state.temperature),
        },
    }
    Ok(())
}

fn disable(adjuster: &impl Adjuster) {
    if let Err(error) = adjuster.disable() {
        tracing::warn!(?error, "Failed to cancel adjustment.");
    }
}

fn override_temperature(adjuster: &impl Adjuster, temperature: i32) {
    if let Err(error) = adjuster.set_temperature(temperature) {
        tracing::warn!(?error, temperature, "Failed to apply temperature.");
    }
}

fn help(mut out: impl io::Write, store: &Store) -> Result<()> {
    writeln!(
        out,
        "redshiftctl {}

Manually control monitor color temperature through redshift.

USAGE
  redshiftctl COMMAND [ARG]

COMMANDS
  toggle [on|off]   switch redshift on or off, flip the current state if no arg is given
  load              re-apply the stored state
  increase TEMP     increase the color temperature by TEMP
  decrease TEMP     decrease the color temperature by TEMP
  set TEMP          set the color temperature to TEMP
  get FIELD         print a field of the stored state, FIELD is state or temperature
  help              print this help information

CONFIGURATION
  State is kept in {}",
        env!("CARGO_PKG_VERSION"),
        store.file().display()
    )?;
    Ok(())
}
