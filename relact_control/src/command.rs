//! Command surface used by the request layer.
//!
//! Every command produces a [`CommandReply`] carrying the outcome and the
//! status taken right after the command ran, so callers never need a second
//! round trip.

use crate::controller::{ActuatorController, StatusSnapshot};
use crate::error::ControlError;

/// External request to the controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Begin cycling.
    Start,
    /// Stop cycling.
    Stop,
    /// Change the wait between cycles.
    Configure {
        /// New wait in seconds.
        wait_seconds: f64,
    },
    /// Read status only.
    Status,
}

/// What a successful command did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outcome {
    /// A run was started.
    Started,
    /// The run was stopped.
    Stopped,
    /// The wait interval was changed.
    Configured {
        /// Accepted wait in seconds.
        wait_seconds: f64,
    },
    /// Status was read.
    Status,
}

/// Result of [`execute`].
#[derive(Debug, Clone, PartialEq)]
pub struct CommandReply {
    /// Outcome or the reason the command was refused.
    pub result: Result<Outcome, ControlError>,
    /// Status after the command.
    pub status: StatusSnapshot,
}

impl CommandReply {
    /// Whether the command succeeded.
    #[inline]
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    /// Human-readable message for the reply.
    pub fn message(&self) -> String {
        match &self.result {
            Ok(Outcome::Started) => "Actuator cycling started".to_string(),
            Ok(Outcome::Stopped) => "Actuator cycling stopped".to_string(),
            Ok(Outcome::Configured { wait_seconds }) => {
                format!("Wait time set to {wait_seconds} seconds")
            }
            Ok(Outcome::Status) => "OK".to_string(),
            Err(e) => e.to_string(),
        }
    }
}

/// Run one command against the controller.
///
/// `Start` and `Stop` may block (stop joins the runner thread); async callers
/// should run this on a blocking pool.
pub fn execute(controller: &ActuatorController, command: Command) -> CommandReply {
    let result = match command {
        Command::Start => controller.start().map(|()| Outcome::Started),
        Command::Stop => controller.stop().map(|()| Outcome::Stopped),
        Command::Configure { wait_seconds } => controller
            .set_wait_seconds(wait_seconds)
            .map(|()| Outcome::Configured { wait_seconds }),
        Command::Status => Ok(Outcome::Status),
    };
    CommandReply {
        result,
        status: controller.status(),
    }
}
