/***************************************/
/*        3rd party libraries          */
/***************************************/
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

/***************************************/
/*       Public data structures        */
/***************************************/
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    #[serde(rename = "idle")]
    Idle,
    #[serde(rename = "movingUp")]
    MovingUp,
    #[serde(rename = "movingDown")]
    MovingDown,
    #[serde(rename = "stopped")]
    Stopped,
}

impl Motion {
    /// Idle and Stopped units may take a new command; moving units may not.
    pub fn accepts_assignment(&self) -> bool {
        matches!(self, Motion::Idle | Motion::Stopped)
    }
}

/// One floor-to-floor ride request. Field names follow the wire format
/// of the request boundary.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Request {
    #[serde(rename = "name")]
    pub rider: String,
    pub from: u8,
    pub to: u8,
}

/// A request bound to a specific unit, consumed once by its worker loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub request: Request,
}

impl Command {
    pub fn new(request: Request) -> Command {
        Command { request }
    }
}

/// Read-only view of an assignable unit, as reported by status queries.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UnitSnapshot {
    pub id: u8,
    pub current_floor: u8,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DispatchError {
    #[error("no idle elevator available")]
    NoEligibleUnit,
    #[error("floor {floor} is outside the serviced range 1..={max}")]
    InvalidFloor { floor: u8, max: u8 },
    #[error("elevator system is shutting down")]
    ShuttingDown,
}
