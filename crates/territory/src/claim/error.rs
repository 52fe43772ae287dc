use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a claim attempt or a territory was refused. All variants are
/// recoverable; `Display` is the user-facing reason.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ClaimError {
    #[error("not enough points recorded ({have}/{need}), keep walking")]
    InsufficientPoints { have: usize, need: usize },
    #[error("path too short ({length_m:.0} m), walk at least {need_m:.0} m")]
    PathTooShort { length_m: f64, need_m: f64 },
    #[error("return to start, you are {distance_remaining_m:.0} m away")]
    LoopNotClosed { distance_remaining_m: f64 },
    #[error("path too simple, walk a larger area")]
    TerritoryTooSimple,
    #[error("territory too small, need {deficit_m2:.0} m² more area")]
    TerritoryTooSmall { deficit_m2: f64 },
    #[error("invalid coordinate in territory")]
    InvalidCoordinate,
    #[error("invalid territory shape, at least 3 vertices are required")]
    DegeneratePolygon,
    #[error("not ready to claim yet, keep walking")]
    NotReady,
}

/// Fieldless discriminant of `ClaimError` for structured matching and logs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InsufficientPoints,
    PathTooShort,
    LoopNotClosed,
    TerritoryTooSimple,
    TerritoryTooSmall,
    InvalidCoordinate,
    DegeneratePolygon,
    NotReady,
}

impl ClaimError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClaimError::InsufficientPoints { .. } => ErrorKind::InsufficientPoints,
            ClaimError::PathTooShort { .. } => ErrorKind::PathTooShort,
            ClaimError::LoopNotClosed { .. } => ErrorKind::LoopNotClosed,
            ClaimError::TerritoryTooSimple => ErrorKind::TerritoryTooSimple,
            ClaimError::TerritoryTooSmall { .. } => ErrorKind::TerritoryTooSmall,
            ClaimError::InvalidCoordinate => ErrorKind::InvalidCoordinate,
            ClaimError::DegeneratePolygon => ErrorKind::DegeneratePolygon,
            ClaimError::NotReady => ErrorKind::NotReady,
        }
    }
}
