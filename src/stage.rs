//! Outcomes of the two-step flows.
//!
//! Both flows are a prerequisite step followed by a dependent step. A failed
//! prerequisite aborts the flow; a failed dependent step is only reported.

use std::process::ExitCode;

use solana_sdk::signature::Signature;

use crate::error::{PrereqError, Result};

/// Result of the prerequisite step.
#[derive(Debug)]
pub enum StageOne<T> {
    Ok(T),
    Fatal(PrereqError),
}

/// Result of the dependent step.
#[derive(Debug)]
pub enum StageTwo {
    Ok(Signature),
    Reported(PrereqError),
}

impl<T> From<Result<T>> for StageOne<T> {
    fn from(result: Result<T>) -> Self {
        match result {
            Ok(value) => StageOne::Ok(value),
            Err(err) => StageOne::Fatal(err),
        }
    }
}

impl From<Result<Signature>> for StageTwo {
    fn from(result: Result<Signature>) -> Self {
        match result {
            Ok(signature) => StageTwo::Ok(signature),
            Err(err) => StageTwo::Reported(err),
        }
    }
}

impl StageTwo {
    pub fn signature(&self) -> Option<&Signature> {
        match self {
            StageTwo::Ok(signature) => Some(signature),
            StageTwo::Reported(_) => None,
        }
    }

    pub fn error(&self) -> Option<&PrereqError> {
        match self {
            StageTwo::Ok(_) => None,
            StageTwo::Reported(err) => Some(err),
        }
    }
}

/// What a whole flow did.
#[derive(Debug)]
pub enum FlowReport<T> {
    /// The first step failed; the second was never started.
    Aborted(PrereqError),
    Completed { first: T, second: StageTwo },
}

impl<T> FlowReport<T> {
    pub fn is_aborted(&self) -> bool {
        matches!(self, FlowReport::Aborted(_))
    }

    /// Non-zero only when the prerequisite step failed.
    pub fn exit_code(&self) -> ExitCode {
        match self {
            FlowReport::Aborted(_) => ExitCode::FAILURE,
            FlowReport::Completed { .. } => ExitCode::SUCCESS,
        }
    }
}
