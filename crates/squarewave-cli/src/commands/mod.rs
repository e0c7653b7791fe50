//! CLI command implementations

pub mod generate;
pub mod plot;

use squarewave_signal::SignalError;

/// Finds the stable signal error code anywhere in an error's context chain.
pub fn error_code(err: &anyhow::Error) -> Option<&'static str> {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<SignalError>())
        .map(SignalError::code)
}
