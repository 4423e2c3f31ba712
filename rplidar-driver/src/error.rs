use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RplidarError {
    #[error("Operation timed out")]
    Timeout,
    #[error("No usable measurements were decoded from the session")]
    NoMeasurements,
    #[error("The byte source was exhausted")]
    SourceExhausted,
    #[error(transparent)]
    SerialError(#[from] serialport::Error),
    #[error(transparent)]
    IoError(#[from] io::Error),
}
