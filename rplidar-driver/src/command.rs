use crate::constants::{CMD_RESUME, CMD_START, CMD_STOP};
use crate::error::RplidarError;
use crate::source::{read_exact, ByteSource};
use log::{debug, warn};
use rplidar_data::AngleStep;

/// Single-byte control commands understood by the scanner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Stop,
    Start,
    Resume,
}

impl Command {
    pub fn byte(self) -> u8 {
        match self {
            Command::Stop => CMD_STOP,
            Command::Start => CMD_START,
            Command::Resume => CMD_RESUME,
        }
    }

    pub(crate) fn name(self) -> &'static str {
        match self {
            Command::Stop => "STOP",
            Command::Start => "START",
            Command::Resume => "RESUME",
        }
    }
}

/// Write one command byte and verify the device's one-byte echo.
///
/// A wrong or missing echo is logged and tolerated; the device is assumed
/// to still behave correctly. Only transport failures propagate.
pub fn send_command<S: ByteSource + ?Sized>(
    source: &mut S,
    command: Command,
) -> Result<(), RplidarError> {
    source.write_bytes(&[command.byte()])?;
    check_echo(source, command.byte(), command.name())
}

/// START handshake. For a non-default angle step the preset byte follows
/// the command in the same write and the device echoes both in turn.
pub fn send_start_with_preset<S: ByteSource + ?Sized>(
    source: &mut S,
    preset: Option<AngleStep>,
) -> Result<(), RplidarError> {
    match preset {
        None => send_command(source, Command::Start),
        Some(step) => {
            source.write_bytes(&[CMD_START, step.preset_byte()])?;
            check_echo(source, CMD_START, "START")?;
            check_echo(source, step.preset_byte(), "angle-step preset")
        }
    }
}

fn check_echo<S: ByteSource + ?Sized>(
    source: &mut S,
    expected: u8,
    what: &str,
) -> Result<(), RplidarError> {
    match read_exact(source, 1) {
        Ok(echo) if echo[0] == expected => {
            debug!("{} confirmed by echo", what);
            Ok(())
        }
        Ok(echo) => {
            warn!(
                "{} echo mismatch: expected {:#04X}, received {:#04X}",
                what, expected, echo[0]
            );
            Ok(())
        }
        Err(RplidarError::Timeout) => {
            warn!("{} echo missing", what);
            Ok(())
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::ReplaySource;

    #[test]
    fn test_send_command_with_matching_echo() {
        let mut source = ReplaySource::new(vec![vec![0x02]]);
        send_command(&mut source, Command::Resume).unwrap();
        assert_eq!(source.written(), &[0x02]);
    }

    #[test]
    fn test_echo_mismatch_is_not_fatal() {
        let mut source = ReplaySource::new(vec![vec![0x7E]]);
        assert!(send_command(&mut source, Command::Stop).is_ok());
    }

    #[test]
    fn test_missing_echo_is_not_fatal() {
        let mut source = ReplaySource::empty();
        assert!(send_command(&mut source, Command::Start).is_ok());
        assert_eq!(source.written(), &[0x01]);
    }

    #[test]
    fn test_start_with_preset_writes_both_bytes() {
        let mut source = ReplaySource::new(vec![vec![0x01], vec![0x04]]);
        send_start_with_preset(&mut source, Some(AngleStep::FourDegrees)).unwrap();
        assert_eq!(source.written(), &[0x01, 0x04]);
    }

    #[test]
    fn test_start_without_preset_writes_single_byte() {
        let mut source = ReplaySource::new(vec![vec![0x01]]);
        send_start_with_preset(&mut source, None).unwrap();
        assert_eq!(source.written(), &[0x01]);
    }
}
