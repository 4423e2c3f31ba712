use crate::constants::BAUD_RATE;
use crate::error::RplidarError;
use crate::source::ByteSource;
use serialport::SerialPort;
use std::io::{Read, Write};

/// Open the scanner's serial port with the project-wide settings.
pub fn open_port(port_name: &str) -> Result<Box<dyn SerialPort>, RplidarError> {
    let port = serialport::new(port_name, BAUD_RATE)
        .timeout(std::time::Duration::from_millis(10))
        .open()?;
    Ok(port)
}

impl ByteSource for Box<dyn SerialPort> {
    fn bytes_available(&mut self) -> Result<usize, RplidarError> {
        let n_u32: u32 = self.bytes_to_read()?;
        Ok(n_u32.try_into().unwrap_or(0))
    }

    fn read_bytes(&mut self, n: usize) -> Result<Vec<u8>, RplidarError> {
        let mut packet: Vec<u8> = vec![0; n];
        self.read(packet.as_mut_slice())?;
        Ok(packet)
    }

    fn write_bytes(&mut self, data: &[u8]) -> Result<(), RplidarError> {
        self.write_all(data)?;
        Ok(())
    }
}

/// Discard any bytes the device already queued.
pub(crate) fn flush(port: &mut Box<dyn SerialPort>) -> Result<(), RplidarError> {
    let n_read = port.bytes_available().unwrap_or(0);
    if n_read == 0 {
        return Ok(());
    }
    port.read_bytes(n_read)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::sleep_ms;
    use serialport::TTYPort;

    #[test]
    fn test_byte_source_over_tty_pair() {
        let (mut master, slave) = TTYPort::pair().expect("Unable to create ptty pair");
        let mut slave_ptr = Box::new(slave) as Box<dyn SerialPort>;

        master.write_all(&[0xA5, 0x5A, 0x05]).unwrap();
        sleep_ms(10);

        assert_eq!(slave_ptr.bytes_available().unwrap(), 3);
        assert_eq!(slave_ptr.read_bytes(3).unwrap(), vec![0xA5, 0x5A, 0x05]);

        slave_ptr.write_bytes(&[0x01]).unwrap();
        sleep_ms(10);
        let mut buf = [0u8; 1];
        master.read_exact(&mut buf).unwrap();
        assert_eq!(buf, [0x01]);
    }

    #[test]
    fn test_flush_discards_pending_input() {
        let (mut master, slave) = TTYPort::pair().expect("Unable to create ptty pair");
        let mut slave_ptr = Box::new(slave) as Box<dyn SerialPort>;

        master.write_all(&[0x10, 0x20, 0x30]).unwrap();
        sleep_ms(10);

        flush(&mut slave_ptr).unwrap();
        assert_eq!(slave_ptr.bytes_available().unwrap(), 0);
    }
}
