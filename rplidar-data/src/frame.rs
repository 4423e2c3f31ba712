#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Byte payload of one turret-angle capture, as delimited by the frame
/// synchronizer. Delimiter bytes are not included.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RawFrame {
    pub bytes: Vec<u8>,
}

impl RawFrame {
    pub fn new(bytes: Vec<u8>) -> RawFrame {
        RawFrame { bytes }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl From<Vec<u8>> for RawFrame {
    fn from(bytes: Vec<u8>) -> RawFrame {
        RawFrame::new(bytes)
    }
}
