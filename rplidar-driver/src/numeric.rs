/// Q6 angle from record bytes 1 and 2. Bit 7 of the low byte is reserved.
pub(crate) fn to_angle_q6(b1: u8, b2: u8) -> u16 {
    ((b2 as u16) << 7) + ((b1 & 0x7F) as u16)
}

/// Decoded angle in degrees, wrapped to `[0, 360)`.
pub(crate) fn to_angle_degrees(b1: u8, b2: u8) -> f64 {
    (to_angle_q6(b1, b2) as f64 / 64.) % 360.
}

/// Q2 distance from record bytes 3 (low) and 4 (high).
pub(crate) fn to_distance_q2(b3: u8, b4: u8) -> u16 {
    ((b4 as u16) << 8) | (b3 as u16)
}

/// Decoded distance in millimeters.
pub(crate) fn to_distance_mm(b3: u8, b4: u8) -> f64 {
    to_distance_q2(b3, b4) as f64 / 4.
}

pub(crate) fn degree_to_radian(degree: f64) -> f64 {
    degree * std::f64::consts::PI / 180.
}

/// Rounding used at export boundaries only.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.).round() / 100.
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_angle_degrees() {
        // 128 in Q6 is exactly 2 degrees
        assert_eq!(to_angle_q6(0x00, 0x01), 128);
        assert_eq!(to_angle_degrees(0x00, 0x01), 2.0);
        // reserved bit in the low byte is masked off
        assert_eq!(to_angle_q6(0x80, 0x00), 0);
    }

    #[test]
    fn test_angle_wraps_to_less_than_360() {
        // largest encodable Q6 value: b1 = 0x7F, b2 = 0xFF
        let degrees = to_angle_degrees(0x7F, 0xFF);
        assert!((0.0..360.0).contains(&degrees));
    }

    #[test]
    fn test_to_distance_mm() {
        assert_eq!(to_distance_q2(0x20, 0x00), 32);
        assert_eq!(to_distance_mm(0x20, 0x00), 8.0);
        assert_eq!(to_distance_q2(0x00, 0x01), 256);
        assert_eq!(to_distance_mm(0x00, 0x01), 64.0);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(1234.5678), 1234.57);
        assert_eq!(round2(-0.004), -0.0);
    }
}
