//! Precision Boost Overdrive scalar encoding for Family 19h
//!
//! The get and set commands are asymmetric: the SMU reports the scalar as a
//! raw IEEE-754 float, while the set command takes the scalar in hundredths.

/// Argument word for `SET_PBO_SCALAR`, or `None` if the scalar cannot be
/// represented (negative, NaN, infinite or too large).
pub fn pbo_scalar_arg(scalar: f32) -> Option<u32> {
    if !scalar.is_finite() || scalar < 0.0 {
        return None;
    }

    let hundredths = (f64::from(scalar) * 100.0).round();
    if hundredths > f64::from(u32::MAX) {
        return None;
    }
    Some(hundredths as u32)
}

/// Decode the scalar from response word 0 of `GET_PBO_SCALAR`
pub fn pbo_scalar_from_word(word: u32) -> f32 {
    f32::from_bits(word)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pbo_scalar_arg_rounds() {
        assert_eq!(pbo_scalar_arg(1.0), Some(100));
        assert_eq!(pbo_scalar_arg(2.5), Some(250));
        assert_eq!(pbo_scalar_arg(7.999), Some(800));
        assert_eq!(pbo_scalar_arg(0.0), Some(0));
    }

    #[test]
    fn test_pbo_scalar_arg_rejects_unrepresentable() {
        assert_eq!(pbo_scalar_arg(-1.0), None);
        assert_eq!(pbo_scalar_arg(f32::NAN), None);
        assert_eq!(pbo_scalar_arg(f32::INFINITY), None);
        assert_eq!(pbo_scalar_arg(1e30), None);
    }

    #[test]
    fn test_pbo_scalar_from_word() {
        assert_eq!(pbo_scalar_from_word(0x4000_0000), 2.0);
    }
}
