//! Fixed-precision rounding shared by every aggregation stage.
//!
//! `f64::round` rounds half away from zero, which is the rule applied to course
//! averages (tenths) and GPA figures (hundredths).

pub(crate) fn round_tenths(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

pub(crate) fn round_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_half_away_from_zero() {
        assert_eq!(round_tenths(7.25), 7.3);
        assert_eq!(round_tenths(-7.25), -7.3);
        assert_eq!(round_hundredths(8.125), 8.13);
    }

    #[test]
    fn keeps_already_rounded_values() {
        assert_eq!(round_tenths(7.6), 7.6);
        assert_eq!(round_hundredths(7.94), 7.94);
        assert_eq!(round_hundredths(0.0), 0.0);
    }
}
