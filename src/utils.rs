/// Round to 2 decimal places, the display precision for averaged scores
/// and money aggregates
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Percentage of part over whole, 0.0 when the whole is zero
pub fn percentage(part: f64, whole: f64) -> f64 {
    if whole == 0.0 {
        0.0
    } else {
        round2(part / whole * 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2() {
        assert_eq!(round2(9.8333333), 9.83);
        assert_eq!(round2(9.87777), 9.88);
        assert_eq!(round2(0.0), 0.0);
    }

    #[test]
    fn test_percentage() {
        assert_eq!(percentage(25.0, 200.0), 12.5);
        assert_eq!(percentage(10.0, 0.0), 0.0);
    }
}
