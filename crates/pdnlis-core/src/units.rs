//! Engineering units and SI prefix handling.

use crate::error::{Error, Result};

/// SI suffixes, largest first. Used for both parsing and formatting.
const SUFFIXES: [(&str, f64); 9] = [
    ("t", 1e12),
    ("g", 1e9),
    ("meg", 1e6),
    ("k", 1e3),
    ("m", 1e-3),
    ("u", 1e-6),
    ("n", 1e-9),
    ("p", 1e-12),
    ("f", 1e-15),
];

/// Unit names the simulator may print after the SI suffix.
const UNITS: [&str; 6] = ["", "a", "v", "w", "ohm", "hz"];

/// Parse a SPICE-style value with an optional SI suffix.
///
/// Supported suffixes (case-insensitive):
/// - T (tera, 1e12)
/// - G (giga, 1e9)
/// - MEG (mega, 1e6)
/// - K (kilo, 1e3)
/// - M (milli, 1e-3)
/// - U (micro, 1e-6)
/// - N (nano, 1e-9)
/// - P (pico, 1e-12)
/// - F (femto, 1e-15)
///
/// The suffix may be followed by a unit name (`a`, `v`, `w`, `ohm`, `hz`),
/// so `25ma` reads as `25m`. Any other trailing text, and any value that is
/// not finite, is a [`Error::MalformedNumber`].
pub fn normalize(token: &str) -> Result<f64> {
    let s = token.trim().to_ascii_lowercase();
    let malformed = || Error::MalformedNumber(token.to_string());

    if s == "0" || s == "0." {
        return Ok(0.0);
    }

    let value = match s.parse::<f64>() {
        Ok(v) => v,
        Err(_) => {
            // Numeric part ends at the first character that can't belong to a float
            let num_end = s
                .find(|c: char| {
                    !c.is_ascii_digit() && c != '.' && c != '-' && c != '+' && c != 'e'
                })
                .unwrap_or(s.len());
            if num_end == 0 {
                return Err(malformed());
            }

            let (num_str, rest) = s.split_at(num_end);
            let number: f64 = num_str.parse().map_err(|_| malformed())?;
            let factor = SUFFIXES
                .iter()
                .find(|(name, _)| {
                    rest.strip_prefix(name)
                        .is_some_and(|unit| UNITS.contains(&unit))
                })
                .map(|(_, factor)| *factor)
                .ok_or_else(malformed)?;
            number * factor
        }
    };

    if value.is_finite() {
        Ok(value)
    } else {
        Err(malformed())
    }
}

/// Format a value with an engineering suffix.
pub fn format_value(value: f64) -> String {
    let abs_value = value.abs();

    let scale = if abs_value == 0.0 || (1.0..1e3).contains(&abs_value) {
        None
    } else {
        SUFFIXES.iter().find(|(_, factor)| abs_value >= *factor)
    };

    match scale {
        Some((suffix, factor)) => format!("{:.4}{}", value / factor, suffix),
        None => format!("{:.4}", value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: Result<f64>, b: f64) -> bool {
        a.is_ok_and(|v| (v - b).abs() < b.abs() * 1e-10 + 1e-20)
    }

    #[test]
    fn test_zero_forms() {
        assert_eq!(normalize("0"), Ok(0.0));
        assert_eq!(normalize("0."), Ok(0.0));
        assert_eq!(normalize(" 0 "), Ok(0.0));
    }

    #[test]
    fn test_plain_number() {
        assert_eq!(normalize("2.95"), Ok(2.95));
        assert_eq!(normalize("-2.5"), Ok(-2.5));
        assert!(approx_eq(normalize("1.5060e-01"), 0.1506));
        assert!(approx_eq(normalize("3.765e-3"), 0.003765));
    }

    #[test]
    fn test_every_suffix() {
        for (suffix, factor) in SUFFIXES {
            for number in [1.0, 2.5, 150.0] {
                let token = format!("{}{}", number, suffix);
                assert!(
                    approx_eq(normalize(&token), number * factor),
                    "{} -> {:?}",
                    token,
                    normalize(&token)
                );
            }
        }
    }

    #[test]
    fn test_meg_is_not_milli() {
        assert!(approx_eq(normalize("10meg"), 10e6));
        assert!(approx_eq(normalize("10MEG"), 10e6));
        assert!(approx_eq(normalize("10m"), 10e-3));
    }

    #[test]
    fn test_suffix_examples() {
        assert!(approx_eq(normalize("150m"), 0.15));
        assert!(approx_eq(normalize("25m"), 0.025));
        assert!(approx_eq(normalize("3.5p"), 3.5e-12));
        assert!(approx_eq(normalize("4.7K"), 4.7e3));
        assert!(approx_eq(normalize("-1.2u"), -1.2e-6));
    }

    #[test]
    fn test_trailing_unit_letters() {
        assert!(approx_eq(normalize("25ma"), 0.025));
        assert!(approx_eq(normalize("1.5megohm"), 1.5e6));
        assert!(approx_eq(normalize("3.3MV"), 3.3e-3));
        assert!(approx_eq(normalize("2kHz"), 2e3));
    }

    #[test]
    fn test_unknown_trailing_text_rejected() {
        assert_eq!(normalize("12mx"), Err(Error::MalformedNumber("12mx".into())));
        assert!(normalize("10mil").is_err());
        assert!(normalize("4.7kk").is_err());
        assert!(normalize("1megx").is_err());
    }

    #[test]
    fn test_non_finite_rejected() {
        for token in ["nan", "NaN", "inf", "-inf", "infinity", "1e400", "1e400meg"] {
            assert_eq!(
                normalize(token),
                Err(Error::MalformedNumber(token.into())),
                "{}",
                token
            );
        }
    }

    #[test]
    fn test_malformed() {
        assert_eq!(normalize("abc"), Err(Error::MalformedNumber("abc".into())));
        assert!(normalize("").is_err());
        assert!(normalize("12x").is_err());
        assert!(normalize("1.2.3m").is_err());
        assert!(normalize("m").is_err());
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(1000.0), "1.0000k");
        assert_eq!(format_value(0.025), "25.0000m");
        assert_eq!(format_value(2e6), "2.0000meg");
        assert_eq!(format_value(1e-9), "1.0000n");
        assert_eq!(format_value(0.0), "0.0000");
        assert_eq!(format_value(-2.5), "-2.5000");
        assert_eq!(format_value(0.6), "600.0000m");
        assert_eq!(format_value(3e12), "3.0000t");
    }
}
