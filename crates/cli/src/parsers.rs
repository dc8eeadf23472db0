use check_format_engine::path_security::validate_suffix;
use std::{fmt::Display, str::FromStr};

fn parse_bounded_number<T>(s: &str, min: T, max: Option<T>) -> Result<T, String>
where
    T: Copy + PartialOrd + Display + FromStr,
    <T as FromStr>::Err: Display,
{
    let value = s
        .parse::<T>()
        .map_err(|err| format!("invalid number '{s}': {err}"))?;
    if value < min {
        return Err(format!("value must be at least {min}"));
    }
    if let Some(max_bound) = max
        && value > max_bound
    {
        return Err(format!("value must be at most {max_bound}"));
    }
    Ok(value)
}

/// Upper bound for `--timeout`: one day.
pub const MAX_TIMEOUT_SECS: u64 = 86_400;

/// Parse a per-invocation timeout in seconds, between 1 and [`MAX_TIMEOUT_SECS`].
///
/// # Errors
/// Returns an error if the input string is not a valid number or is out of range.
pub fn parse_timeout_secs(s: &str) -> Result<u64, String> {
    parse_bounded_number(s, 1, Some(MAX_TIMEOUT_SECS))
}

/// Parse a file name suffix such as `.txt`.
///
/// # Errors
/// Returns an error if the suffix is empty or could move a file out of its
/// directory.
pub fn parse_suffix(s: &str) -> Result<String, String> {
    validate_suffix(s).map_err(|e| e.to_string())?;
    Ok(s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_timeout_secs() {
        assert_eq!(parse_timeout_secs("30").unwrap(), 30);
        assert_eq!(parse_timeout_secs("86400").unwrap(), MAX_TIMEOUT_SECS);
        assert!(parse_timeout_secs("0").is_err());
        assert!(parse_timeout_secs("86401").is_err());
        assert!(parse_timeout_secs("18446744073709551615").is_err());
        assert!(parse_timeout_secs("-1").is_err());
        assert!(parse_timeout_secs("abc").is_err());
    }

    #[test]
    fn test_parse_suffix() {
        assert_eq!(parse_suffix(".csv").unwrap(), ".csv");
        assert!(parse_suffix("").is_err());
        assert!(parse_suffix("/tmp").is_err());
    }
}
