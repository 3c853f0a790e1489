//! Digit normalization and the arithmetic shared by the checksum validators

/// Strip every character outside ASCII `0`-`9`
///
/// Total: empty or arbitrary text yields a (possibly empty) string.
///
/// # Examples
/// ```
/// use fiscal_identifiers::normalize;
/// assert_eq!(normalize("529.982.247-25"), "52998224725");
/// assert_eq!(normalize("(11) 91234-5678"), "11912345678");
/// assert_eq!(normalize("sem número"), "");
/// ```
pub fn normalize(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

#[cfg(feature = "uniffi")]
#[uniffi::export]
pub fn normalize_ffi(raw: String) -> String {
    normalize(&raw)
}

/// Normalize an optional field value; an absent value becomes `""`
pub fn normalize_opt(raw: Option<&str>) -> String {
    raw.map(normalize).unwrap_or_default()
}

/// True when a non-empty digit string repeats a single character
pub fn all_same_digit(digits: &str) -> bool {
    let mut chars = digits.chars();
    match chars.next() {
        Some(first) => chars.all(|c| c == first),
        None => false,
    }
}

/// Modulo-11 check digit used by CPF and CNPJ: `0` when the remainder is
/// below 2, otherwise `11 - remainder`
pub fn mod11_check_digit(sum: u32) -> u8 {
    match sum % 11 {
        0 | 1 => 0,
        remainder => (11 - remainder) as u8,
    }
}

/// Numeric values of an already-normalized digit string
pub(crate) fn digit_values(digits: &str) -> Vec<u8> {
    digits
        .bytes()
        .filter(u8::is_ascii_digit)
        .map(|b| b - b'0')
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_punctuation() {
        assert_eq!(normalize("11.222.333/0001-81"), "11222333000181");
        assert_eq!(normalize("01310-100"), "01310100");
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
    }

    #[test]
    fn test_normalize_ignores_non_ascii_digits() {
        // Arabic-Indic and full-width digits are not part of any Brazilian mask
        assert_eq!(normalize("١٢٣"), "");
        assert_eq!(normalize("１2３"), "2");
    }

    #[test]
    fn test_normalize_opt() {
        assert_eq!(normalize_opt(None), "");
        assert_eq!(normalize_opt(Some("a1b2")), "12");
    }

    #[test]
    fn test_all_same_digit() {
        assert!(all_same_digit("00000000000"));
        assert!(all_same_digit("7"));
        assert!(!all_same_digit("00000000001"));
        assert!(!all_same_digit(""));
    }

    #[test]
    fn test_mod11_check_digit() {
        assert_eq!(mod11_check_digit(22), 0); // remainder 0
        assert_eq!(mod11_check_digit(23), 0); // remainder 1
        assert_eq!(mod11_check_digit(24), 9); // remainder 2
        assert_eq!(mod11_check_digit(32), 1); // remainder 10
    }

    #[test]
    fn test_digit_values() {
        assert_eq!(digit_values("0917"), vec![0, 9, 1, 7]);
    }
}
