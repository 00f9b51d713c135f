//! Per-field value normalization and validation
//!
//! Every check returns `Err` with a short, fixed reason string. The reasons
//! end up verbatim in the `error` column of the errors file.

use serde_json::Value;

/// Maximum SKU length, in characters
pub const MAX_SKU_LEN: usize = 64;

/// Required postcode length, in digits
pub const POST_CODE_LEN: usize = 4;

/// Currency tokens removed from price text before parsing
const CURRENCY_TOKENS: &[&str] = &["AUD", "aud", "$", "€", "£"];

/// Trim, strip one layer of surrounding double quotes, trim again.
///
/// Absent values become the empty string.
pub fn normalize_text(value: Option<&str>) -> String {
    let Some(value) = value else {
        return String::new();
    };
    let trimmed = value.trim();
    let trimmed = trimmed.strip_prefix('"').unwrap_or(trimmed);
    let trimmed = trimmed.strip_suffix('"').unwrap_or(trimmed);
    trimmed.trim().to_string()
}

/// Render a JSON scalar as raw cell text.
///
/// `null` becomes empty; nested arrays and objects keep their JSON form.
pub fn json_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

/// SKU: non-empty, alphanumeric or one of `-_./`, at most 64 characters
pub fn validate_sku(sku: &str) -> Result<(), &'static str> {
    if sku.is_empty() {
        return Err("sku empty");
    }
    if !sku
        .chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '-' | '_' | '.' | '/'))
    {
        return Err("sku has invalid characters");
    }
    if sku.chars().count() > MAX_SKU_LEN {
        return Err("sku too long");
    }
    Ok(())
}

/// Postcode: exactly four ASCII digits
pub fn validate_postcode(post_code: &str) -> Result<(), &'static str> {
    if post_code.is_empty() {
        return Err("postCode empty");
    }
    if post_code.len() != POST_CODE_LEN || !post_code.bytes().all(|b| b.is_ascii_digit()) {
        return Err("postCode must be 4 digits");
    }
    Ok(())
}

/// Parse a price after removing thousands separators, currency tokens and
/// spaces. The result is finite, non-negative and rounded to 2 decimals.
pub fn normalize_price(price: &str) -> Result<f64, &'static str> {
    if price.is_empty() {
        return Err("price empty");
    }

    let mut clean = price.replace(',', "");
    for token in CURRENCY_TOKENS {
        clean = clean.replace(token, "");
    }
    clean.retain(|c| c != ' ');

    let value: f64 = clean.parse().map_err(|_| "price not a number")?;
    if value < 0.0 {
        return Err("price negative");
    }
    if !value.is_finite() {
        return Err("price not finite");
    }
    Ok(round_to(value, 2))
}

/// Round to `places` decimal digits using the shortest decimal rendering.
///
/// Goes through `format!` so that values such as `19.995` round on their
/// exact binary value rather than on a scaled approximation.
pub fn round_to(value: f64, places: usize) -> f64 {
    if !value.is_finite() {
        return value;
    }
    // `+ 0.0` folds a negative zero into positive zero.
    format!("{:.*}", places, value)
        .parse::<f64>()
        .map(|v| v + 0.0)
        .unwrap_or(value)
}

/// Render a price the way the exported CSV and group labels show it:
/// integral values keep one decimal (`20.0`), others use the shortest form.
pub fn price_to_string(price: f64) -> String {
    let text = price.to_string();
    if price.is_finite() && !text.contains('.') {
        format!("{}.0", text)
    } else {
        text
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_text() {
        assert_eq!(normalize_text(None), "");
        assert_eq!(normalize_text(Some("  2000 ")), "2000");
        assert_eq!(normalize_text(Some(" \"ABC\" ")), "ABC");
        assert_eq!(normalize_text(Some("\"\"ABC\"\"")), "\"ABC\"");
        assert_eq!(normalize_text(Some("\" padded \"")), "padded");
    }

    #[test]
    fn test_json_text() {
        assert_eq!(json_text(&json!(null)), "");
        assert_eq!(json_text(&json!("A1")), "A1");
        assert_eq!(json_text(&json!(2000)), "2000");
        assert_eq!(json_text(&json!(10.5)), "10.5");
        assert_eq!(json_text(&json!(true)), "true");
    }

    #[test]
    fn test_validate_sku() {
        assert!(validate_sku("ABC-123").is_ok());
        assert!(validate_sku("a_b.c/d").is_ok());
        assert_eq!(validate_sku(""), Err("sku empty"));
        assert_eq!(validate_sku("AB C"), Err("sku has invalid characters"));
        assert_eq!(validate_sku("AB#C"), Err("sku has invalid characters"));
        assert!(validate_sku(&"A".repeat(64)).is_ok());
        assert_eq!(validate_sku(&"A".repeat(65)), Err("sku too long"));
    }

    #[test]
    fn test_validate_postcode() {
        assert!(validate_postcode("2000").is_ok());
        assert!(validate_postcode("0800").is_ok());
        assert_eq!(validate_postcode(""), Err("postCode empty"));
        assert_eq!(validate_postcode("204"), Err("postCode must be 4 digits"));
        assert_eq!(validate_postcode("20000"), Err("postCode must be 4 digits"));
        assert_eq!(validate_postcode("20a0"), Err("postCode must be 4 digits"));
    }

    #[test]
    fn test_normalize_price() {
        assert_eq!(normalize_price("$19.99"), Ok(19.99));
        assert_eq!(normalize_price("1,234.5"), Ok(1234.5));
        assert_eq!(normalize_price("AUD 12"), Ok(12.0));
        assert_eq!(normalize_price("12 aud"), Ok(12.0));
        assert_eq!(normalize_price("£ 3.456"), Ok(3.46));
        assert_eq!(normalize_price("€0"), Ok(0.0));
        assert_eq!(normalize_price(""), Err("price empty"));
        assert_eq!(normalize_price("abc"), Err("price not a number"));
        assert_eq!(normalize_price("-5"), Err("price negative"));
        assert_eq!(normalize_price("inf"), Err("price not finite"));
        assert_eq!(normalize_price("NaN"), Err("price not finite"));
    }

    #[test]
    fn test_currency_letters_are_not_stripped_individually() {
        // Only the whole "AUD" token is removed, so stray letters stay.
        assert_eq!(normalize_price("1D"), Err("price not a number"));
        assert_eq!(normalize_price("U5"), Err("price not a number"));
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(19.994, 2), 19.99);
        assert_eq!(round_to(2.675, 2), 2.67);
        assert_eq!(round_to(-0.0, 2).to_string(), "0");
        assert_eq!(round_to(1.23456789, 6), 1.234568);
    }

    #[test]
    fn test_price_to_string() {
        assert_eq!(price_to_string(20.0), "20.0");
        assert_eq!(price_to_string(19.99), "19.99");
        assert_eq!(price_to_string(0.5), "0.5");
    }
}
