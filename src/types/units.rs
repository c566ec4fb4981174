//! Conversions between human-readable amounts and base units.

use alloy::primitives::U256;

/// Decimals of the native currency.
pub const ETHER_DECIMALS: u8 = 18;

/// Format a U256 value with decimals to a human-readable string.
pub fn format_units(value: U256, decimals: u8) -> String {
    if value == U256::ZERO {
        return "0".to_string();
    }

    let value_str = value.to_string();
    let decimals = decimals as usize;

    if decimals == 0 {
        return value_str;
    }

    let len = value_str.len();
    if len <= decimals {
        // Value is less than 1, pad with zeros
        let zeros = decimals - len;
        let decimal_part = value_str.trim_end_matches('0');
        format!("0.{}{}", "0".repeat(zeros), decimal_part)
    } else {
        let (integer, decimal) = value_str.split_at(len - decimals);
        let decimal = decimal.trim_end_matches('0');
        if decimal.is_empty() {
            integer.to_string()
        } else {
            format!("{}.{}", integer, decimal)
        }
    }
}

/// Format a wei amount as ETH.
pub fn format_ether(wei: U256) -> String {
    format_units(wei, ETHER_DECIMALS)
}

/// Parse a human-readable amount string to U256 with decimals.
///
/// Digits beyond `decimals` are truncated.
pub fn parse_units(amount: &str, decimals: u8) -> Result<U256, String> {
    let amount = amount.trim();

    if amount.is_empty() {
        return Err("Amount cannot be empty".to_string());
    }

    if amount.starts_with('-') {
        return Err("Amount cannot be negative".to_string());
    }

    let decimals = decimals as usize;
    let multiplier = U256::from(10).pow(U256::from(decimals));
    let parts: Vec<&str> = amount.split('.').collect();

    let (integer_value, fraction_value) = match parts.as_slice() {
        [integer] => {
            (integer.parse::<U256>().map_err(|e| format!("Invalid amount: {}", e))?, U256::ZERO)
        }
        [integer, fraction] => {
            if integer.is_empty() && fraction.is_empty() {
                return Err("Amount has no digits".to_string());
            }

            let mut fraction = fraction.to_string();
            if fraction.len() > decimals {
                fraction.truncate(decimals);
            } else {
                fraction.push_str(&"0".repeat(decimals - fraction.len()));
            }

            let integer_value = if integer.is_empty() {
                U256::ZERO
            } else {
                integer.parse::<U256>().map_err(|e| format!("Invalid integer part: {}", e))?
            };

            let fraction_value = if fraction.is_empty() {
                U256::ZERO
            } else {
                fraction.parse::<U256>().map_err(|e| format!("Invalid fraction part: {}", e))?
            };

            (integer_value, fraction_value)
        }
        _ => return Err("Invalid amount format".to_string()),
    };

    integer_value
        .checked_mul(multiplier)
        .and_then(|v| v.checked_add(fraction_value))
        .ok_or_else(|| "Amount too large".to_string())
}

/// Parse an ETH amount string to wei.
pub fn parse_ether(amount: &str) -> Result<U256, String> {
    parse_units(amount, ETHER_DECIMALS)
}
