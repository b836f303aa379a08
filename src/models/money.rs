//! Money value object.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// An amount in a currency, `{"amount": "12.50", "code": "USD"}` on the wire.
///
/// The amount is kept as the decimal string the server sent so that a value
/// read from a response and written back in a request is unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Money {
    #[serde(deserialize_with = "decimal_string")]
    pub amount: String,
    /// ISO 4217 currency code.
    pub code: String,
}

impl Money {
    pub fn new(amount: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            amount: amount.into(),
            code: code.into(),
        }
    }

    /// The amount as a float, if it parses.
    pub fn as_f64(&self) -> Option<f64> {
        self.amount.parse().ok()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount, self.code)
    }
}

/// Accept a decimal amount sent either as a string or as a bare number.
fn decimal_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Number(n) => n.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_string_is_preserved() {
        let wire = r#"{"amount":"10.10","code":"CAD"}"#;
        let money: Money = serde_json::from_str(wire).unwrap();
        assert_eq!(money, Money::new("10.10", "CAD"));
        assert_eq!(serde_json::to_string(&money).unwrap(), wire);
    }

    #[test]
    fn test_numeric_amount_is_accepted() {
        let money: Money = serde_json::from_str(r#"{"amount":42,"code":"USD"}"#).unwrap();
        assert_eq!(money.amount, "42");
        assert_eq!(money.as_f64(), Some(42.0));
        assert_eq!(money.to_string(), "42 USD");
    }
}
