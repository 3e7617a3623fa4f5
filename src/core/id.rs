//! Identifier generation for invoices and line items.
//!
//! Ids are short random base36 strings. They are unique with high probability
//! within one process, are not time-ordered and are not suitable as secrets.
//! Nothing checks a new id against existing records.

use rand::Rng;

const ID_LENGTH: usize = 9;
const ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const INVOICE_NUMBER_RANGE: u32 = 10_000;

/// Generates a 9-character base36 identifier.
#[must_use]
pub fn generate_id() -> String {
    let mut rng = rand::rng();
    (0..ID_LENGTH)
        .map(|_| char::from(ALPHABET[rng.random_range(0..ALPHABET.len())]))
        .collect()
}

/// Generates a display invoice number such as `"INV-4821"`.
///
/// The number is random and not checked for uniqueness.
#[must_use]
pub fn generate_invoice_number(prefix: &str) -> String {
    let n = rand::rng().random_range(0..INVOICE_NUMBER_RANGE);
    format!("{prefix}{n}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate_id_shape() {
        let id = generate_id();
        assert_eq!(id.len(), ID_LENGTH);
        assert!(
            id.chars()
                .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase())
        );
    }

    #[test]
    fn test_generate_id_has_no_duplicates() {
        let ids: HashSet<String> = (0..10_000).map(|_| generate_id()).collect();
        assert_eq!(ids.len(), 10_000);
    }

    #[test]
    fn test_generate_invoice_number() {
        let number = generate_invoice_number("INV-");
        let digits = number.strip_prefix("INV-").unwrap_or_default();
        let value: u32 = digits.parse().unwrap_or(u32::MAX);
        assert!(value < INVOICE_NUMBER_RANGE);
    }
}
