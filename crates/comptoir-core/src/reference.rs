//! # Reference Numbers
//!
//! Generation and shape-validation of the human-facing identifiers that
//! print on documents. These formats are external-facing and must
//! round-trip through display unchanged:
//!
//! | Kind           | Format                          | Example        |
//! |----------------|---------------------------------|----------------|
//! | Proforma       | `PRO-<year>-<random 1000-9999>` | `PRO-2024-1001`|
//! | Purchase order | `BC-<year>-<4-digit sequence>`  | `BC-2024-0007` |
//! | Invoice        | `FAC-<last 6 of ms timestamp>`  | `FAC-483920`   |
//! | Client id      | `CLI<4-digit sequence>`         | `CLI0001`      |
//! | Supplier id    | `FRS<4-digit sequence>`         | `FRS0001`      |
//!
//! Proforma suffixes are random, so generation takes the set of already
//! used references and retries until it finds a free one instead of
//! trusting the randomness.

use chrono::{DateTime, Datelike, Utc};
use rand::Rng;

use crate::types::CounterpartyKind;

/// Generates a proforma reference unique among `existing`.
///
/// Random draws first; if the year's random space is congested enough
/// that drawing keeps colliding, falls back to a linear scan of the
/// suffix range. Returns the first draw unchanged in the common case.
pub fn proforma_reference(now: DateTime<Utc>, existing: &[String]) -> String {
    let year = now.year();
    let mut rng = rand::thread_rng();

    for _ in 0..64 {
        let candidate = format!("PRO-{}-{}", year, rng.gen_range(1000..=9999));
        if !existing.iter().any(|r| r == &candidate) {
            return candidate;
        }
    }

    for suffix in 1000..=9999 {
        let candidate = format!("PRO-{}-{}", year, suffix);
        if !existing.iter().any(|r| r == &candidate) {
            return candidate;
        }
    }

    // Suffix space exhausted for the year (9000 proformas); widen rather
    // than hand out a duplicate.
    format!("PRO-{}-{}", year, 10_000 + existing.len())
}

/// Generates a purchase-order reference from a caller-maintained sequence.
pub fn purchase_order_reference(now: DateTime<Utc>, sequence: u32) -> String {
    format!("BC-{}-{:04}", now.year(), sequence)
}

/// Generates an invoice reference from the millisecond timestamp.
pub fn invoice_reference(now: DateTime<Utc>) -> String {
    let millis = now.timestamp_millis();
    format!("FAC-{:06}", millis.rem_euclid(1_000_000))
}

/// Generates a counterparty business id from a caller-maintained sequence.
pub fn counterparty_id(kind: CounterpartyKind, sequence: u32) -> String {
    let prefix = match kind {
        CounterpartyKind::Client => "CLI",
        CounterpartyKind::Supplier => "FRS",
    };
    format!("{}{:04}", prefix, sequence)
}

/// Checks that a reference matches the `PREFIX-YEAR-NNNN` family shape
/// used by proformas and purchase orders.
pub fn is_year_reference(reference: &str, prefix: &str) -> bool {
    let mut parts = reference.splitn(3, '-');
    let (Some(p), Some(year), Some(suffix)) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };
    p == prefix
        && year.len() == 4
        && year.chars().all(|c| c.is_ascii_digit())
        && suffix.len() >= 4
        && suffix.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at_2024() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_proforma_reference_shape() {
        let r = proforma_reference(at_2024(), &[]);
        assert!(is_year_reference(&r, "PRO"), "bad shape: {r}");
        assert!(r.starts_with("PRO-2024-"));
        let suffix: u32 = r.rsplit('-').next().unwrap().parse().unwrap();
        assert!((1000..=9999).contains(&suffix));
    }

    #[test]
    fn test_proforma_reference_avoids_existing() {
        // Occupy everything except one suffix; generation must land on it.
        let mut existing: Vec<String> = (1000..=9999)
            .filter(|s| *s != 4242)
            .map(|s| format!("PRO-2024-{}", s))
            .collect();
        let r = proforma_reference(at_2024(), &existing);
        assert_eq!(r, "PRO-2024-4242");

        // Fully exhausted: still unique, widened suffix.
        existing.push("PRO-2024-4242".to_string());
        let r = proforma_reference(at_2024(), &existing);
        assert!(!existing.contains(&r));
    }

    #[test]
    fn test_purchase_order_reference() {
        assert_eq!(purchase_order_reference(at_2024(), 7), "BC-2024-0007");
        assert_eq!(purchase_order_reference(at_2024(), 1234), "BC-2024-1234");
    }

    #[test]
    fn test_invoice_reference_last_six_digits() {
        let now = Utc.timestamp_millis_opt(1_718_453_483_920).unwrap();
        assert_eq!(invoice_reference(now), "FAC-483920");
        // Always six digits, zero-padded
        let early = Utc.timestamp_millis_opt(1_718_453_000_042).unwrap();
        assert_eq!(invoice_reference(early), "FAC-000042");
    }

    #[test]
    fn test_counterparty_ids() {
        assert_eq!(counterparty_id(CounterpartyKind::Client, 1), "CLI0001");
        assert_eq!(counterparty_id(CounterpartyKind::Supplier, 23), "FRS0023");
    }

    #[test]
    fn test_is_year_reference() {
        assert!(is_year_reference("PRO-2024-1001", "PRO"));
        assert!(is_year_reference("BC-2024-0007", "BC"));
        assert!(!is_year_reference("PRO-24-1001", "PRO"));
        assert!(!is_year_reference("FAC-483920", "PRO"));
        assert!(!is_year_reference("PRO-2024-", "PRO"));
    }
}
