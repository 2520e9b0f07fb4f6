//! Batch validation over one shared catalog.
//!
//! A [`Validator`] only borrows its catalog, so any number of inputs can be
//! checked against the same read-only table, sequentially or in parallel.
//!
//! # Performance
//!
//! - No per-batch setup; the catalog's resolution order is computed once
//! - Optional parallel processing with the `parallel` feature

use crate::validate::{ValidationOutcome, Validator};

/// Validates a batch of card numbers.
///
/// Returns one outcome per input, in input order.
///
/// # Example
///
/// ```
/// use cardcheck::{batch, IssuerCatalog, OutcomeKind, Validator};
///
/// let catalog = IssuerCatalog::builtin();
/// let validator = Validator::new(&catalog);
/// let outcomes = batch::validate_all(&validator, &["4532015112830366", "12"]);
///
/// assert_eq!(outcomes[0].kind(), OutcomeKind::Valid);
/// assert_eq!(outcomes[1].kind(), OutcomeKind::InvalidLength);
/// ```
pub fn validate_all<S: AsRef<str>>(validator: &Validator<'_>, cards: &[S]) -> Vec<ValidationOutcome> {
    cards.iter().map(|c| validator.validate(c.as_ref())).collect()
}

/// Validates a batch and returns only the valid outcomes, with their input index.
pub fn validate_valid_only<S: AsRef<str>>(
    validator: &Validator<'_>,
    cards: &[S],
) -> Vec<(usize, ValidationOutcome)> {
    cards
        .iter()
        .enumerate()
        .map(|(i, c)| (i, validator.validate(c.as_ref())))
        .filter(|(_, outcome)| outcome.is_valid())
        .collect()
}

/// Validates cards in parallel using rayon.
///
/// Output order matches input order.
///
/// # Feature
///
/// Requires the `parallel` feature to be enabled.
#[cfg(feature = "parallel")]
pub fn validate_parallel<S: AsRef<str> + Sync>(
    validator: &Validator<'_>,
    cards: &[S],
) -> Vec<ValidationOutcome> {
    use rayon::prelude::*;
    cards.par_iter().map(|c| validator.validate(c.as_ref())).collect()
}

/// Counts valid and invalid cards in a batch.
///
/// # Returns
///
/// Tuple of (valid_count, invalid_count)
///
/// # Example
///
/// ```
/// use cardcheck::{batch, Validator};
///
/// let validator = Validator::without_catalog();
/// let cards = ["4532015112830366", "1234567890123456", "5500000000000004"];
/// assert_eq!(batch::count_valid(&validator, &cards), (2, 1));
/// ```
#[inline]
pub fn count_valid<S: AsRef<str>>(validator: &Validator<'_>, cards: &[S]) -> (usize, usize) {
    let valid = cards
        .iter()
        .filter(|c| validator.is_valid(c.as_ref()))
        .count();

    (valid, cards.len() - valid)
}

/// Counts valid and invalid cards in parallel.
///
/// # Feature
///
/// Requires the `parallel` feature to be enabled.
#[cfg(feature = "parallel")]
#[inline]
pub fn count_valid_parallel<S: AsRef<str> + Sync>(
    validator: &Validator<'_>,
    cards: &[S],
) -> (usize, usize) {
    use rayon::prelude::*;

    let valid = cards
        .par_iter()
        .filter(|c| validator.is_valid(c.as_ref()))
        .count();

    (valid, cards.len() - valid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::IssuerCatalog;
    use crate::validate::OutcomeKind;

    const VALID_VISA: &str = "4532015112830366";
    const VALID_MC: &str = "5500000000000004";
    const BAD_CHECKSUM: &str = "1234567890123456";

    #[test]
    fn test_validate_all_keeps_order() {
        let catalog = IssuerCatalog::builtin();
        let validator = Validator::new(&catalog);
        let cards = vec![VALID_VISA, "bad", BAD_CHECKSUM, "4", VALID_MC];
        let kinds: Vec<OutcomeKind> = validate_all(&validator, &cards)
            .iter()
            .map(ValidationOutcome::kind)
            .collect();

        assert_eq!(
            kinds,
            [
                OutcomeKind::Valid,
                OutcomeKind::InvalidCharacter,
                OutcomeKind::ChecksumFailed,
                OutcomeKind::InvalidLength,
                OutcomeKind::Valid,
            ]
        );
    }

    #[test]
    fn test_valid_only() {
        let catalog = IssuerCatalog::builtin();
        let validator = Validator::new(&catalog);
        let cards = vec![VALID_VISA, BAD_CHECKSUM, VALID_MC];
        let valid = validate_valid_only(&validator, &cards);

        assert_eq!(valid.len(), 2);
        assert_eq!(valid[0].0, 0);
        assert_eq!(valid[1].0, 2);
    }

    #[test]
    fn test_count_valid() {
        let validator = Validator::without_catalog();
        let cards = [VALID_VISA, BAD_CHECKSUM, VALID_MC, "bad"];
        assert_eq!(count_valid(&validator, &cards), (2, 2));
    }

    #[test]
    fn test_empty_batch() {
        let validator = Validator::without_catalog();
        let cards: Vec<&str> = vec![];
        assert!(validate_all(&validator, &cards).is_empty());
        assert_eq!(count_valid(&validator, &cards), (0, 0));
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_matches_sequential() {
        let catalog = IssuerCatalog::builtin();
        let validator = Validator::new(&catalog);
        let cards: Vec<String> = (0..1000)
            .map(|i| if i % 3 == 0 { BAD_CHECKSUM } else { VALID_VISA }.to_string())
            .collect();

        let parallel = validate_parallel(&validator, &cards);
        assert_eq!(parallel, validate_all(&validator, &cards));
        assert_eq!(count_valid_parallel(&validator, &cards), count_valid(&validator, &cards));
    }
}
