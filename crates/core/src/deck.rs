//! Deck module - pair generation and Fisher-Yates shuffling
//!
//! A deck of `rows * columns` cards is built from `pairs = len / 2` pair keys,
//! each used twice, then permuted uniformly. The resulting order is the
//! presentation order (row-major).
//!
//! Shuffling takes the RNG as an argument so sessions can inject a seeded
//! generator and tests get reproducible tables.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use thiserror::Error;

use crate::card::Card;

/// Generator used for shuffling decks.
pub type DeckRng = ChaCha8Rng;

/// Errors raised while building a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("grid {rows}x{columns} is invalid: total card count must be even for matching")]
    OddCardCount { rows: u16, columns: u16 },
    #[error("grid {rows}x{columns} is invalid: rows and columns must be positive")]
    EmptyGrid { rows: u16, columns: u16 },
    #[error("no front-face identities available to deal from")]
    EmptyFacePool,
}

/// Create a deck generator.
///
/// `Some(seed)` is reproducible; `None` draws a seed from the thread RNG.
pub fn deck_rng(seed: Option<u64>) -> DeckRng {
    match seed {
        Some(seed) => DeckRng::seed_from_u64(seed),
        None => DeckRng::seed_from_u64(rand::rng().random()),
    }
}

/// Check that a grid can be dealt, returning the number of pairs it needs.
pub fn validate_grid(rows: u16, columns: u16) -> Result<usize, GridError> {
    if rows == 0 || columns == 0 {
        return Err(GridError::EmptyGrid { rows, columns });
    }
    let total = rows as usize * columns as usize;
    if total % 2 != 0 {
        return Err(GridError::OddCardCount { rows, columns });
    }
    Ok(total / 2)
}

/// Shuffle a slice in place using Fisher-Yates.
pub fn shuffle<T, R: Rng + ?Sized>(slice: &mut [T], rng: &mut R) {
    for i in (1..slice.len()).rev() {
        let j = rng.random_range(0..=i);
        slice.swap(i, j);
    }
}

/// Build a shuffled deck for a `rows x columns` grid.
///
/// `face_pool` is the number of front-face assets available. When it is smaller
/// than the number of pairs, faces are reused cyclically and a warning is
/// logged; pair keys stay distinct either way.
pub fn build_deck<R: Rng + ?Sized>(
    rows: u16,
    columns: u16,
    face_pool: u32,
    rng: &mut R,
) -> Result<Vec<Card>, GridError> {
    let pairs = validate_grid(rows, columns)?;
    if face_pool == 0 {
        return Err(GridError::EmptyFacePool);
    }
    if (face_pool as usize) < pairs {
        log::warn!(
            "Not enough card faces. Need {}, have {}. Using available faces cyclically.",
            pairs,
            face_pool
        );
    }

    let mut cards = Vec::with_capacity(pairs * 2);
    for pair in 0..pairs as u32 {
        let face = pair % face_pool;
        cards.push(Card::new(pair, face));
        cards.push(Card::new(pair, face));
    }
    shuffle(&mut cards, rng);
    Ok(cards)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn pair_counts(cards: &[Card]) -> BTreeMap<u32, usize> {
        let mut counts = BTreeMap::new();
        for card in cards {
            *counts.entry(card.pair()).or_insert(0) += 1;
        }
        counts
    }

    #[test]
    fn test_deck_has_every_pair_twice() {
        let mut rng = deck_rng(Some(7));
        let deck = build_deck(4, 4, 8, &mut rng).unwrap();
        assert_eq!(deck.len(), 16);
        let counts = pair_counts(&deck);
        assert_eq!(counts.len(), 8);
        assert!(counts.values().all(|&n| n == 2));
    }

    #[test]
    fn test_odd_grid_is_rejected() {
        let mut rng = deck_rng(Some(1));
        assert_eq!(
            build_deck(3, 3, 10, &mut rng),
            Err(GridError::OddCardCount { rows: 3, columns: 3 })
        );
        assert!(build_deck(2, 3, 10, &mut rng).is_ok());
    }

    #[test]
    fn test_zero_dimension_is_rejected() {
        assert_eq!(
            validate_grid(0, 4),
            Err(GridError::EmptyGrid { rows: 0, columns: 4 })
        );
        assert_eq!(
            validate_grid(4, 0),
            Err(GridError::EmptyGrid { rows: 4, columns: 0 })
        );
    }

    #[test]
    fn test_empty_face_pool_is_rejected() {
        let mut rng = deck_rng(Some(1));
        assert_eq!(build_deck(2, 2, 0, &mut rng), Err(GridError::EmptyFacePool));
    }

    #[test]
    fn test_faces_are_reused_cyclically() {
        let mut rng = deck_rng(Some(3));
        let deck = build_deck(2, 4, 3, &mut rng).unwrap();
        for card in &deck {
            assert_eq!(card.face(), card.pair() % 3);
        }
        // Four distinct pairs even though only three faces exist.
        assert_eq!(pair_counts(&deck).len(), 4);
    }

    #[test]
    fn test_same_seed_same_order() {
        let a = build_deck(4, 6, 12, &mut deck_rng(Some(42))).unwrap();
        let b = build_deck(4, 6, 12, &mut deck_rng(Some(42))).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_shuffle_is_a_permutation() {
        let mut values: Vec<u32> = (0..50).collect();
        shuffle(&mut values, &mut deck_rng(Some(9)));
        assert_ne!(values, (0..50).collect::<Vec<_>>());
        values.sort_unstable();
        assert_eq!(values, (0..50).collect::<Vec<_>>());
    }

    #[test]
    fn test_shuffle_handles_tiny_slices() {
        let mut rng = deck_rng(Some(5));
        let mut empty: [u8; 0] = [];
        shuffle(&mut empty, &mut rng);
        let mut one = [1u8];
        shuffle(&mut one, &mut rng);
        assert_eq!(one, [1]);
    }
}
