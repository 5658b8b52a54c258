//! Matching-task shuffle and answer-key derivation
//!
//! Items keep their insertion order (that order is the printed 1..N
//! numbering); only the answer column is permuted. The answer key records,
//! for each item position, the letter of the slot its correct answer landed
//! in. The permutation is resampled on every call, so re-rendering the same
//! pairs produces a different but equally valid key.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::content::MatchPairs;
use crate::error::{Error, Result};

/// Letter labelling the answer slot at `index` ('a' for 0, 'b' for 1, ...)
pub fn index_letter(index: usize) -> char {
    (b'a' + index as u8) as char
}

/// Answer key: 1-based item position → letter of the correct shuffled answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerKey(Vec<char>);

impl AnswerKey {
    /// Letter for a 1-based item position
    pub fn letter(&self, position: usize) -> Option<char> {
        position.checked_sub(1).and_then(|i| self.0.get(i)).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `(position, letter)` entries in item order, positions starting at 1
    pub fn iter(&self) -> impl Iterator<Item = (usize, char)> + '_ {
        self.0.iter().enumerate().map(|(i, &c)| (i + 1, c))
    }
}

/// A matching task ready to render: fixed item column, shuffled answer
/// column, and the key tying them back together
#[derive(Debug, Clone)]
pub struct ShuffledMatching {
    pub items: Vec<String>,
    pub answers: Vec<String>,
    pub key: AnswerKey,
}

/// Shuffle the answer column of `pairs` and derive the answer key
///
/// The randomness source is passed in by the caller, so a seeded generator
/// gives a reproducible shuffle.
pub fn shuffle_matching<R: Rng + ?Sized>(pairs: &MatchPairs, rng: &mut R) -> Result<ShuffledMatching> {
    if pairs.is_empty() {
        return Err(Error::EmptyPairs);
    }

    let items: Vec<String> = pairs.items().map(str::to_string).collect();
    let correct: Vec<String> = pairs.answers().map(str::to_string).collect();

    let mut answers = correct.clone();
    answers.shuffle(rng);

    // Answer values are unique (MatchPairs invariant), so each lookup has
    // exactly one hit.
    let mut letters = Vec::with_capacity(items.len());
    for answer in &correct {
        let index = answers
            .iter()
            .position(|a| a == answer)
            .ok_or_else(|| Error::General(format!("answer {answer:?} lost in shuffle")))?;
        letters.push(index_letter(index));
    }

    Ok(ShuffledMatching {
        items,
        answers,
        key: AnswerKey(letters),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn city_pairs() -> MatchPairs {
        MatchPairs::new(
            [
                ("Beijing", "China"),
                ("Buenos Aires", "Argentina"),
                ("Los Angeles", "The United States of America"),
                ("Amsterdam", "The Netherlands"),
                ("Mexico City", "Mexico"),
                ("Seoul", "The Republic of Korea"),
                ("Christchurch", "New Zealand"),
                ("Moscow", "Russia"),
            ]
            .iter()
            .map(|(a, b)| (a.to_string(), b.to_string()))
            .collect(),
        )
        .unwrap()
    }

    /// The key must be a bijection from positions onto the first N letters,
    /// and every letter must point back at the item's correct answer.
    fn assert_valid_key(pairs: &MatchPairs, shuffled: &ShuffledMatching) {
        let n = pairs.len();
        assert_eq!(shuffled.items.len(), n);
        assert_eq!(shuffled.answers.len(), n);
        assert_eq!(shuffled.key.len(), n);

        let letters: HashSet<char> = shuffled.key.iter().map(|(_, c)| c).collect();
        assert_eq!(letters.len(), n, "letters must be distinct");
        for (_, letter) in shuffled.key.iter() {
            assert!(letter >= 'a' && letter < index_letter(n));
        }

        for (position, letter) in shuffled.key.iter() {
            let item = &shuffled.items[position - 1];
            let slot = (letter as u8 - b'a') as usize;
            assert_eq!(
                shuffled.answers[slot],
                pairs.get(item).unwrap(),
                "key entry {position} -> {letter} does not recover the correct answer"
            );
        }
    }

    #[test]
    fn test_key_is_bijective() {
        let pairs = city_pairs();
        let mut rng = StdRng::seed_from_u64(7);
        let shuffled = shuffle_matching(&pairs, &mut rng).unwrap();
        assert_valid_key(&pairs, &shuffled);
    }

    #[test]
    fn test_items_keep_insertion_order() {
        let pairs = city_pairs();
        let mut rng = StdRng::seed_from_u64(7);
        let shuffled = shuffle_matching(&pairs, &mut rng).unwrap();
        let expected: Vec<&str> = pairs.items().collect();
        assert_eq!(shuffled.items, expected);
    }

    #[test]
    fn test_rebuild_gives_independent_valid_keys() {
        let pairs = city_pairs();
        let mut rng = StdRng::seed_from_u64(42);
        let first = shuffle_matching(&pairs, &mut rng).unwrap();
        let second = shuffle_matching(&pairs, &mut rng).unwrap();

        assert_eq!(first.items, second.items, "item order is stable");
        assert_valid_key(&pairs, &first);
        assert_valid_key(&pairs, &second);
    }

    #[test]
    fn test_airport_scenario() {
        let pairs = MatchPairs::new(vec![
            (
                "airport".to_string(),
                "a place where planes take off and land".to_string(),
            ),
            ("luggage".to_string(), "bags and suitcases".to_string()),
            (
                "boarding pass".to_string(),
                "a document that allows you to get on a plane".to_string(),
            ),
        ])
        .unwrap();

        let mut rng = StdRng::seed_from_u64(1);
        let shuffled = shuffle_matching(&pairs, &mut rng).unwrap();

        assert_eq!(shuffled.items, vec!["airport", "luggage", "boarding pass"]);

        let mut sorted = shuffled.answers.clone();
        sorted.sort();
        let mut expected: Vec<String> = pairs.answers().map(str::to_string).collect();
        expected.sort();
        assert_eq!(sorted, expected, "answers are a permutation of the definitions");

        assert_valid_key(&pairs, &shuffled);
    }

    #[test]
    fn test_single_pair() {
        let pairs = MatchPairs::new(vec![("HR".to_string(), "Human Resources".to_string())]).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        let shuffled = shuffle_matching(&pairs, &mut rng).unwrap();
        assert_eq!(shuffled.key.letter(1), Some('a'));
        assert_eq!(shuffled.key.letter(2), None);
    }

    #[test]
    fn test_empty_pairs_rejected() {
        let pairs = MatchPairs::new(vec![]).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        assert!(matches!(
            shuffle_matching(&pairs, &mut rng),
            Err(Error::EmptyPairs)
        ));
    }

    #[test]
    fn test_index_letter() {
        assert_eq!(index_letter(0), 'a');
        assert_eq!(index_letter(7), 'h');
        assert_eq!(index_letter(25), 'z');
    }
}
