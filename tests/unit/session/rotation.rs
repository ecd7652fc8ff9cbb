use super::*;
use crate::assets::corpus::split_units;
use rand::SeedableRng;

fn rotation(raw: &str) -> ContentRotation {
    ContentRotation::new(split_units(raw, 3), 3, StdRng::seed_from_u64(3)).unwrap()
}

#[test]
fn empty_pool_is_corpus_too_small() {
    let err = ContentRotation::new(Vec::new(), 3, StdRng::seed_from_u64(1)).unwrap_err();
    assert!(matches!(err, LegibilityError::CorpusTooSmall { .. }));
}

#[test]
fn short_units_are_filtered_again() {
    let units = vec![
        TextUnit::new(vec!["a".into(), "b".into()]),
        TextUnit::new(vec!["c".into(), "d".into(), "e".into()]),
    ];
    let r = ContentRotation::new(units, 3, StdRng::seed_from_u64(1)).unwrap();
    assert_eq!(r.units().len(), 1);
}

#[test]
fn next_draws_pool_members() {
    let mut r = rotation("One two three. Four five six. Seven eight nine.");
    for _ in 0..20 {
        let u = r.next();
        assert!(r.units().contains(&u));
    }
}

#[test]
fn words_finish_a_unit_before_switching() {
    let mut r = rotation("a1 a2 a3 a4. b1 b2 b3. c1 c2 c3 c4 c5.");
    let mut cursor = WordCursor::default();
    for _ in 0..10 {
        let first = r.next_word_with(&mut cursor);
        let unit = cursor.unit().unwrap();
        let tokens: Vec<String> = r.units()[unit].tokens().to_vec();
        assert_eq!(first, tokens[0]);
        for expected in &tokens[1..] {
            assert_eq!(cursor.unit(), Some(unit));
            assert_eq!(&r.next_word_with(&mut cursor), expected);
        }
    }
}

#[test]
fn quotes_are_stripped_and_empty_tokens_skipped() {
    let mut r = rotation("\u{201C}Hello there\u{201D} said \" she.");
    let words: Vec<String> = (0..4).map(|_| r.next_word()).collect();
    assert_eq!(words, vec!["Hello", "there", "said", "she."]);
}

#[test]
fn cursors_are_independent() {
    let mut r = rotation("a1 a2 a3. b1 b2 b3. c1 c2 c3.");
    let mut left = WordCursor::default();
    let mut right = WordCursor::default();
    r.next_word_with(&mut left);
    let left_unit = left.unit();
    r.next_word_with(&mut right);
    r.next_word_with(&mut right);
    assert_eq!(left.unit(), left_unit);
    r.next_word_with(&mut left);
    assert_eq!(left.unit(), left_unit);
}

#[test]
fn seeded_rotations_repeat() {
    let mut a = rotation("One two three. Four five six. Seven eight nine.");
    let mut b = rotation("One two three. Four five six. Seven eight nine.");
    for _ in 0..10 {
        assert_eq!(a.next(), b.next());
    }
}
