//! Dice rolls written as `<count>d<size>`, e.g. `3d6`.

use std::sync::LazyLock;

use log::debug;
use rand::Rng;
use regex::Regex;

/// Longest roll list the bot will post.
pub const MAX_ROLL_CHARS: usize = 500;

pub const TOO_MANY_ROLLS: &str = "주사위를 너무 많이 굴렸어요!";

pub const INVALID_DICE: &str = "주사위 개수와 면 수는 1 이상의 숫자여야 해요.";

static DICE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]+)[dD]([0-9]+)").expect("dice pattern is valid"));

#[derive(Debug, PartialEq, Eq)]
enum Dice {
    Roll { count: u64, size: u64 },
    TooMany,
    Invalid,
}

fn parse(text: &str) -> Option<Dice> {
    let caps = DICE_PATTERN.captures(text)?;

    // A count too large for u64 could never fit in the reply anyway.
    let Ok(count) = caps[1].parse::<u64>() else {
        return Some(Dice::TooMany);
    };
    let Ok(size) = caps[2].parse::<u64>() else {
        return Some(Dice::Invalid);
    };

    if count == 0 || size == 0 {
        return Some(Dice::Invalid);
    }
    Some(Dice::Roll { count, size })
}

/// Roll the first dice expression in `text`, or `None` if there is none.
pub fn roll<R: Rng + ?Sized>(text: &str, rng: &mut R) -> Option<String> {
    let (count, size) = match parse(text)? {
        Dice::Roll { count, size } => (count, size),
        Dice::TooMany => return Some(TOO_MANY_ROLLS.to_string()),
        Dice::Invalid => return Some(INVALID_DICE.to_string()),
    };
    debug!("Rolling {count}d{size}");

    let mut rolls = String::new();
    for i in 0..count {
        if i > 0 {
            rolls.push_str(", ");
        }
        rolls.push_str(&rng.random_range(1..=size).to_string());
        if rolls.len() > MAX_ROLL_CHARS {
            return Some(TOO_MANY_ROLLS.to_string());
        }
    }

    Some(rolls)
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    fn values(rolls: &str) -> Vec<u64> {
        rolls
            .split(", ")
            .map(|v| v.parse().expect("numeric roll"))
            .collect()
    }

    #[test]
    fn parses_embedded_expression() {
        assert_eq!(
            parse("굴려줘 2D20 부탁"),
            Some(Dice::Roll { count: 2, size: 20 })
        );
        assert_eq!(parse("no dice here"), None);
        assert_eq!(parse("d6"), None);
    }

    #[test]
    fn rolls_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(9);
        for (text, count, size) in [("3d6", 3, 6), ("10d2", 10, 2), ("1d100", 1, 100)] {
            let rolls = roll(text, &mut rng).expect("dice expression");
            let values = values(&rolls);
            assert_eq!(values.len(), count);
            assert!(values.iter().all(|v| (1..=size).contains(v)), "{rolls}");
        }
    }

    #[test]
    fn single_sided_die_always_one() {
        let mut rng = StdRng::seed_from_u64(9);
        assert_eq!(roll("4d1", &mut rng).as_deref(), Some("1, 1, 1, 1"));
    }

    #[test]
    fn zero_count_or_size_is_invalid() {
        let mut rng = StdRng::seed_from_u64(9);
        assert_eq!(roll("0d6", &mut rng).as_deref(), Some(INVALID_DICE));
        assert_eq!(roll("3d0", &mut rng).as_deref(), Some(INVALID_DICE));
        assert_eq!(
            roll("1d99999999999999999999999", &mut rng).as_deref(),
            Some(INVALID_DICE)
        );
    }

    #[test]
    fn long_results_are_replaced() {
        let mut rng = StdRng::seed_from_u64(9);
        assert_eq!(roll("300d6", &mut rng).as_deref(), Some(TOO_MANY_ROLLS));
        assert_eq!(
            roll("99999999999999999999999d6", &mut rng).as_deref(),
            Some(TOO_MANY_ROLLS)
        );
    }

    #[test]
    fn result_at_limit_is_kept() {
        // 167 single-digit rolls take 167 + 2 * 166 = 499 characters.
        let mut rng = StdRng::seed_from_u64(9);
        let rolls = roll("167d6", &mut rng).expect("dice expression");
        assert!(rolls.len() <= MAX_ROLL_CHARS);
        assert_eq!(values(&rolls).len(), 167);
    }

    #[test]
    fn limit_boundary_is_exact() {
        // 167d1 is 499 characters, 168d1 is 502.
        let mut rng = StdRng::seed_from_u64(9);
        let kept = roll("167d1", &mut rng).expect("dice expression");
        assert_eq!(kept.len(), 499);
        assert_eq!(kept, vec!["1"; 167].join(", "));
        assert_eq!(roll("168d1", &mut rng).as_deref(), Some(TOO_MANY_ROLLS));
    }
}
