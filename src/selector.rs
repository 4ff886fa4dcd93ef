//! Reply selection: yes/no answers, dice rolls and random choices.

mod choice;
mod dice;
mod yes_no;

use rand::Rng;

pub use dice::{INVALID_DICE, MAX_ROLL_CHARS, TOO_MANY_ROLLS};

/// Reply used when the text holds nothing to choose from.
pub const HELP: &str = "사용법: 선택지를 vs, 줄바꿈 또는 띄어쓰기로 구분해서 멘션해 주세요. \
예) 피자 vs 치킨\n\
주사위: 3d6 처럼 개수d면수\n\
질문: yes or no / 할까 말까";

/// Compute the reply text for a plain-text mention.
///
/// Modes are tried in order and the first match wins: yes/no trigger,
/// dice pattern, then a random choice among the delimited candidates.
pub fn select<R: Rng + ?Sized>(text: &str, rng: &mut R) -> String {
    if let Some(answer) = yes_no::answer(text, rng) {
        return answer.to_string();
    }

    if let Some(rolls) = dice::roll(text, rng) {
        return rolls;
    }

    choice::choose(text, rng).unwrap_or_else(|| HELP.to_string())
}
