//! Binary answers for yes/no questions.

use rand::prelude::IndexedRandom;
use rand::Rng;

/// Trigger substring and the two words it is answered with.
struct YesNoPair {
    trigger: &'static str,
    answers: [&'static str; 2],
}

const YES_NO_PAIRS: [YesNoPair; 2] = [
    YesNoPair {
        trigger: "yes or no",
        answers: ["Yes", "No"],
    },
    YesNoPair {
        trigger: "할까 말까",
        answers: ["해", "하지 마"],
    },
];

/// Returns one of the pair's words when the text contains a trigger.
pub fn answer<R: Rng + ?Sized>(text: &str, rng: &mut R) -> Option<&'static str> {
    let lowered = text.to_lowercase();
    let pair = YES_NO_PAIRS
        .iter()
        .find(|pair| lowered.contains(pair.trigger))?;
    pair.answers.choose(rng).copied()
}
