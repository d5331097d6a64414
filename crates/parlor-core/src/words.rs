//! Themed word dictionary for Wordle and Hangman secrets.

use rand::seq::SliceRandom;
use rand::Rng;

/// Five-letter, uppercase, loosely bathroom-themed. Kept small on purpose;
/// a fancier deployment can swap in a bigger list without touching the
/// kernels.
pub const WORDS: &[&str] = &[
    "FLUSH", "DRAIN", "SEWER", "BIDET", "SCRUB", "WIPES", "SOAPY", "RINSE", "BRUSH", "TOWEL",
    "SPRAY", "STALL", "BASIN", "VALVE", "CLEAN", "FOAMY", "GRIME", "STINK", "WHIFF", "SPILL",
    "PLUMB", "LEAKY", "STEAM", "PIPES", "SUDSY", "MOIST", "SWIRL", "GLOSS", "FROTH", "SLOSH",
];

/// Pick a secret word for a new game.
pub fn pick_secret_word<R: Rng>(rng: &mut R) -> &'static str {
    WORDS.choose(rng).copied().unwrap_or(WORDS[0])
}
