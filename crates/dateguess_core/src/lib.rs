//! Date guesser core: accuracy ranking, guesses, and the pure arbitration fold.
mod accuracy;
mod arbiter;
mod guess;

pub use accuracy::{Accuracy, UnknownAccuracy};
pub use arbiter::{
    choose_better_guess, day_difference, fold_guesses, judge, plausibility_window, Verdict,
};
pub use guess::Guess;
