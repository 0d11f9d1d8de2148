use crate::{Accuracy, Guess};

/// Outcome of comparing a candidate against the current best guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The candidate replaces the current guess.
    Accepted,
    /// The candidate is not more accurate than the current guess.
    NotStronger,
    /// The candidate is more accurate but too far from the current date.
    OutsidePlausibilityWindow { days: i64, window: i64 },
}

impl Verdict {
    pub fn is_accepted(self) -> bool {
        self == Verdict::Accepted
    }
}

/// Days within which a more accurate candidate may refine a guess of the
/// given accuracy. `None` when no window applies.
pub fn plausibility_window(current: Accuracy) -> Option<i64> {
    match current {
        Accuracy::Partial => Some(45),
        Accuracy::Date => Some(2),
        Accuracy::None | Accuracy::DateTime => None,
    }
}

/// Absolute difference in days between the local calendar dates of two guesses.
pub fn day_difference(a: &Guess, b: &Guess) -> Option<i64> {
    let (a, b) = (a.date()?, b.date()?);
    Some((a - b).num_days().abs())
}

/// Decides whether `new` should replace `current`.
///
/// Ties keep `current`, so the earliest signal wins among equally accurate
/// candidates.
pub fn judge(current: &Guess, new: &Guess) -> Verdict {
    if current.accuracy() >= new.accuracy() {
        return Verdict::NotStronger;
    }
    if current.accuracy() == Accuracy::None {
        return Verdict::Accepted;
    }
    let (Some(window), Some(days)) = (
        plausibility_window(current.accuracy()),
        day_difference(current, new),
    ) else {
        return Verdict::NotStronger;
    };
    if days < window {
        Verdict::Accepted
    } else {
        Verdict::OutsidePlausibilityWindow { days, window }
    }
}

/// Returns whichever of `current` and `new` the arbiter keeps.
pub fn choose_better_guess(current: Guess, new: Guess) -> Guess {
    if judge(&current, &new).is_accepted() {
        new
    } else {
        current
    }
}

/// Folds candidates left to right, starting from [`Guess::none`].
pub fn fold_guesses<I>(candidates: I) -> Guess
where
    I: IntoIterator<Item = Guess>,
{
    candidates
        .into_iter()
        .fold(Guess::none(), choose_better_guess)
}
