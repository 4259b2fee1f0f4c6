/// Gallows drawings from empty scaffold to the full figure.
pub const STAGES: [&str; 7] = [
    r"
   +---+
   |   |
       |
       |
       |
       |
 =========",
    r"
   +---+
   |   |
   O   |
       |
       |
       |
 =========",
    r"
   +---+
   |   |
   O   |
   |   |
       |
       |
 =========",
    r"
   +---+
   |   |
   O   |
  /|   |
       |
       |
 =========",
    r"
   +---+
   |   |
   O   |
  /|\  |
       |
       |
 =========",
    r"
   +---+
   |   |
   O   |
  /|\  |
  /    |
       |
 =========",
    r"
   +---+
   |   |
   O   |
  /|\  |
  / \  |
       |
 =========",
];

/// Which drawing to show after `errors` mistakes out of `budget`.
///
/// Stages are spread over the budget so the last one appears exactly when the
/// budget runs out, whatever the tier.
pub fn gallows_stage(errors: u32, budget: u32) -> usize {
    let last = STAGES.len() - 1;
    if budget == 0 || errors >= budget {
        return last;
    }
    (errors as usize * last) / budget as usize
}

pub fn gallows_art(errors: u32, budget: u32) -> &'static str {
    STAGES[gallows_stage(errors, budget)]
}

/// Letters spaced out for display, e.g. `p _ t _ _ n`.
pub fn spaced(masked: &str) -> String {
    masked
        .chars()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
