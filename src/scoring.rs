use crate::difficulty::DifficultyTier;

/// Fewest points a won round can be worth.
pub const MIN_WIN_SCORE: u32 = 10;

const POINTS_PER_LETTER: i64 = 10;
const ERROR_PENALTY: i64 = 5;
const HINT_PENALTY: i64 = 15;
const TIER_BONUS: i64 = 20;

/// Points for a won round:
/// `max(10, letters*10 - errors*5 - hints*15 + rank*20)`.
pub fn round_score(word_len: usize, errors: u32, hints: u32, tier: DifficultyTier) -> u32 {
    let raw = word_len as i64 * POINTS_PER_LETTER - i64::from(errors) * ERROR_PENALTY
        - i64::from(hints) * HINT_PENALTY
        + i64::from(tier.rank()) * TIER_BONUS;

    raw.max(i64::from(MIN_WIN_SCORE))
        .try_into()
        .unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perfect_normal_round() {
        assert_eq!(round_score(6, 0, 0, DifficultyTier::Normal), 100);
    }

    #[test]
    fn penalties_apply() {
        // 60 - 10 - 15 + 40
        assert_eq!(round_score(6, 2, 1, DifficultyTier::Normal), 75);
    }

    #[test]
    fn floor_is_ten() {
        assert_eq!(round_score(3, 7, 2, DifficultyTier::Easy), MIN_WIN_SCORE);
        assert_eq!(round_score(1, 100, 100, DifficultyTier::Easy), MIN_WIN_SCORE);
    }

    #[test]
    fn expert_gets_the_largest_bonus() {
        let bonuses: Vec<u32> = DifficultyTier::ALL
            .iter()
            .map(|t| round_score(10, 0, 0, *t))
            .collect();
        assert_eq!(bonuses, vec![120, 140, 160, 180]);
    }

    #[test]
    fn monotonic_in_every_input() {
        for tier in DifficultyTier::ALL {
            for len in 1..16 {
                for errors in 0..9 {
                    for hints in 0..3 {
                        let base = round_score(len, errors, hints, tier);
                        assert!(base >= MIN_WIN_SCORE);
                        assert!(round_score(len, errors + 1, hints, tier) <= base);
                        assert!(round_score(len, errors, hints + 1, tier) <= base);
                        assert!(round_score(len + 1, errors, hints, tier) >= base);
                    }
                }
            }
        }
        for pair in DifficultyTier::ALL.windows(2) {
            assert!(round_score(6, 1, 1, pair[1]) >= round_score(6, 1, 1, pair[0]));
        }
    }
}
