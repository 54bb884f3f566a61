/// Rank prefix for a 1-based leaderboard position: medals for the podium,
/// `"{n}."` for everyone else.
pub fn rank_prefix(position: usize) -> String {
    match position {
        1 => "🥇".to_owned(),
        2 => "🥈".to_owned(),
        3 => "🥉".to_owned(),
        other => format!("{}.", other),
    }
}

/// Format current XP against the next-level threshold, e.g. `"40/100 XP"`.
pub fn format_xp_progress(xp: u64, threshold: u64) -> String {
    format!("{}/{} XP", xp, threshold)
}

#[cfg(test)]
mod tests {
    use super::{format_xp_progress, rank_prefix};

    #[test]
    fn podium_positions_get_medals() {
        assert_eq!(rank_prefix(1), "🥇");
        assert_eq!(rank_prefix(2), "🥈");
        assert_eq!(rank_prefix(3), "🥉");
    }

    #[test]
    fn later_positions_get_numbers() {
        assert_eq!(rank_prefix(4), "4.");
        assert_eq!(rank_prefix(10), "10.");
    }

    #[test]
    fn progress_shows_xp_over_threshold() {
        assert_eq!(format_xp_progress(40, 100), "40/100 XP");
        assert_eq!(format_xp_progress(0, 400), "0/400 XP");
    }
}
