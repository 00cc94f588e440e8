/// Colour class of a rank tier name such as `legendary grandmaster` or `pupil`.
pub fn rank_to_color(rank: &str) -> &'static str {
    let rank = rank.to_lowercase();
    if rank.contains("legendary") || rank.contains("grandmaster") {
        "red"
    } else if rank.contains("candidate") {
        "purple"
    } else if rank.contains("master") {
        "orange"
    } else if rank.contains("expert") {
        "blue"
    } else if rank.contains("specialist") {
        "cyan"
    } else if rank.contains("pupil") {
        "green"
    } else {
        "gray"
    }
}

/// Colour class of a problem difficulty rating.
pub fn difficulty_to_color(rating: i32) -> &'static str {
    match rating {
        2400.. => "red",
        1900..=2399 => "purple",
        1600..=1899 => "blue",
        1400..=1599 => "cyan",
        _ => "green",
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_rank_to_color() {
        assert_eq!(rank_to_color("legendary grandmaster"), "red");
        assert_eq!(rank_to_color("international grandmaster"), "red");
        assert_eq!(rank_to_color("international master"), "orange");
        assert_eq!(rank_to_color("master"), "orange");
        assert_eq!(rank_to_color("candidate master"), "purple");
        assert_eq!(rank_to_color("expert"), "blue");
        assert_eq!(rank_to_color("specialist"), "cyan");
        assert_eq!(rank_to_color("pupil"), "green");
        assert_eq!(rank_to_color("newbie"), "gray");
        assert_eq!(rank_to_color(""), "gray");
    }

    #[test]
    fn test_difficulty_to_color() {
        assert_eq!(difficulty_to_color(3500), "red");
        assert_eq!(difficulty_to_color(2400), "red");
        assert_eq!(difficulty_to_color(2399), "purple");
        assert_eq!(difficulty_to_color(1900), "purple");
        assert_eq!(difficulty_to_color(1600), "blue");
        assert_eq!(difficulty_to_color(1400), "cyan");
        assert_eq!(difficulty_to_color(1399), "green");
        assert_eq!(difficulty_to_color(800), "green");
    }
}
