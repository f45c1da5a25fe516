// Routes of the normalized stats service and the key conventions it expects

pub const CHAMPION_STATS_PATH: &str = "/champion-stats";
pub const MATCHUPS_PATH: &str = "/matchups";
pub const PLAYER_PATH: &str = "/player";

pub const REGIONS: [&str; 11] = [
    "euw", "na", "kr", "eune", "oce", "jp", "br", "las", "lan", "ru", "tr",
];

pub fn is_known_region(region: &str) -> bool {
    REGIONS.contains(&region.to_lowercase().as_str())
}

/// Provider position for a role alias. Unknown roles pass through lowercased.
pub fn role_to_position(role: &str) -> String {
    let role = role.trim().to_lowercase();
    match role.as_str() {
        "top" => "top",
        "jungle" | "jg" => "jungle",
        "middle" | "mid" => "mid",
        "bottom" | "adc" | "bot" => "adc",
        "support" | "utility" | "sup" => "support",
        other => other,
    }
    .to_string()
}

/// URL slug of a champion display name: "Dr. Mundo" -> "drmundo".
pub fn champion_slug(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, ' ' | '\'' | '.'))
        .collect::<String>()
        .to_lowercase()
}

pub fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_aliases() {
        assert_eq!(role_to_position("Middle"), "mid");
        assert_eq!(role_to_position("bottom"), "adc");
        assert_eq!(role_to_position("support"), "support");
        assert_eq!(role_to_position("all"), "all");
    }

    #[test]
    fn slugs_strip_punctuation() {
        assert_eq!(champion_slug("Dr. Mundo"), "drmundo");
        assert_eq!(champion_slug("Kai'Sa"), "kaisa");
        assert_eq!(champion_slug("Lee Sin"), "leesin");
    }

    #[test]
    fn urls_join_cleanly() {
        assert_eq!(join_url("http://x/api/", "/player"), "http://x/api/player");
        assert_eq!(join_url("http://x", "matchups/ahri"), "http://x/matchups/ahri");
    }

    #[test]
    fn regions() {
        assert!(is_known_region("EUW"));
        assert!(!is_known_region("euw1"));
    }
}
