//! Condition text → decorative background.
//!
//! The table is fixed for the lifetime of the process. `Default` is always a
//! member and is what every lookup falls back to.

use std::cmp::Reverse;

/// Sentinel key used when nothing else matches.
pub const DEFAULT_KEY: &str = "Default";

/// Background keys and their image URLs, in table order.
///
/// Order matters: equal-length keys are tried in this order when matching
/// by substring.
pub const BACKGROUNDS: &[(&str, &str)] = &[
    ("Clear", "https://media1.tenor.com/m/FGENNXlTSZkAAAAd/aesthetic-nature.gif"),
    ("Clouds", "https://media1.tenor.com/m/kKrPCty2eogAAAAd/anime-bird-art.gif"),
    ("Rain", "https://media1.tenor.com/m/TUN36wlxyhMAAAAC/aesthetic-raining.gif"),
    ("cloudy", "https://media.tenor.com/m/WhD4AWN30YkAAAAM/clouds-moving.gif"),
    ("Partly cloudy", "https://media1.tenor.com/m/pjzL4LNhIpEAAAAd/clouds-nature.gif"),
    ("Snow", "https://media1.tenor.com/m/jgyzLqeM3S4AAAAC/whenu.gif"),
    ("Overcast", "https://media1.tenor.com/m/f14xUacYc1oAAAAd/storm-world-meteorological-day.gif"),
    ("Sunny", "https://media1.tenor.com/m/WMmF-dfb2ZsAAAAd/ngan-pham-kitten.gif"),
    ("Thunderstorm", "https://media1.tenor.com/m/4kHp8IZiBu8AAAAC/dragon-ball-cinematography.gif"),
    ("Mist", "https://media1.tenor.com/m/Gwv12BigCYcAAAAC/foggy-fog.gif"),
    (DEFAULT_KEY, "https://media1.tenor.com/m/K0hea_K-qfYAAAAC/rain-nature.gif"),
];

/// Keys of [`BACKGROUNDS`], in table order.
pub fn known_keys() -> Vec<&'static str> {
    BACKGROUNDS.iter().map(|(key, _)| *key).collect()
}

/// Pick the background key for `condition_text`.
///
/// An exact case-insensitive match wins outright. Otherwise the longest key
/// contained in the text wins, so "Partly cloudy" beats "cloudy". Keys of
/// equal length keep their order in `known_keys`.
pub fn select_background_key<'a>(condition_text: Option<&str>, known_keys: &[&'a str]) -> &'a str {
    let lowered = match condition_text {
        Some(text) if !text.is_empty() => text.to_lowercase(),
        _ => return DEFAULT_KEY,
    };

    if let Some(exact) = known_keys.iter().copied().find(|key| key.to_lowercase() == lowered) {
        return exact;
    }

    let mut by_length = known_keys.to_vec();
    // sort_by_key is stable
    by_length.sort_by_key(|key| Reverse(key.chars().count()));

    by_length
        .into_iter()
        .find(|key| lowered.contains(&key.to_lowercase()))
        .unwrap_or(DEFAULT_KEY)
}

/// Image URL for `key`, or the `Default` image for unknown keys.
pub fn background_url(key: &str) -> &'static str {
    BACKGROUNDS
        .iter()
        .find(|(k, _)| *k == key)
        .or_else(|| BACKGROUNDS.iter().find(|(k, _)| *k == DEFAULT_KEY))
        .map(|(_, url)| *url)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn select(text: &str) -> &'static str {
        select_background_key(Some(text), &known_keys())
    }

    #[test]
    fn exact_match_any_casing_returns_table_key() {
        for key in known_keys() {
            assert_eq!(select(key), key);
            assert_eq!(select(&key.to_uppercase()), key);
            assert_eq!(select(&key.to_lowercase()), key);
        }
    }

    #[test]
    fn longer_key_wins_over_contained_key() {
        assert_eq!(select("Partly cloudy skies"), "Partly cloudy");
        assert_eq!(select("PARTLY CLOUDY"), "Partly cloudy");
    }

    #[test]
    fn substring_match_picks_condition_word() {
        assert_eq!(select("Patchy light rain"), "Rain");
        assert_eq!(select("Light snow showers"), "Snow");
        assert_eq!(select("Freezing mist"), "Mist");
    }

    #[test]
    fn empty_or_unknown_text_falls_back_to_default() {
        assert_eq!(select_background_key(None, &known_keys()), DEFAULT_KEY);
        assert_eq!(select(""), DEFAULT_KEY);
        assert_eq!(select("gibberish-xyz"), DEFAULT_KEY);
    }

    #[test]
    fn equal_length_ties_keep_table_order() {
        // "Snow" and "Mist" are both four characters; "Snow" comes first.
        assert_eq!(select("mist turning to snow"), "Snow");
        // "Clouds" and "cloudy" are both six characters; "Clouds" comes first.
        assert_eq!(select("cloudy with clouds"), "Clouds");
    }

    #[test]
    fn custom_key_set_is_respected() {
        let keys = ["Fog", "Freezing fog", DEFAULT_KEY];
        assert_eq!(select_background_key(Some("Freezing fog"), &keys), "Freezing fog");
        assert_eq!(select_background_key(Some("Patchy freezing fog"), &keys), "Freezing fog");
        assert_eq!(select_background_key(Some("Sunny"), &keys), DEFAULT_KEY);
    }

    #[test]
    fn background_url_falls_back_to_default() {
        let default_url = background_url(DEFAULT_KEY);
        assert!(default_url.contains("rain-nature"));
        assert_eq!(background_url("Hail"), default_url);
        assert!(background_url("Sunny").contains("kitten"));
    }
}
