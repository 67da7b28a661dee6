use std::collections::HashMap;

/// Arrow glyphs per cardinal direction. The wind comes FROM the named
/// direction, so the arrow points where it blows to, e.g. a north wind
/// blows towards the south.
const DIR_ARROWS: &[(&str, &str)] = &[
    ("N", "↓"),
    ("NNE", "↙"),
    ("NE", "↙"),
    ("ENE", "←"),
    ("E", "←"),
    ("ESE", "↖"),
    ("SE", "↖"),
    ("SSE", "↑"),
    ("S", "↑"),
    ("SSW", "↗"),
    ("SW", "↗"),
    ("WSW", "→"),
    ("W", "→"),
    ("WNW", "↘"),
    ("NW", "↘"),
    ("NNW", "↓"),
];

const DIR_FR: &[(&str, &str)] = &[
    ("N", "Nord"),
    ("NNE", "Nord-Nord-Est"),
    ("NE", "Nord-Est"),
    ("ENE", "Est-Nord-Est"),
    ("E", "Est"),
    ("ESE", "Est-Sud-Est"),
    ("SE", "Sud-Est"),
    ("SSE", "Sud-Sud-Est"),
    ("S", "Sud"),
    ("SSW", "Sud-Sud-Ouest"),
    ("SW", "Sud-Ouest"),
    ("WSW", "Ouest-Sud-Ouest"),
    ("W", "Ouest"),
    ("WNW", "Ouest-Nord-Ouest"),
    ("NW", "Nord-Ouest"),
    ("NNW", "Nord-Nord-Ouest"),
];

fn lookup(table: &[(&str, &str)], direction: &str) -> Option<String> {
    let upper = direction.to_uppercase();
    table
        .iter()
        .find(|(key, _)| *key == upper)
        .map(|(_, value)| value.to_string())
}

/// Returns the arrow glyph for a wind direction, "?" when unknown and the
/// direction itself when it is not a known cardinal.
///
/// # Arguments
///
/// * 'direction' - cardinal direction string, e.g. "WNW"
pub fn wind_dir_arrow(direction: Option<&str>) -> String {
    match direction {
        None => "?".to_string(),
        Some(d) => lookup(DIR_ARROWS, d).unwrap_or_else(|| d.to_string()),
    }
}

/// Returns the French name of a wind direction, "–" when unknown
///
/// # Arguments
///
/// * 'direction' - cardinal direction string, e.g. "WNW"
pub fn wind_dir_fr(direction: Option<&str>) -> String {
    match direction {
        None => "–".to_string(),
        Some(d) => lookup(DIR_FR, d).unwrap_or_else(|| d.to_string()),
    }
}

/// Returns the most frequent direction among the known ones, None when
/// there are none. Frequency ties resolve to the first direction seen.
///
/// # Arguments
///
/// * 'directions' - direction of each sample, None entries are ignored
pub fn dominant_direction<'a, I>(directions: I) -> Option<String>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut order: Vec<&str> = Vec::new();

    for dir in directions.into_iter().flatten() {
        let count = counts.entry(dir).or_insert(0);
        if *count == 0 {
            order.push(dir);
        }
        *count += 1;
    }

    let mut best: Option<(&str, usize)> = None;
    for dir in order {
        let count = counts[dir];
        if best.is_none_or(|(_, best_count)| count > best_count) {
            best = Some((dir, count));
        }
    }

    best.map(|(dir, _)| dir.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrows_and_names() {
        assert_eq!(wind_dir_arrow(Some("N")), "↓");
        assert_eq!(wind_dir_arrow(Some("wnw")), "↘");
        assert_eq!(wind_dir_arrow(None), "?");
        assert_eq!(wind_dir_arrow(Some("VAR")), "VAR");
        assert_eq!(wind_dir_fr(Some("SW")), "Sud-Ouest");
        assert_eq!(wind_dir_fr(None), "–");
    }

    #[test]
    fn dominant_is_the_mode_of_known_directions() {
        let dirs = [Some("W"), None, Some("NW"), Some("W"), Some("SSE")];
        assert_eq!(dominant_direction(dirs), Some("W".to_string()));
        assert_eq!(dominant_direction([None, None]), None);
        let empty: [Option<&str>; 0] = [];
        assert_eq!(dominant_direction(empty), None);
    }

    #[test]
    fn dominant_tie_keeps_first_seen() {
        let dirs = [Some("NW"), Some("W"), Some("NW"), Some("W")];
        assert_eq!(dominant_direction(dirs), Some("NW".to_string()));
    }
}
