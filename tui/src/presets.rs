//! Named rules.

/// A well-known Generations rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Preset {
    pub(crate) name: &'static str,
    pub(crate) rule: &'static str,
    pub(crate) description: &'static str,
}

const fn preset(name: &'static str, rule: &'static str, description: &'static str) -> Preset {
    Preset {
        name,
        rule,
        description,
    }
}

pub(crate) const PRESETS: [Preset; 14] = [
    preset("life", "23/3/2", "Conway's Game of Life"),
    preset("highlife", "23/36/2", "Life with a replicator"),
    preset("day-and-night", "34678/3678/2", "Symmetric under swapping dead and alive"),
    preset("seeds", "/2/2", "Every living cell dies at once"),
    preset("brians-brain", "/2/3", "Lots of small spaceships"),
    preset("star-wars", "345/2/4", "Spaceships and guns in a stable frame"),
    preset("bombers", "345/24/25", "Long trails of dying cells"),
    preset("frogs", "12/34/3", "Fast chaotic growth"),
    preset("spirals", "2/234/5", "Spiral waves"),
    preset("fireworks", "2/13/21", "Sparks with long tails"),
    preset("belzhab", "23/23/8", "Belousov-Zhabotinsky-like waves"),
    preset("lava", "12345/45678/8", "Slowly flowing blobs"),
    preset("sticks", "3456/2/6", "Straight lines"),
    preset("worms", "3467/25/6", "Crawling worms"),
];

/// Finds the rule string of a preset.
pub(crate) fn lookup(name: &str) -> Option<&'static str> {
    PRESETS
        .iter()
        .find(|preset| preset.name == name)
        .map(|preset| preset.rule)
}

/// Names of all presets.
pub(crate) fn names() -> impl Iterator<Item = &'static str> {
    PRESETS.iter().map(|preset| preset.name)
}

/// One line per preset, for the help message.
pub(crate) fn help() -> String {
    PRESETS
        .iter()
        .map(|preset| format!("  {:<14} {:<14} {}\n", preset.name, preset.rule, preset.description))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rlifesim_lib::Rule;

    #[test]
    fn presets_parse() {
        for preset in PRESETS {
            let rule = preset.rule.parse::<Rule>().unwrap();
            assert_eq!(rule.to_string(), preset.rule);
        }
    }

    #[test]
    fn lookup_by_name() {
        assert_eq!(lookup("star-wars"), Some("345/2/4"));
        assert_eq!(lookup("brians-brain"), Some("/2/3"));
        assert_eq!(lookup("nothing"), None);
        assert_eq!(names().count(), PRESETS.len());
    }
}
