/// The five fixed journal categories. These gate page routing only;
/// the entry endpoints accept any genre string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Genre {
    Diary,
    HabitTracker,
    Manifestation,
    Challenge21,
    ToDo,
}

impl Genre {
    pub const ALL: [Genre; 5] = [
        Genre::Diary,
        Genre::HabitTracker,
        Genre::Manifestation,
        Genre::Challenge21,
        Genre::ToDo,
    ];

    pub fn from_slug(slug: &str) -> Option<Self> {
        match slug {
            "diary" => Some(Genre::Diary),
            "habit" => Some(Genre::HabitTracker),
            "manifestation" => Some(Genre::Manifestation),
            "challenge21" => Some(Genre::Challenge21),
            "todo" => Some(Genre::ToDo),
            _ => None,
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            Genre::Diary => "diary",
            Genre::HabitTracker => "habit",
            Genre::Manifestation => "manifestation",
            Genre::Challenge21 => "challenge21",
            Genre::ToDo => "todo",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Genre::Diary => "Diary",
            Genre::HabitTracker => "Habit Tracker",
            Genre::Manifestation => "Manifestation",
            Genre::Challenge21 => "21 Days Challenge",
            Genre::ToDo => "To Do",
        }
    }
}

/// Fixed theme list shown on the landing page.
pub const THEMES: [(&str, &str); 4] = [
    ("Classic Leather", "theme-leather"),
    ("Floral", "theme-floral"),
    ("Minimal", "theme-minimal"),
    ("Retro", "theme-retro"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugs_round_trip() {
        for genre in Genre::ALL {
            assert_eq!(Genre::from_slug(genre.slug()), Some(genre));
        }
    }

    #[test]
    fn unknown_slug_is_none() {
        assert_eq!(Genre::from_slug("poetry"), None);
        assert_eq!(Genre::from_slug(""), None);
        assert_eq!(Genre::from_slug("Diary"), None);
    }
}
