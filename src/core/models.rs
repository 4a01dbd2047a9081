use serde::{
    Deserialize,
    Serialize,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VocabItem {
    pub id: usize,                // Ordinal of the source row, before filtering
    pub term: String,             // Displayed and spoken form
    pub phonetic_hint: String,    // Pinyin or other pronunciation note
    pub translation: String,
    pub tone: ToneMarker,
    pub too_easy: bool,           // Column E
    pub to_learn: bool,           // Column F
}

impl VocabItem {
    pub fn flag(&self, flag: Flag) -> bool {
        match flag {
            Flag::TooEasy => self.too_easy,
            Flag::ToLearn => self.to_learn,
        }
    }

    pub fn set_flag(&mut self, flag: Flag, value: bool) {
        match flag {
            Flag::TooEasy => self.too_easy = value,
            Flag::ToLearn => self.to_learn = value,
        }
    }
}

/// A persisted boolean column of the vocabulary sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Flag {
    #[serde(rename = "E")]
    TooEasy,
    #[serde(rename = "F")]
    ToLearn,
}

impl Flag {
    pub fn column(&self) -> &'static str {
        match self {
            Flag::TooEasy => "E",
            Flag::ToLearn => "F",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Daily,
    TooEasy,
    ToLearn,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Daily, Category::TooEasy, Category::ToLearn];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Daily => "Daily review",
            Category::TooEasy => "Too easy",
            Category::ToLearn => "To learn",
        }
    }

    /// Daily is whatever has not been triaged into either shelf yet.
    pub fn matches(&self, item: &VocabItem) -> bool {
        match self {
            Category::Daily => !item.too_easy && !item.to_learn,
            Category::TooEasy => item.too_easy,
            Category::ToLearn => item.to_learn,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoryCounts {
    pub daily: usize,
    pub too_easy: usize,
    pub to_learn: usize,
}

impl CategoryCounts {
    pub fn get(&self, category: Category) -> usize {
        match category {
            Category::Daily => self.daily,
            Category::TooEasy => self.too_easy,
            Category::ToLearn => self.to_learn,
        }
    }
}

/// Single-character tone annotation from column D.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToneMarker {
    Level,
    Rising,
    Dipping,
    Falling,
    Neutral,
    Unknown,
}

impl ToneMarker {
    pub fn parse(raw: &str) -> Self {
        let mut chars = raw.trim().chars();
        let (Some(c), None) = (chars.next(), chars.next()) else {
            return ToneMarker::Unknown;
        };

        match c {
            '→' | '1' => ToneMarker::Level,
            '↗' | '2' => ToneMarker::Rising,
            '↓' | '3' => ToneMarker::Dipping,
            '↘' | '4' => ToneMarker::Falling,
            '·' | '5' | '0' => ToneMarker::Neutral,
            _ => ToneMarker::Unknown,
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            ToneMarker::Level => "ˉ",
            ToneMarker::Rising => "ˊ",
            ToneMarker::Dipping => "ˇ",
            ToneMarker::Falling => "ˋ",
            ToneMarker::Neutral | ToneMarker::Unknown => "·",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(too_easy: bool, to_learn: bool) -> VocabItem {
        VocabItem {
            id: 0,
            term: "好".to_string(),
            phonetic_hint: "hǎo".to_string(),
            translation: "good".to_string(),
            tone: ToneMarker::Dipping,
            too_easy,
            to_learn,
        }
    }

    #[test]
    fn flags_are_independent() {
        let mut word = item(false, false);
        word.set_flag(Flag::TooEasy, true);
        word.set_flag(Flag::ToLearn, true);
        assert!(word.flag(Flag::TooEasy) && word.flag(Flag::ToLearn));

        word.set_flag(Flag::TooEasy, false);
        assert!(!word.too_easy);
        assert!(word.to_learn);
    }

    #[test]
    fn item_with_both_flags_is_only_on_the_shelves() {
        let word = item(true, true);
        assert!(!Category::Daily.matches(&word));
        assert!(Category::TooEasy.matches(&word));
        assert!(Category::ToLearn.matches(&word));
    }

    #[test]
    fn flag_columns() {
        assert_eq!(Flag::TooEasy.column(), "E");
        assert_eq!(Flag::ToLearn.column(), "F");
        assert_eq!(serde_json::to_string(&Flag::ToLearn).unwrap(), "\"F\"");
    }

    #[test]
    fn tone_markers() {
        assert_eq!(ToneMarker::parse("↘"), ToneMarker::Falling);
        assert_eq!(ToneMarker::parse(" ↗ "), ToneMarker::Rising);
        assert_eq!(ToneMarker::parse("3"), ToneMarker::Dipping);
        assert_eq!(ToneMarker::parse(""), ToneMarker::Unknown);
        assert_eq!(ToneMarker::parse("↘↗"), ToneMarker::Unknown);
        assert_eq!(ToneMarker::parse("x"), ToneMarker::Unknown);
        assert_eq!(ToneMarker::Unknown.glyph(), ToneMarker::Neutral.glyph());
    }
}
