use serde::Serialize;
use std::fmt::Display;

/// Canonical English day of the teaching week.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

/// Spellings used by the scheduling office (English, Kazakh, Russian).
/// `Жүма` and `Понеделник` are misspellings found in real sheets.
const LOCALE_TABLE: [(Weekday, &[&str]); 6] = [
    (Weekday::Monday, &["MONDAY", "Дүйсенбі", "Понедельник", "Понеделник"]),
    (Weekday::Tuesday, &["TUESDAY", "Сейсенбі", "Вторник"]),
    (Weekday::Wednesday, &["WEDNESDAY", "Сәрсенбі", "Среда"]),
    (Weekday::Thursday, &["THURSDAY", "Бейсенбі", "Четверг"]),
    (Weekday::Friday, &["FRIDAY", "Жүма", "Жұма", "Пятница"]),
    (Weekday::Saturday, &["SATURDAY", "Сенбі", "Суббота"]),
];

impl Weekday {
    pub const ALL: [Weekday; 6] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
    ];

    /// Translates a source token. Matching is exact and case-sensitive.
    pub fn from_token(token: &str) -> Option<Weekday> {
        LOCALE_TABLE
            .iter()
            .find(|(_, tokens)| tokens.contains(&token))
            .map(|(day, _)| *day)
    }

    /// Returns every source spelling of this day.
    pub fn tokens(&self) -> &'static [&'static str] {
        LOCALE_TABLE
            .iter()
            .find(|(day, _)| day == self)
            .map(|(_, tokens)| *tokens)
            .unwrap_or_default()
    }

    pub fn name(&self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
        }
    }
}

impl Display for Weekday {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
