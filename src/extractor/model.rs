use serde::{Deserialize, Serialize};
use std::fmt;

/// Scraped fields of a [`ProfileRecord`], in extraction order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Avatar,
    DisplayName,
    Level,
    AccountAge,
    PriceLowest,
    Price,
    Games,
    GamesPlayed,
    PriceAverage,
    PriceHour,
    Hours,
    HoursAverage,
    VanityUrl,
}

impl Field {
    pub const ALL: [Field; 13] = [
        Field::Avatar,
        Field::DisplayName,
        Field::Level,
        Field::AccountAge,
        Field::PriceLowest,
        Field::Price,
        Field::Games,
        Field::GamesPlayed,
        Field::PriceAverage,
        Field::PriceHour,
        Field::Hours,
        Field::HoursAverage,
        Field::VanityUrl,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Field::Avatar => "avatar",
            Field::DisplayName => "display_name",
            Field::Level => "level",
            Field::AccountAge => "account_age",
            Field::PriceLowest => "price_lowest",
            Field::Price => "price",
            Field::Games => "games",
            Field::GamesPlayed => "games_played",
            Field::PriceAverage => "price_average",
            Field::PriceHour => "price_hour",
            Field::Hours => "hours",
            Field::HoursAverage => "hours_average",
            Field::VanityUrl => "vanity_url",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Flat profile record. Absent fields serialize as `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileRecord {
    pub display_name: Option<String>,
    pub avatar: Option<String>,
    pub steam_id: String,
    pub vanity_url: Option<String>,
    pub level: Option<String>,
    pub games: Option<String>,
    pub games_played: Option<String>,
    pub price: Option<String>,
    pub price_lowest: Option<String>,
    pub price_average: Option<String>,
    pub price_hour: Option<String>,
    pub hours: Option<String>,
    pub hours_average: Option<String>,
    pub account_age: Option<String>,
    pub url_steam: String,
    pub url_steamdb: String,
}

impl ProfileRecord {
    /// A record with only the identifier and the two derived URLs set.
    pub fn new(
        steam_id: impl Into<String>,
        url_steam: impl Into<String>,
        url_steamdb: impl Into<String>,
    ) -> Self {
        Self {
            steam_id: steam_id.into(),
            url_steam: url_steam.into(),
            url_steamdb: url_steamdb.into(),
            ..Self::default()
        }
    }

    fn slot(&mut self, field: Field) -> &mut Option<String> {
        match field {
            Field::Avatar => &mut self.avatar,
            Field::DisplayName => &mut self.display_name,
            Field::Level => &mut self.level,
            Field::AccountAge => &mut self.account_age,
            Field::PriceLowest => &mut self.price_lowest,
            Field::Price => &mut self.price,
            Field::Games => &mut self.games,
            Field::GamesPlayed => &mut self.games_played,
            Field::PriceAverage => &mut self.price_average,
            Field::PriceHour => &mut self.price_hour,
            Field::Hours => &mut self.hours,
            Field::HoursAverage => &mut self.hours_average,
            Field::VanityUrl => &mut self.vanity_url,
        }
    }

    pub fn set(&mut self, field: Field, value: String) {
        *self.slot(field) = Some(value);
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        let value = match field {
            Field::Avatar => &self.avatar,
            Field::DisplayName => &self.display_name,
            Field::Level => &self.level,
            Field::AccountAge => &self.account_age,
            Field::PriceLowest => &self.price_lowest,
            Field::Price => &self.price,
            Field::Games => &self.games,
            Field::GamesPlayed => &self.games_played,
            Field::PriceAverage => &self.price_average,
            Field::PriceHour => &self.price_hour,
            Field::Hours => &self.hours,
            Field::HoursAverage => &self.hours_average,
            Field::VanityUrl => &self.vanity_url,
        };
        value.as_deref()
    }

    /// Number of scraped fields that hold a value.
    pub fn populated(&self) -> usize {
        Field::ALL.iter().filter(|f| self.get(**f).is_some()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get_every_field() {
        let mut record = ProfileRecord::new("1", "a", "b");
        assert_eq!(record.populated(), 0);
        for field in Field::ALL {
            record.set(field, field.name().to_string());
        }
        assert_eq!(record.populated(), Field::ALL.len());
        for field in Field::ALL {
            assert_eq!(record.get(field), Some(field.name()));
        }
    }

    #[test]
    fn test_serializes_absent_fields_as_null() {
        let mut record = ProfileRecord::new(
            "76561198287455504",
            "http://steamcommunity.com/profiles/76561198287455504",
            "https://steamdb.info/calculator/76561198287455504/?cc=us",
        );
        record.set(Field::Level, "42".to_string());

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["level"], "42");
        assert!(json["vanity_url"].is_null());
        assert_eq!(json["steam_id"], "76561198287455504");
        // Field names line up with the serialized keys
        for field in Field::ALL {
            assert!(json.get(field.name()).is_some(), "missing key {field}");
        }
    }
}
