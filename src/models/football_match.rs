use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;

/// A `null` field decodes like a missing one: to the type's zero value.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A fixture row from the `matches` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub id: i32,
    pub home_team: String,
    pub away_team: String,
    pub match_date: String,
    pub home_goals: i32,
    pub away_goals: i32,
    #[sqlx(rename = "yellowcards")]
    pub yellow_cards: i32,
    #[sqlx(rename = "redcards")]
    pub red_cards: i32,
    /// Minutes
    #[sqlx(rename = "extratime")]
    pub extra_time: i32,
}

impl Match {
    /// Fresh record as stored by a create: every counter starts at zero.
    pub fn new(id: i32, details: MatchDetails) -> Self {
        Self {
            id,
            home_team: details.home_team,
            away_team: details.away_team,
            match_date: details.match_date,
            home_goals: 0,
            away_goals: 0,
            yellow_cards: 0,
            red_cards: 0,
            extra_time: 0,
        }
    }
}

/// Descriptive fields accepted by create and replace. Anything else in the body is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MatchDetails {
    #[serde(deserialize_with = "null_as_default")]
    pub home_team: String,
    #[serde(deserialize_with = "null_as_default")]
    pub away_team: String,
    #[serde(deserialize_with = "null_as_default")]
    pub match_date: String,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GoalsUpdate {
    #[serde(deserialize_with = "null_as_default")]
    pub home_goals: i32,
    #[serde(deserialize_with = "null_as_default")]
    pub away_goals: i32,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct YellowCardsUpdate {
    #[serde(deserialize_with = "null_as_default")]
    pub yellow_cards: i32,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RedCardsUpdate {
    #[serde(deserialize_with = "null_as_default")]
    pub red_cards: i32,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExtraTimeUpdate {
    #[serde(deserialize_with = "null_as_default")]
    pub extra_time: i32,
}

/// Single-column-group update applied by the PATCH endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchPatch {
    Goals { home: i32, away: i32 },
    YellowCards(i32),
    RedCards(i32),
    ExtraTime(i32),
}

impl MatchPatch {
    pub fn apply(self, record: &mut Match) {
        match self {
            MatchPatch::Goals { home, away } => {
                record.home_goals = home;
                record.away_goals = away;
            }
            MatchPatch::YellowCards(n) => record.yellow_cards = n,
            MatchPatch::RedCards(n) => record.red_cards = n,
            MatchPatch::ExtraTime(n) => record.extra_time = n,
        }
    }
}

impl From<GoalsUpdate> for MatchPatch {
    fn from(update: GoalsUpdate) -> Self {
        MatchPatch::Goals {
            home: update.home_goals,
            away: update.away_goals,
        }
    }
}

impl From<YellowCardsUpdate> for MatchPatch {
    fn from(update: YellowCardsUpdate) -> Self {
        MatchPatch::YellowCards(update.yellow_cards)
    }
}

impl From<RedCardsUpdate> for MatchPatch {
    fn from(update: RedCardsUpdate) -> Self {
        MatchPatch::RedCards(update.red_cards)
    }
}

impl From<ExtraTimeUpdate> for MatchPatch {
    fn from(update: ExtraTimeUpdate) -> Self {
        MatchPatch::ExtraTime(update.extra_time)
    }
}
