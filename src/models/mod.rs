pub mod football_match;

pub use football_match::{
    ExtraTimeUpdate, GoalsUpdate, Match, MatchDetails, MatchPatch, RedCardsUpdate,
    YellowCardsUpdate,
};
