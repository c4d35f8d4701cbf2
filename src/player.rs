use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

pub const PREMIER_LEAGUE_TEAMS: [&str; 20] = [
    "Arsenal",
    "Aston Villa",
    "Bournemouth",
    "Brentford",
    "Brighton",
    "Chelsea",
    "Crystal Palace",
    "Everton",
    "Fulham",
    "Ipswich Town",
    "Leicester City",
    "Liverpool",
    "Manchester City",
    "Manchester United",
    "Newcastle United",
    "Nottingham Forest",
    "Southampton",
    "Tottenham",
    "West Ham United",
    "Wolverhampton",
];

pub fn is_premier_league_team(name: &str) -> bool {
    PREMIER_LEAGUE_TEAMS.contains(&name)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Position {
    Goalkeeper,
    Defender,
    Midfielder,
    Forward,
}

impl Position {
    pub const ALL: [Position; 4] = [
        Position::Goalkeeper,
        Position::Defender,
        Position::Midfielder,
        Position::Forward,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Position::Goalkeeper => "GK",
            Position::Defender => "DF",
            Position::Midfielder => "MF",
            Position::Forward => "FW",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Position::Goalkeeper => "Goalkeeper",
            Position::Defender => "Defender",
            Position::Midfielder => "Midfielder",
            Position::Forward => "Forward",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        Position::ALL
            .into_iter()
            .find(|pos| pos.code().eq_ignore_ascii_case(trimmed))
    }
}

/// One row of player statistics for one snapshot date, in the backend's JSON shape.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "nullable")]
    pub player: String,
    #[serde(default, deserialize_with = "nullable")]
    pub team: String,
    #[serde(default, deserialize_with = "nullable")]
    pub number: i32,
    #[serde(default, deserialize_with = "nullable")]
    pub nation: String,
    #[serde(default, deserialize_with = "nullable")]
    pub position: String,
    #[serde(default, deserialize_with = "deserialize_age")]
    pub age: i32,
    #[serde(default, deserialize_with = "nullable")]
    pub minutes: i32,
    #[serde(default, deserialize_with = "nullable")]
    pub goals: i32,
    #[serde(default, deserialize_with = "nullable")]
    pub assists: i32,
    #[serde(default, deserialize_with = "nullable")]
    pub penalty_shoot_on_goal: i32,
    #[serde(default, deserialize_with = "nullable")]
    pub penalty_shoot: i32,
    #[serde(default, deserialize_with = "nullable")]
    pub total_shoot: i32,
    #[serde(default, deserialize_with = "nullable")]
    pub shoot_on_target: i32,
    #[serde(default, deserialize_with = "nullable")]
    pub yellow_cards: i32,
    #[serde(default, deserialize_with = "nullable")]
    pub red_cards: i32,
    #[serde(default, deserialize_with = "nullable")]
    pub touches: i32,
    #[serde(default, deserialize_with = "nullable")]
    pub dribbles: i32,
    #[serde(default, deserialize_with = "nullable")]
    pub tackles: i32,
    #[serde(default, deserialize_with = "nullable")]
    pub blocks: i32,
    #[serde(default, deserialize_with = "nullable")]
    pub xg: f64,
    #[serde(default, deserialize_with = "nullable")]
    pub npxg: f64,
    #[serde(default, deserialize_with = "nullable")]
    pub xag: f64,
    #[serde(default, deserialize_with = "nullable")]
    pub shot_creating_actions: i32,
    #[serde(default, deserialize_with = "nullable")]
    pub goal_creating_actions: i32,
    #[serde(default, deserialize_with = "nullable")]
    pub passes_completed: i32,
    #[serde(default, deserialize_with = "nullable")]
    pub passes_attempted: i32,
    #[serde(default, deserialize_with = "nullable")]
    pub pass_completion: f64,
    #[serde(default, deserialize_with = "nullable")]
    pub progressive_passes: i32,
    #[serde(default, deserialize_with = "nullable")]
    pub carries: i32,
    #[serde(default, deserialize_with = "nullable")]
    pub progressive_carries: i32,
    #[serde(default, deserialize_with = "nullable")]
    pub dribble_attempts: i32,
    #[serde(default, deserialize_with = "nullable")]
    pub successful_dribbles: i32,
    #[serde(default, deserialize_with = "nullable")]
    pub date: String,
}

impl Player {
    /// A record without an id has not been accepted by the backend yet.
    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }

    pub fn display_value(&self, field: PlayerField) -> String {
        match field {
            PlayerField::Player => self.player.clone(),
            PlayerField::Team => self.team.clone(),
            PlayerField::Number => self.number.to_string(),
            PlayerField::Nation => self.nation.clone(),
            PlayerField::Position => self.position.clone(),
            PlayerField::Age => self.age.to_string(),
            PlayerField::Minutes => self.minutes.to_string(),
            PlayerField::Goals => self.goals.to_string(),
            PlayerField::Assists => self.assists.to_string(),
            PlayerField::PenaltyShootOnGoal => self.penalty_shoot_on_goal.to_string(),
            PlayerField::PenaltyShoot => self.penalty_shoot.to_string(),
            PlayerField::TotalShoot => self.total_shoot.to_string(),
            PlayerField::ShootOnTarget => self.shoot_on_target.to_string(),
            PlayerField::YellowCards => self.yellow_cards.to_string(),
            PlayerField::RedCards => self.red_cards.to_string(),
            PlayerField::Touches => self.touches.to_string(),
            PlayerField::Dribbles => self.dribbles.to_string(),
            PlayerField::Tackles => self.tackles.to_string(),
            PlayerField::Blocks => self.blocks.to_string(),
            PlayerField::Xg => format!("{:.2}", self.xg),
            PlayerField::Npxg => format!("{:.2}", self.npxg),
            PlayerField::Xag => format!("{:.2}", self.xag),
            PlayerField::ShotCreatingActions => self.shot_creating_actions.to_string(),
            PlayerField::GoalCreatingActions => self.goal_creating_actions.to_string(),
            PlayerField::PassesCompleted => self.passes_completed.to_string(),
            PlayerField::PassesAttempted => self.passes_attempted.to_string(),
            PlayerField::PassCompletion => format!("{:.1}", self.pass_completion),
            PlayerField::ProgressivePasses => self.progressive_passes.to_string(),
            PlayerField::Carries => self.carries.to_string(),
            PlayerField::ProgressiveCarries => self.progressive_carries.to_string(),
            PlayerField::DribbleAttempts => self.dribble_attempts.to_string(),
            PlayerField::SuccessfulDribbles => self.successful_dribbles.to_string(),
            PlayerField::Date => self.date.clone(),
        }
    }

    /// Unrounded text for editing; parses back to exactly the stored value.
    pub fn input_value(&self, field: PlayerField) -> String {
        match field {
            PlayerField::Xg => self.xg.to_string(),
            PlayerField::Npxg => self.npxg.to_string(),
            PlayerField::Xag => self.xag.to_string(),
            PlayerField::PassCompletion => self.pass_completion.to_string(),
            _ => self.display_value(field),
        }
    }

    pub fn text_slot(&mut self, field: PlayerField) -> Option<&mut String> {
        match field {
            PlayerField::Player => Some(&mut self.player),
            PlayerField::Team => Some(&mut self.team),
            PlayerField::Nation => Some(&mut self.nation),
            PlayerField::Position => Some(&mut self.position),
            PlayerField::Date => Some(&mut self.date),
            _ => None,
        }
    }

    pub fn int_slot(&mut self, field: PlayerField) -> Option<&mut i32> {
        match field {
            PlayerField::Number => Some(&mut self.number),
            PlayerField::Age => Some(&mut self.age),
            PlayerField::Minutes => Some(&mut self.minutes),
            PlayerField::Goals => Some(&mut self.goals),
            PlayerField::Assists => Some(&mut self.assists),
            PlayerField::PenaltyShootOnGoal => Some(&mut self.penalty_shoot_on_goal),
            PlayerField::PenaltyShoot => Some(&mut self.penalty_shoot),
            PlayerField::TotalShoot => Some(&mut self.total_shoot),
            PlayerField::ShootOnTarget => Some(&mut self.shoot_on_target),
            PlayerField::YellowCards => Some(&mut self.yellow_cards),
            PlayerField::RedCards => Some(&mut self.red_cards),
            PlayerField::Touches => Some(&mut self.touches),
            PlayerField::Dribbles => Some(&mut self.dribbles),
            PlayerField::Tackles => Some(&mut self.tackles),
            PlayerField::Blocks => Some(&mut self.blocks),
            PlayerField::ShotCreatingActions => Some(&mut self.shot_creating_actions),
            PlayerField::GoalCreatingActions => Some(&mut self.goal_creating_actions),
            PlayerField::PassesCompleted => Some(&mut self.passes_completed),
            PlayerField::PassesAttempted => Some(&mut self.passes_attempted),
            PlayerField::ProgressivePasses => Some(&mut self.progressive_passes),
            PlayerField::Carries => Some(&mut self.carries),
            PlayerField::ProgressiveCarries => Some(&mut self.progressive_carries),
            PlayerField::DribbleAttempts => Some(&mut self.dribble_attempts),
            PlayerField::SuccessfulDribbles => Some(&mut self.successful_dribbles),
            _ => None,
        }
    }

    pub fn float_slot(&mut self, field: PlayerField) -> Option<&mut f64> {
        match field {
            PlayerField::Xg => Some(&mut self.xg),
            PlayerField::Npxg => Some(&mut self.npxg),
            PlayerField::Xag => Some(&mut self.xag),
            PlayerField::PassCompletion => Some(&mut self.pass_completion),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldKind {
    Text,
    Integer { min: i32, max: Option<i32> },
    Decimal { max: Option<f64> },
}

/// Every editable column of a [`Player`], in form order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerField {
    Player,
    Team,
    Number,
    Nation,
    Position,
    Age,
    Minutes,
    Goals,
    Assists,
    PenaltyShootOnGoal,
    PenaltyShoot,
    TotalShoot,
    ShootOnTarget,
    YellowCards,
    RedCards,
    Touches,
    Dribbles,
    Tackles,
    Blocks,
    Xg,
    Npxg,
    Xag,
    ShotCreatingActions,
    GoalCreatingActions,
    PassesCompleted,
    PassesAttempted,
    PassCompletion,
    ProgressivePasses,
    Carries,
    ProgressiveCarries,
    DribbleAttempts,
    SuccessfulDribbles,
    Date,
}

impl PlayerField {
    pub const ALL: [PlayerField; 33] = [
        PlayerField::Player,
        PlayerField::Team,
        PlayerField::Number,
        PlayerField::Nation,
        PlayerField::Position,
        PlayerField::Age,
        PlayerField::Minutes,
        PlayerField::Goals,
        PlayerField::Assists,
        PlayerField::PenaltyShootOnGoal,
        PlayerField::PenaltyShoot,
        PlayerField::TotalShoot,
        PlayerField::ShootOnTarget,
        PlayerField::YellowCards,
        PlayerField::RedCards,
        PlayerField::Touches,
        PlayerField::Dribbles,
        PlayerField::Tackles,
        PlayerField::Blocks,
        PlayerField::Xg,
        PlayerField::Npxg,
        PlayerField::Xag,
        PlayerField::ShotCreatingActions,
        PlayerField::GoalCreatingActions,
        PlayerField::PassesCompleted,
        PlayerField::PassesAttempted,
        PlayerField::PassCompletion,
        PlayerField::ProgressivePasses,
        PlayerField::Carries,
        PlayerField::ProgressiveCarries,
        PlayerField::DribbleAttempts,
        PlayerField::SuccessfulDribbles,
        PlayerField::Date,
    ];

    pub fn index(self) -> usize {
        PlayerField::ALL
            .iter()
            .position(|f| *f == self)
            .unwrap_or_default()
    }

    /// JSON key on the wire.
    pub fn key(self) -> &'static str {
        match self {
            PlayerField::Player => "player",
            PlayerField::Team => "team",
            PlayerField::Number => "number",
            PlayerField::Nation => "nation",
            PlayerField::Position => "position",
            PlayerField::Age => "age",
            PlayerField::Minutes => "minutes",
            PlayerField::Goals => "goals",
            PlayerField::Assists => "assists",
            PlayerField::PenaltyShootOnGoal => "penaltyShootOnGoal",
            PlayerField::PenaltyShoot => "penaltyShoot",
            PlayerField::TotalShoot => "totalShoot",
            PlayerField::ShootOnTarget => "shootOnTarget",
            PlayerField::YellowCards => "yellowCards",
            PlayerField::RedCards => "redCards",
            PlayerField::Touches => "touches",
            PlayerField::Dribbles => "dribbles",
            PlayerField::Tackles => "tackles",
            PlayerField::Blocks => "blocks",
            PlayerField::Xg => "xg",
            PlayerField::Npxg => "npxg",
            PlayerField::Xag => "xag",
            PlayerField::ShotCreatingActions => "shotCreatingActions",
            PlayerField::GoalCreatingActions => "goalCreatingActions",
            PlayerField::PassesCompleted => "passesCompleted",
            PlayerField::PassesAttempted => "passesAttempted",
            PlayerField::PassCompletion => "passCompletion",
            PlayerField::ProgressivePasses => "progressivePasses",
            PlayerField::Carries => "carries",
            PlayerField::ProgressiveCarries => "progressiveCarries",
            PlayerField::DribbleAttempts => "dribbleAttempts",
            PlayerField::SuccessfulDribbles => "successfulDribbles",
            PlayerField::Date => "date",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PlayerField::Player => "Player Name",
            PlayerField::Team => "Team",
            PlayerField::Number => "Number",
            PlayerField::Nation => "Nation",
            PlayerField::Position => "Position",
            PlayerField::Age => "Age",
            PlayerField::Minutes => "Minutes",
            PlayerField::Goals => "Goals",
            PlayerField::Assists => "Assists",
            PlayerField::PenaltyShootOnGoal => "Penalties on Goal",
            PlayerField::PenaltyShoot => "Penalties Taken",
            PlayerField::TotalShoot => "Total Shots",
            PlayerField::ShootOnTarget => "Shots on Target",
            PlayerField::YellowCards => "Yellow Cards",
            PlayerField::RedCards => "Red Cards",
            PlayerField::Touches => "Touches",
            PlayerField::Dribbles => "Dribbles",
            PlayerField::Tackles => "Tackles",
            PlayerField::Blocks => "Blocks",
            PlayerField::Xg => "xG",
            PlayerField::Npxg => "Non-Penalty xG",
            PlayerField::Xag => "xAG",
            PlayerField::ShotCreatingActions => "Shot-Creating Actions",
            PlayerField::GoalCreatingActions => "Goal-Creating Actions",
            PlayerField::PassesCompleted => "Passes Completed",
            PlayerField::PassesAttempted => "Passes Attempted",
            PlayerField::PassCompletion => "Pass Completion %",
            PlayerField::ProgressivePasses => "Progressive Passes",
            PlayerField::Carries => "Carries",
            PlayerField::ProgressiveCarries => "Progressive Carries",
            PlayerField::DribbleAttempts => "Dribble Attempts",
            PlayerField::SuccessfulDribbles => "Successful Dribbles",
            PlayerField::Date => "Date",
        }
    }

    pub fn kind(self) -> FieldKind {
        match self {
            PlayerField::Player
            | PlayerField::Team
            | PlayerField::Nation
            | PlayerField::Position
            | PlayerField::Date => FieldKind::Text,
            PlayerField::Number => FieldKind::Integer {
                min: 1,
                max: Some(99),
            },
            PlayerField::Age => FieldKind::Integer {
                min: 15,
                max: Some(50),
            },
            PlayerField::Xg | PlayerField::Npxg | PlayerField::Xag => {
                FieldKind::Decimal { max: None }
            }
            PlayerField::PassCompletion => FieldKind::Decimal { max: Some(100.0) },
            _ => FieldKind::Integer { min: 0, max: None },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct PlayerFilters {
    pub team: Option<String>,
    pub name: Option<String>,
    pub position: Option<String>,
    pub nation: Option<String>,
}

impl PlayerFilters {
    /// Blank values mean "not filtered"; two filters that normalize equal share a cache key.
    pub fn normalized(&self) -> PlayerFilters {
        PlayerFilters {
            team: normalize(self.team.as_deref()),
            name: normalize(self.name.as_deref()),
            position: normalize(self.position.as_deref()),
            nation: normalize(self.nation.as_deref()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.query_pairs().is_empty()
    }

    pub fn query_pairs(&self) -> Vec<(&'static str, &str)> {
        let mut pairs = Vec::new();
        let fields = [
            ("team", self.team.as_deref()),
            ("name", self.name.as_deref()),
            ("position", self.position.as_deref()),
            ("nation", self.nation.as_deref()),
        ];
        for (key, value) in fields {
            if let Some(value) = value.and_then(non_empty) {
                pairs.push((key, value));
            }
        }
        pairs
    }

    pub fn describe(&self) -> String {
        let pairs = self.query_pairs();
        if pairs.is_empty() {
            return "All players".to_string();
        }
        pairs
            .iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlayerSummary {
    pub total_players: usize,
    pub total_goals: i64,
    pub total_assists: i64,
    pub avg_xg: f64,
}

pub fn summarize(players: &[Player]) -> PlayerSummary {
    if players.is_empty() {
        return PlayerSummary::default();
    }
    let total_goals = players.iter().map(|p| i64::from(p.goals)).sum();
    let total_assists = players.iter().map(|p| i64::from(p.assists)).sum();
    let xg_sum: f64 = players.iter().map(|p| p.xg).sum();
    PlayerSummary {
        total_players: players.len(),
        total_goals,
        total_assists,
        avg_xg: xg_sum / players.len() as f64,
    }
}

/// Reads the years part of the backend's `"years-days"` age format (e.g. `"29-343"`).
pub fn parse_age_text(raw: &str) -> Option<i32> {
    raw.trim().split('-').next()?.trim().parse().ok()
}

fn normalize(value: Option<&str>) -> Option<String> {
    value.and_then(non_empty).map(str::to_string)
}

fn non_empty(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn deserialize_age<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum AgeRepr {
        Whole(i64),
        Fraction(f64),
        Text(String),
    }

    match Option::<AgeRepr>::deserialize(deserializer)? {
        None => Ok(0),
        Some(AgeRepr::Whole(years)) => i32::try_from(years).map_err(D::Error::custom),
        Some(AgeRepr::Fraction(years)) => Ok(years.trunc() as i32),
        Some(AgeRepr::Text(raw)) => {
            parse_age_text(&raw).ok_or_else(|| D::Error::custom(format!("invalid age {raw:?}")))
        }
    }
}
