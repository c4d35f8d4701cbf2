use std::fmt;

use chrono::NaiveDate;

use crate::player::{FieldKind, Player, PlayerField, Position, is_premier_league_team};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: PlayerField,
    pub message: String,
}

/// Field-scoped validation failures, in form order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    pub fn fields(&self) -> Vec<PlayerField> {
        self.errors.iter().map(|e| e.field).collect()
    }

    pub fn get(&self, field: PlayerField) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn contains(&self, field: PlayerField) -> bool {
        self.get(field).is_some()
    }

    fn push(&mut self, field: PlayerField, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }

    fn sort(&mut self) {
        self.errors.sort_by_key(|e| e.field.index());
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid player")?;
        for (idx, err) in self.errors.iter().enumerate() {
            let sep = if idx == 0 { ": " } else { "; " };
            write!(f, "{sep}{}: {}", err.field.key(), err.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

pub fn validate_player(player: &Player) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();
    check_player(player, &[], &mut errors);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_player(player: &Player, skip: &[PlayerField], errors: &mut ValidationErrors) {
    let mut scratch = player.clone();
    for field in PlayerField::ALL {
        if skip.contains(&field) {
            continue;
        }
        let message = match field.kind() {
            FieldKind::Text => scratch
                .text_slot(field)
                .and_then(|value| check_text(field, value)),
            FieldKind::Integer { min, max } => scratch
                .int_slot(field)
                .and_then(|value| check_int(field, *value, min, max)),
            FieldKind::Decimal { max } => scratch
                .float_slot(field)
                .and_then(|value| check_decimal(field, *value, max)),
        };
        if let Some(message) = message {
            errors.push(field, message);
        }
    }
}

fn check_text(field: PlayerField, value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Some(format!("{} is required", field.label()));
    }
    match field {
        PlayerField::Team if !is_premier_league_team(trimmed) => {
            Some("Team must be one of the Premier League clubs".to_string())
        }
        PlayerField::Position if Position::parse(trimmed).is_none() => {
            Some("Position must be one of GK, DF, MF, FW".to_string())
        }
        PlayerField::Date if NaiveDate::parse_from_str(trimmed, DATE_FORMAT).is_err() => {
            Some("Date must be a YYYY-MM-DD date".to_string())
        }
        _ => None,
    }
}

fn check_int(field: PlayerField, value: i32, min: i32, max: Option<i32>) -> Option<String> {
    if value < min {
        return Some(format!("{} must be at least {min}", field.label()));
    }
    match max {
        Some(max) if value > max => Some(format!("{} must be at most {max}", field.label())),
        _ => None,
    }
}

fn check_decimal(field: PlayerField, value: f64, max: Option<f64>) -> Option<String> {
    if !value.is_finite() {
        return Some(format!("{} must be a number", field.label()));
    }
    if value < 0.0 {
        return Some(format!("{} must be at least 0", field.label()));
    }
    match max {
        Some(max) if value > max => Some(format!("{} must be at most {max}", field.label())),
        _ => None,
    }
}

/// Text inputs for every [`PlayerField`]; numbers are coerced on [`PlayerForm::validate`].
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerForm {
    pub id: Option<i64>,
    values: Vec<String>,
}

impl PlayerForm {
    pub fn draft(today: NaiveDate) -> Self {
        let player = Player {
            number: 1,
            age: 20,
            date: today.format(DATE_FORMAT).to_string(),
            ..Player::default()
        };
        Self::from_player(&player)
    }

    pub fn from_player(player: &Player) -> Self {
        Self {
            id: player.id,
            values: PlayerField::ALL
                .iter()
                .map(|field| player.input_value(*field))
                .collect(),
        }
    }

    pub fn is_edit(&self) -> bool {
        self.id.is_some()
    }

    pub fn get(&self, field: PlayerField) -> &str {
        self.values
            .get(field.index())
            .map(String::as_str)
            .unwrap_or_default()
    }

    pub fn set(&mut self, field: PlayerField, text: impl Into<String>) {
        if let Some(slot) = self.values.get_mut(field.index()) {
            *slot = text.into();
        }
    }

    pub fn push_char(&mut self, field: PlayerField, ch: char) {
        if let Some(slot) = self.values.get_mut(field.index()) {
            slot.push(ch);
        }
    }

    pub fn pop_char(&mut self, field: PlayerField) {
        if let Some(slot) = self.values.get_mut(field.index()) {
            slot.pop();
        }
    }

    pub fn validate(&self) -> Result<Player, ValidationErrors> {
        let mut player = Player {
            id: self.id,
            ..Player::default()
        };
        let mut errors = ValidationErrors::default();
        let mut unparsed = Vec::new();

        for field in PlayerField::ALL {
            let raw = self.get(field).trim();
            match field.kind() {
                FieldKind::Text => {
                    if let Some(slot) = player.text_slot(field) {
                        *slot = raw.to_string();
                    }
                }
                FieldKind::Integer { .. } => match coerce_int(field, raw) {
                    Ok(value) => {
                        if let Some(slot) = player.int_slot(field) {
                            *slot = value;
                        }
                    }
                    Err(message) => {
                        errors.push(field, message);
                        unparsed.push(field);
                    }
                },
                FieldKind::Decimal { .. } => match coerce_decimal(field, raw) {
                    Ok(value) => {
                        if let Some(slot) = player.float_slot(field) {
                            *slot = value;
                        }
                    }
                    Err(message) => {
                        errors.push(field, message);
                        unparsed.push(field);
                    }
                },
            }
        }

        if let Some(pos) = Position::parse(&player.position) {
            player.position = pos.code().to_string();
        }

        check_player(&player, &unparsed, &mut errors);
        if errors.is_empty() {
            Ok(player)
        } else {
            errors.sort();
            Err(errors)
        }
    }
}

fn coerce_int(field: PlayerField, raw: &str) -> Result<i32, String> {
    if raw.is_empty() {
        return Err(format!("{} must be a number", field.label()));
    }
    let out_of_range = || format!("{} is out of range", field.label());
    if let Ok(value) = raw.parse::<i64>() {
        return i32::try_from(value).map_err(|_| out_of_range());
    }
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() && value.fract() == 0.0 => {
            if value < f64::from(i32::MIN) || value > f64::from(i32::MAX) {
                Err(out_of_range())
            } else {
                Ok(value as i32)
            }
        }
        Ok(value) if value.is_finite() => Err(format!("{} must be a whole number", field.label())),
        _ => Err(format!("{} must be a number", field.label())),
    }
}

fn coerce_decimal(field: PlayerField, raw: &str) -> Result<f64, String> {
    match raw.replace(',', ".").parse::<f64>() {
        Ok(value) if value.is_finite() && !raw.is_empty() => Ok(value),
        _ => Err(format!("{} must be a number", field.label())),
    }
}
