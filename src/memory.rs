//! Key/value slot memory shared with the conversation collaborator.
//!
//! Every key maps to an ordered list of [`MemoryValue`]s. Readers that want a
//! single value take the last one.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const FILTER_MOVIE_NAME: &str = "filter-movie-name";
pub const FILTER_GENRE: &str = "filter-genre";
pub const FILTER_CITY: &str = "filter-city";
pub const FILTER_STATE: &str = "filter-state";
pub const FILTER_THEATER: &str = "filter-theater";
pub const FILTER_DATE: &str = "filter-date";
pub const FILTER_TIME: &str = "filter-time";
pub const FILTER_DATETIME: &str = "filter-datetime";
pub const RESOLVED_TIMES: &str = "resolved-times";

pub const FOUND_MOVIES: &str = "found-movies";
pub const FOUND_RATING: &str = "found-rating";
pub const FOUND_TIME: &str = "found-time";
pub const FOUND_THEATER: &str = "found-theater";
pub const FOUND_EXCESS: &str = "found-excess";

/// All derived facts, cleared at the start of each classification.
pub const FOUND_FACTS: [&str; 5] = [FOUND_TIME, FOUND_THEATER, FOUND_RATING, FOUND_MOVIES, FOUND_EXCESS];

/// One value stored under a memory key.
///
/// `resolution` holds the recognizer's structured payload for typed slots
/// (dates, times); plain string slots leave it empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryValue {
    pub user_text: Option<String>,
    #[serde(default)]
    pub resolution: Option<serde_json::Value>,
}

impl MemoryValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self { user_text: Some(value.into()), resolution: None }
    }

    pub fn resolved(user_text: impl Into<String>, resolution: serde_json::Value) -> Self {
        Self { user_text: Some(user_text.into()), resolution: Some(resolution) }
    }
}

/// The collaborator's memory surface.
pub trait Memory {
    fn get(&self, key: &str) -> &[MemoryValue];
    fn set(&mut self, key: &str, values: Vec<MemoryValue>);
    fn delete(&mut self, key: &str);

    /// Last non-empty user text under `key`.
    fn get_string(&self, key: &str) -> Option<String> {
        self.get(key)
            .last()
            .and_then(|v| v.user_text.as_deref())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    }

    fn get_string_list(&self, key: &str) -> Vec<String> {
        self.get(key).iter().filter_map(|v| v.user_text.clone()).collect()
    }

    fn set_string(&mut self, key: &str, value: impl Into<String>) {
        self.set(key, vec![MemoryValue::text(value)]);
    }

    fn set_string_list(&mut self, key: &str, values: &[String]) {
        self.set(key, values.iter().map(MemoryValue::text).collect());
    }

    fn set_number(&mut self, key: &str, value: f32) {
        self.set_string(key, value.to_string());
    }

    fn set_bool(&mut self, key: &str, value: bool) {
        self.set_string(key, value.to_string());
    }
}

/// In-process [`Memory`] backed by a `HashMap`.
#[derive(Debug, Clone, Default)]
pub struct SlotMemory {
    slots: HashMap<String, Vec<MemoryValue>>,
}

impl SlotMemory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.slots.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.slots.keys().map(String::as_str)
    }
}

impl Memory for SlotMemory {
    fn get(&self, key: &str) -> &[MemoryValue] {
        self.slots.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    fn set(&mut self, key: &str, values: Vec<MemoryValue>) {
        if values.is_empty() {
            self.slots.remove(key);
        } else {
            self.slots.insert(key.to_string(), values);
        }
    }

    fn delete(&mut self, key: &str) {
        self.slots.remove(key);
    }
}
