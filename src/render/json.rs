//! JSON output.
//!
//! ```json
//! {"w06000001": {"names": {"cym": "Ynys Môn", "eng": "Isle of Anglesey"},
//!                "measures": {"pop": {"1991": 68000.0, "1992": 69000.0}}}}
//! ```
//!
//! `names` and `measures` are left out of an area object when empty.

use serde_json::{Map, Value};

use crate::model::{Area, AreaStore, Measure};

impl Measure {
    /// Year → value object. Years become string keys.
    pub fn to_json(&self) -> Value {
        let values: Map<String, Value> = self
            .values()
            .iter()
            .map(|(year, value)| (year.to_string(), Value::from(*value)))
            .collect();
        Value::Object(values)
    }
}

impl Area {
    pub fn to_json(&self) -> Value {
        let mut obj = Map::new();
        if !self.names().is_empty() {
            let names: Map<String, Value> = self
                .names()
                .iter()
                .map(|(lang, name)| (lang.clone(), Value::from(name.as_str())))
                .collect();
            obj.insert("names".to_string(), Value::Object(names));
        }
        if !self.is_empty() {
            let measures: Map<String, Value> = self
                .measures()
                .iter()
                .map(|(code, measure)| (code.clone(), measure.to_json()))
                .collect();
            obj.insert("measures".to_string(), Value::Object(measures));
        }
        Value::Object(obj)
    }
}

impl AreaStore {
    /// Every area keyed by lowercase authority code. An empty store is `{}`.
    pub fn to_json(&self) -> Value {
        let areas: Map<String, Value> = self
            .areas()
            .iter()
            .map(|(code, area)| (code.clone(), area.to_json()))
            .collect();
        Value::Object(areas)
    }

    /// [`Self::to_json`] serialized compactly.
    pub fn to_json_string(&self) -> String {
        self.to_json().to_string()
    }
}
