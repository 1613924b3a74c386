//! Cafe form: raw submitted values and their validation.

use crate::app::cafe::{CafeDto, CafeFields};
use crate::domain::{Level, Scale};
use serde::Deserialize;
use std::collections::BTreeMap;

pub const REQUIRED: &str = "This field is required.";
pub const INVALID_CHOICE: &str = "Not a valid choice.";
pub const NAME_TAKEN: &str = "A cafe with this name already exists.";

/// Raw form body. Absent fields deserialize as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CafeForm {
    pub name: String,
    pub location: String,
    pub rating: String,
    pub wifi: String,
    pub power: String,
    pub csrf_token: String,
}

/// Field name -> messages, in field-name order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors(BTreeMap<&'static str, Vec<String>>);

impl FormErrors {
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_default().push(message.into());
    }

    pub fn get(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.keys().copied()
    }
}

impl CafeForm {
    /// Pre-populate an edit form from a stored record.
    pub fn from_cafe(cafe: &CafeDto) -> Self {
        Self {
            name: cafe.name.clone(),
            location: cafe.location.clone(),
            rating: cafe.rating.clone(),
            wifi: cafe.wifi.clone(),
            power: cafe.power.clone(),
            csrf_token: String::new(),
        }
    }

    pub fn value(&self, scale: Scale) -> &str {
        match scale {
            Scale::Rating => &self.rating,
            Scale::Wifi => &self.wifi,
            Scale::Power => &self.power,
        }
    }

    /// Check every field and collect all failures, not just the first.
    pub fn validate(&self) -> Result<CafeFields, FormErrors> {
        let mut errors = FormErrors::default();

        let name = self.name.trim();
        if name.is_empty() {
            errors.add("name", REQUIRED);
        }
        let location = self.location.trim();
        if location.is_empty() {
            errors.add("location", REQUIRED);
        }

        let mut levels = [Level::None; 3];
        for (slot, scale) in levels.iter_mut().zip(Scale::all()) {
            let raw = self.value(*scale);
            if raw.is_empty() {
                errors.add(scale.field(), REQUIRED);
                continue;
            }
            match scale.parse(raw) {
                Some(level) => *slot = level,
                None => errors.add(scale.field(), INVALID_CHOICE),
            }
        }

        if !errors.is_empty() {
            return Err(errors);
        }
        let [rating, wifi, power] = levels;
        Ok(CafeFields {
            name: name.to_string(),
            location: location.to_string(),
            rating,
            wifi,
            power,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> CafeForm {
        CafeForm {
            name: "Lighthaus".into(),
            location: "https://maps.app.goo.gl/abc".into(),
            rating: "☕☕☕".into(),
            wifi: "💪💪".into(),
            power: "🔌".into(),
            csrf_token: String::new(),
        }
    }

    #[test]
    fn valid_form_maps_every_field() {
        let fields = valid_form().validate().unwrap();
        assert_eq!(fields.name, "Lighthaus");
        assert_eq!(fields.location, "https://maps.app.goo.gl/abc");
        assert_eq!(fields.rating, Level::Three);
        assert_eq!(fields.wifi, Level::Two);
        assert_eq!(fields.power, Level::One);
    }

    #[test]
    fn name_and_location_are_trimmed() {
        let mut form = valid_form();
        form.name = "  Lighthaus ".into();
        form.location = " url ".into();
        let fields = form.validate().unwrap();
        assert_eq!(fields.name, "Lighthaus");
        assert_eq!(fields.location, "url");
    }

    #[test]
    fn blank_name_is_required() {
        let mut form = valid_form();
        form.name = "   ".into();
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get("name"), [REQUIRED.to_string()]);
        assert!(errors.get("location").is_empty());
    }

    #[test]
    fn out_of_scale_values_are_invalid_choices() {
        let mut form = valid_form();
        form.rating = "☕☕☕☕☕".into();
        form.wifi = "🔌".into();
        form.power = "lots".into();
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["power", "rating", "wifi"]);
        assert_eq!(errors.get("wifi"), [INVALID_CHOICE.to_string()]);
    }

    #[test]
    fn empty_form_reports_every_field() {
        let errors = CafeForm::default().validate().unwrap_err();
        assert_eq!(errors.fields().count(), 5);
        assert_eq!(errors.get("rating"), [REQUIRED.to_string()]);
    }

    #[test]
    fn no_symbol_is_a_valid_choice() {
        let mut form = valid_form();
        form.power = "✘".into();
        assert_eq!(form.validate().unwrap().power, Level::None);
    }
}
