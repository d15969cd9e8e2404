use crate::constants::{LATITUDE_RANGE, LONGITUDE_RANGE, TEMPERATURE_RANGE};
use crate::data::station::{DtoStation, Station};
use crate::ui::validators::{self, ValidationError};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Name,
    Temperature,
    Latitude,
    Longitude,
}

impl FormField {
    pub fn label(&self) -> &'static str {
        match self {
            FormField::Name => "Name",
            FormField::Temperature => "Temperature",
            FormField::Latitude => "Latitude",
            FormField::Longitude => "Longitude",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldError {
    pub field: FormField,
    pub error: ValidationError,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field.label(), self.error)
    }
}

/// Every rule a form submission broke, in field order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FormErrors(Vec<FieldError>);

impl FormErrors {
    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    pub fn for_field(&self, field: FormField) -> impl Iterator<Item = &ValidationError> {
        self.0
            .iter()
            .filter(move |e| e.field == field)
            .map(|e| &e.error)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn push(&mut self, field: FormField, error: ValidationError) {
        self.0.push(FieldError { field, error });
    }
}

/// One line per violated rule
impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lines: Vec<String> = self.0.iter().map(|e| e.to_string()).collect();
        write!(f, "{}", lines.join("\n"))
    }
}

impl std::error::Error for FormErrors {}

/// Editable field-set for creating or updating a station
///
/// Fields hold raw text exactly as typed; surrounding whitespace is ignored
/// when validating.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StationForm {
    pub name: String,
    pub temperature: String,
    pub latitude: String,
    pub longitude: String,
}

impl StationForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_station(station: &Station) -> Self {
        let mut form = Self::new();
        form.fill_from(station);
        form
    }

    pub fn fill_from(&mut self, station: &Station) {
        self.name = station.ubication.clone();
        self.temperature = station.temperature.to_string();
        self.latitude = station.latitude.to_string();
        self.longitude = station.longitude.to_string();
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Checks every rule and builds the payload when none is broken
    pub fn validate(&self, client_tag: &str) -> Result<DtoStation, FormErrors> {
        let mut errors = FormErrors::default();

        let name = self.name.trim();
        if let Some(error) = validators::required(name).or_else(|| validators::alphabetic(name)) {
            errors.push(FormField::Name, error);
        }
        let temperature = check_number(
            FormField::Temperature,
            &self.temperature,
            TEMPERATURE_RANGE,
            &mut errors,
        );
        let latitude = check_number(FormField::Latitude, &self.latitude, LATITUDE_RANGE, &mut errors);
        let longitude = check_number(
            FormField::Longitude,
            &self.longitude,
            LONGITUDE_RANGE,
            &mut errors,
        );

        match (temperature, latitude, longitude) {
            (Some(temperature), Some(latitude), Some(longitude)) if errors.is_empty() => Ok(
                DtoStation::new(latitude, longitude, temperature, name, client_tag),
            ),
            _ => Err(errors),
        }
    }
}

fn check_number(
    field: FormField,
    raw: &str,
    (min, max): (f64, f64),
    errors: &mut FormErrors,
) -> Option<f64> {
    let value = raw.trim();
    if let Some(error) =
        validators::required(value).or_else(|| validators::numeric_in_range(value, min, max))
    {
        errors.push(field, error);
        return None;
    }
    value.parse().ok()
}
