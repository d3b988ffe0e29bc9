//! Station types and the boundary parser for the proxy's positional station records.

use crate::stations::error::RecordError;
use serde_json::Value;

/// A geographical coordinate: latitude first, longitude second.
///
/// # Examples
///
/// ```
/// use airmap::LatLon;
///
/// let essen = LatLon(51.4556, 7.0116);
/// assert_eq!(essen.0, 51.4556); // Latitude
/// assert_eq!(essen.1, 7.0116); // Longitude
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLon(pub f64, pub f64);

/// A monitoring station of the target city.
///
/// Built once from the coordinate query and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    /// Station code used as lookup key (e.g. "DENW134").
    pub id: String,
    /// Human-readable station name, when the upstream record carries one.
    pub name: Option<String>,
    pub city: String,
    pub location: LatLon,
}

/// A station record with named fields, parsed from the upstream fixed-position array.
///
/// Upstream layout: `1` = code, `2` = name, `3` = city, `7` = longitude, `8` = latitude.
/// Coordinates arrive as strings (sometimes as numbers) and are parsed as `f64` here, so
/// nothing past this point depends on positions.
#[derive(Debug, Clone, PartialEq)]
pub struct StationRecord {
    pub code: String,
    pub name: Option<String>,
    pub city: String,
    pub longitude: f64,
    pub latitude: f64,
}

impl StationRecord {
    const CODE: usize = 1;
    const NAME: usize = 2;
    const CITY: usize = 3;
    const LONGITUDE: usize = 7;
    const LATITUDE: usize = 8;

    /// City field of a raw record, if present. Used to filter before full parsing.
    pub fn raw_city(raw: &Value) -> Option<&str> {
        raw.as_array()?.get(Self::CITY)?.as_str()
    }

    pub fn parse(raw: &Value) -> Result<Self, RecordError> {
        let fields = raw.as_array().ok_or(RecordError::NotAnArray)?;

        let code = required_text(fields, Self::CODE, "code")?;
        let city = required_text(fields, Self::CITY, "city")?;
        let name = fields.get(Self::NAME).and_then(value_text);
        let longitude = coordinate(fields, Self::LONGITUDE, "longitude")?;
        let latitude = coordinate(fields, Self::LATITUDE, "latitude")?;

        Ok(Self {
            code,
            name,
            city,
            longitude,
            latitude,
        })
    }

    pub fn into_station(self) -> Station {
        Station {
            id: self.code,
            name: self.name,
            city: self.city,
            location: LatLon(self.latitude, self.longitude),
        }
    }
}

/// Textual form of a scalar JSON value: strings without quotes, numbers in their shortest
/// form (`20.0` becomes `20`).
pub(crate) fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) if n.is_f64() => n.as_f64().map(|f| f.to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn required_text(
    fields: &[Value],
    index: usize,
    field: &'static str,
) -> Result<String, RecordError> {
    fields
        .get(index)
        .and_then(value_text)
        .ok_or(RecordError::MissingField { field, index })
}

fn coordinate(fields: &[Value], index: usize, field: &'static str) -> Result<f64, RecordError> {
    let text = required_text(fields, index, field)?;
    match text.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(RecordError::InvalidCoordinate { field, value: text }),
    }
}
