//! Per-record transform of congressional-district feature records.
//!
//! Reads newline-delimited GeoJSON features, rewrites each feature's
//! properties from its district identifier, drops invalid districts, derives
//! display titles, and writes one encoded feature per output line. The
//! pipeline is a chain of pure per-record functions; there is no cross-record
//! state and input order is preserved. Geometry and all non-property members
//! pass through untouched.

pub mod states;

use std::io::{BufRead, Write};

use serde_json::{Map, Value};

use crate::error::TransformError;

/// Identifier layout: three characters of state code, then the first/last
/// congress fields, then two characters of district number.
const STATE_CODE_RANGE: std::ops::Range<usize> = 0..3;
const DISTRICT_RANGE: std::ops::Range<usize> = 10..12;

/// Rewrite one feature for the given congress.
///
/// Returns `Ok(None)` for records the pipeline drops (negative district).
///
/// The identifier embeds the number of the first congress that had the
/// district, which is not necessarily the congress currently of interest, so
/// the congress number is taken from the caller instead.
pub fn transform_feature(
    mut feature: Value,
    congress: i32,
    line: usize,
) -> Result<Option<Value>, TransformError> {
    let district = remap_properties(&mut feature, congress, line)?;
    // Negative districts mark unorganized territories and similar non-seats.
    if district < 0 {
        return Ok(None);
    }
    add_titles(&mut feature, line)?;
    Ok(Some(feature))
}

/// Replace the feature's properties with the publishing schema.
///
/// Returns the derived district number so the caller can filter on it.
fn remap_properties(
    feature: &mut Value,
    congress: i32,
    line: usize,
) -> Result<i32, TransformError> {
    let id = feature
        .get("properties")
        .and_then(|p| p.get("ID"))
        .and_then(Value::as_str)
        .ok_or(TransformError::MissingId(line))?
        .to_string();

    let state_code = parse_segment(&id, STATE_CODE_RANGE, "state code")?;
    let district = parse_segment(&id, DISTRICT_RANGE, "district number")?;

    let state =
        states::usps_abbreviation(state_code).ok_or(TransformError::UnknownState(state_code))?;

    let mut properties = Map::new();
    properties.insert("id".to_string(), Value::String(id));
    properties.insert("district".to_string(), Value::from(district));
    properties.insert("congress".to_string(), Value::from(congress));
    properties.insert("stateFips".to_string(), Value::from(state_code));
    properties.insert("state".to_string(), Value::String(state.to_string()));
    properties.insert("group".to_string(), Value::String("boundary".to_string()));
    properties.insert("type".to_string(), Value::String("district".to_string()));
    *properties_mut(feature, line)? = properties;
    Ok(district)
}

/// Derive `titleShort`/`titleLong` from the remapped properties.
fn add_titles(feature: &mut Value, line: usize) -> Result<(), TransformError> {
    let properties = properties_mut(feature, line)?;
    let district = properties
        .get("district")
        .and_then(Value::as_i64)
        .unwrap_or(0);
    let state = properties
        .get("state")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    let number = if district == 0 {
        "At Large".to_string()
    } else {
        district.to_string()
    };
    let title = format!("{} {}", state, number);

    properties.insert("titleShort".to_string(), Value::String(title.clone()));
    properties.insert("titleLong".to_string(), Value::String(title));
    Ok(())
}

/// Mutable access to the properties object of a feature record.
fn properties_mut(feature: &mut Value, line: usize) -> Result<&mut Map<String, Value>, TransformError> {
    feature
        .get_mut("properties")
        .and_then(Value::as_object_mut)
        .ok_or(TransformError::InvalidRecord {
            line,
            reason: "no properties object".to_string(),
        })
}

/// Parse a fixed character range of the identifier as an integer.
fn parse_segment(
    id: &str,
    range: std::ops::Range<usize>,
    what: &str,
) -> Result<i32, TransformError> {
    let segment = id.get(range).ok_or_else(|| TransformError::MalformedId {
        id: id.to_string(),
        reason: format!("too short for {}", what),
    })?;
    segment
        .trim()
        .parse::<i32>()
        .map_err(|e| TransformError::MalformedId {
            id: id.to_string(),
            reason: format!("{}: {}", what, e),
        })
}

/// Run the full pipeline from an input stream to an output stream.
///
/// Returns the number of records written.
pub fn run<R: BufRead, W: Write>(
    input: R,
    output: &mut W,
    congress: i32,
) -> Result<usize, TransformError> {
    let mut written = 0;
    for (index, line) in input.lines().enumerate() {
        let line_number = index + 1;
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let feature: Value =
            serde_json::from_str(&line).map_err(|e| TransformError::InvalidRecord {
                line: line_number,
                reason: e.to_string(),
            })?;
        if let Some(feature) = transform_feature(feature, congress, line_number)? {
            serde_json::to_writer(&mut *output, &feature)
                .map_err(|e| TransformError::Io(std::io::Error::other(e)))?;
            output.write_all(b"\n")?;
            written += 1;
        }
    }
    output.flush()?;
    Ok(written)
}

// =============================================================================
// Tests
// =============================================================================
