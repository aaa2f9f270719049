//! Event-driven parsers for the three track-data files.
//!
//! Layout shared by all three: a root element (name ignored) containing
//! record elements (names ignored) whose child elements are the fields.
//! One bad record fails the whole file; the absorbing loaders in
//! [`crate::TrackData`] then degrade it to an empty dataset.

use std::collections::HashMap;

use opentasc_telemetry::Direction;
use quick_xml::Reader;
use quick_xml::events::Event;

use crate::error::TrackDataError;
use crate::records::{GradientRecord, SpeedLimitRecord, StopOffsetRecord};

/// Field values of one record element, keyed by child-element name.
type FieldMap = HashMap<String, String>;

/// Parses `Gradient.xml` content into gradient records.
pub fn parse_gradients(raw: &str) -> Result<Vec<GradientRecord>, TrackDataError> {
    parse_records(raw, |index, fields| {
        Ok(GradientRecord {
            direction: direction_field(fields, index)?,
            station_name: field(fields, index, "StationName")?.to_string(),
            distance: number_field(fields, index, "Distance")?,
            gradient: number_field(fields, index, "Gradient")?,
        })
    })
}

/// Parses `SpeedLimit.xml` content into speed-limit records.
pub fn parse_speed_limits(raw: &str) -> Result<Vec<SpeedLimitRecord>, TrackDataError> {
    parse_records(raw, |index, fields| {
        Ok(SpeedLimitRecord {
            direction: direction_field(fields, index)?,
            start_position: number_field(fields, index, "StartPos")?,
            end_position: number_field(fields, index, "EndPos")?,
            limit: number_field(fields, index, "Limit")?,
            back_stop_position: field(fields, index, "BackStopPosName")?.to_string(),
            next_stop_position: field(fields, index, "NextStopPosName")?.to_string(),
        })
    })
}

/// Parses `StopPositionOffset.xml` content into stop-offset records.
pub fn parse_stop_offsets(raw: &str) -> Result<Vec<StopOffsetRecord>, TrackDataError> {
    parse_records(raw, |index, fields| {
        Ok(StopOffsetRecord {
            direction: direction_field(fields, index)?,
            station_name: field(fields, index, "StationName")?.to_string(),
            offsets: [
                number_field(fields, index, "Offset1")?,
                number_field(fields, index, "Offset2")?,
                number_field(fields, index, "Offset3")?,
                number_field(fields, index, "Offset4")?,
                number_field(fields, index, "Offset5")?,
                number_field(fields, index, "Offset6")?,
            ],
        })
    })
}

fn parse_records<T>(
    raw: &str,
    build: impl Fn(usize, &FieldMap) -> Result<T, TrackDataError>,
) -> Result<Vec<T>, TrackDataError> {
    let mut reader = Reader::from_str(raw);
    reader.config_mut().trim_text(true);
    let mut buf = Vec::new();

    let mut records = Vec::new();
    let mut fields = FieldMap::new();
    let mut active_field: Option<String> = None;
    let mut depth = 0usize;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(element) => {
                depth += 1;
                if depth == 2 {
                    fields.clear();
                } else if depth == 3 {
                    let name = std::str::from_utf8(element.name().as_ref())
                        .unwrap_or("")
                        .to_string();
                    active_field = Some(name);
                }
            }
            Event::Empty(_) => {
                // A self-closing record carries no fields and a self-closing
                // field carries no value; the builder reports either as a
                // missing field.
                if depth == 1 {
                    records.push(build(records.len(), &FieldMap::new())?);
                }
            }
            Event::Text(text) => {
                if depth == 3
                    && let Some(name) = active_field.as_deref()
                {
                    let value = std::str::from_utf8(text.as_ref())
                        .unwrap_or("")
                        .trim()
                        .to_string();
                    fields.insert(name.to_string(), value);
                }
            }
            Event::End(_) => {
                if depth == 3 {
                    active_field = None;
                } else if depth == 2 {
                    records.push(build(records.len(), &fields)?);
                }
                depth = depth.saturating_sub(1);
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(records)
}

fn field<'a>(
    fields: &'a FieldMap,
    index: usize,
    name: &'static str,
) -> Result<&'a str, TrackDataError> {
    fields
        .get(name)
        .map(String::as_str)
        .ok_or(TrackDataError::MissingField { index, field: name })
}

fn number_field(
    fields: &FieldMap,
    index: usize,
    name: &'static str,
) -> Result<f32, TrackDataError> {
    let value = field(fields, index, name)?;
    value.parse().map_err(|_parse_error| TrackDataError::InvalidNumber {
        index,
        field: name,
        value: value.to_string(),
    })
}

fn direction_field(fields: &FieldMap, index: usize) -> Result<Direction, TrackDataError> {
    let value = field(fields, index, "Direction")?;
    Direction::from_label(value).ok_or_else(|| TrackDataError::UnknownDirection {
        index,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    #[test]
    fn gradient_file_round_trips_fields() -> TestResult {
        let raw = r"
            <GradientData>
                <Record>
                    <Direction>上り</Direction>
                    <StationName>浜園</StationName>
                    <Distance>120.5</Distance>
                    <Gradient>-2.5</Gradient>
                </Record>
                <Record>
                    <Direction>下り</Direction>
                    <StationName>海山</StationName>
                    <Distance>40</Distance>
                    <Gradient>10</Gradient>
                </Record>
            </GradientData>";
        let records = parse_gradients(raw)?;
        assert_eq!(records.len(), 2);
        let first = records.first().ok_or("no first record")?;
        assert_eq!(first.direction, Direction::Up);
        assert_eq!(first.station_name, "浜園");
        assert!((first.distance - 120.5).abs() < 1e-6);
        assert!((first.gradient + 2.5).abs() < 1e-6);
        Ok(())
    }

    #[test]
    fn speed_limit_file_round_trips_fields() -> TestResult {
        let raw = r"
            <SpeedLimitData>
                <Record>
                    <Direction>下り</Direction>
                    <StartPos>800</StartPos>
                    <EndPos>350</EndPos>
                    <Limit>45</Limit>
                    <BackStopPosName>海山1</BackStopPosName>
                    <NextStopPosName>浜園2</NextStopPosName>
                </Record>
            </SpeedLimitData>";
        let records = parse_speed_limits(raw)?;
        let record = records.first().ok_or("no record")?;
        assert_eq!(record.direction, Direction::Down);
        assert!((record.start_position - 800.0).abs() < 1e-6);
        assert!((record.end_position - 350.0).abs() < 1e-6);
        assert!((record.limit - 45.0).abs() < 1e-6);
        assert_eq!(record.back_stop_position, "海山1");
        assert_eq!(record.next_stop_position, "浜園2");
        Ok(())
    }

    #[test]
    fn stop_offset_file_round_trips_fields() -> TestResult {
        let raw = r"
            <StopPositionOffsetData>
                <Record>
                    <Direction>上り</Direction>
                    <StationName>浜園</StationName>
                    <Offset1>0</Offset1>
                    <Offset2>1.5</Offset2>
                    <Offset3>3.0</Offset3>
                    <Offset4>4.5</Offset4>
                    <Offset5>6.0</Offset5>
                    <Offset6>7.5</Offset6>
                </Record>
            </StopPositionOffsetData>";
        let records = parse_stop_offsets(raw)?;
        let record = records.first().ok_or("no record")?;
        assert!(record.offset_for_cars(6).is_some_and(|v| (v - 7.5).abs() < 1e-6));
        Ok(())
    }

    #[test]
    fn missing_field_fails_the_file() {
        let raw = r"
            <GradientData>
                <Record>
                    <Direction>上り</Direction>
                    <StationName>浜園</StationName>
                    <Distance>120.5</Distance>
                </Record>
            </GradientData>";
        let error = parse_gradients(raw);
        assert!(matches!(
            error,
            Err(TrackDataError::MissingField { index: 0, field: "Gradient" })
        ));
    }

    #[test]
    fn unparsable_number_fails_the_file() {
        let raw = r"
            <GradientData>
                <Record>
                    <Direction>上り</Direction>
                    <StationName>浜園</StationName>
                    <Distance>abc</Distance>
                    <Gradient>1</Gradient>
                </Record>
            </GradientData>";
        assert!(matches!(
            parse_gradients(raw),
            Err(TrackDataError::InvalidNumber { field: "Distance", .. })
        ));
    }

    #[test]
    fn unknown_direction_label_fails_the_file() {
        let raw = r"
            <GradientData>
                <Record>
                    <Direction>East</Direction>
                    <StationName>浜園</StationName>
                    <Distance>10</Distance>
                    <Gradient>1</Gradient>
                </Record>
            </GradientData>";
        assert!(matches!(
            parse_gradients(raw),
            Err(TrackDataError::UnknownDirection { index: 0, .. })
        ));
    }

    #[test]
    fn broken_xml_fails_the_file() {
        let raw = "<GradientData><Record><Direction>上り</Record>";
        assert!(matches!(parse_gradients(raw), Err(TrackDataError::Xml(_))));
    }

    #[test]
    fn empty_root_yields_no_records() -> TestResult {
        let records = parse_gradients("<GradientData></GradientData>")?;
        assert!(records.is_empty());
        Ok(())
    }

    #[test]
    fn self_closing_record_counts_as_missing_fields() {
        let raw = "<GradientData><Record/></GradientData>";
        assert!(matches!(
            parse_gradients(raw),
            Err(TrackDataError::MissingField { index: 0, .. })
        ));
    }
}
