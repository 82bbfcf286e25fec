//! Raw schedule records as delivered by the data-loading layer.

use serde::Deserialize;

use crate::domain::{CellId, RecordError, StopVisit, TripId, parse_timestamp};

/// One unvalidated row of schedule data.
///
/// Every field is optional so that a loader can hand over broken rows
/// unchanged; validation happens in [`ScheduleRecord::to_visit`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ScheduleRecord {
    #[serde(default)]
    pub h3_cell: Option<String>,
    #[serde(default)]
    pub departure_date: Option<String>,
    #[serde(default)]
    pub trip_id: Option<String>,
    #[serde(default)]
    pub transport_mode: Option<String>,
    /// Cell outline for rendering. Not used by the engine.
    #[serde(default)]
    pub h3_polygon: Option<String>,
}

impl ScheduleRecord {
    /// Convenience constructor for a complete record.
    pub fn new(cell: &str, departure: &str, trip: &str, mode: &str) -> Self {
        Self {
            h3_cell: Some(cell.to_string()),
            departure_date: Some(departure.to_string()),
            trip_id: Some(trip.to_string()),
            transport_mode: Some(mode.to_string()),
            h3_polygon: None,
        }
    }

    /// Validate this record into a [`StopVisit`].
    pub fn to_visit(&self) -> Result<StopVisit, RecordError> {
        let cell = required(&self.h3_cell, "h3_cell")?;
        let departure = required(&self.departure_date, "departure_date")?;
        let trip = required(&self.trip_id, "trip_id")?;
        let mode = required(&self.transport_mode, "transport_mode")?;

        Ok(StopVisit::new(
            TripId::parse(trip)?,
            CellId::parse(cell)?,
            parse_timestamp(departure)?,
            mode.parse()?,
        ))
    }
}

fn required<'a>(field: &'a Option<String>, name: &'static str) -> Result<&'a str, RecordError> {
    field
        .as_deref()
        .filter(|value| !value.trim().is_empty())
        .ok_or(RecordError::MissingField(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TransportMode;

    #[test]
    fn complete_record_converts() {
        let record = ScheduleRecord::new("A", "2024-11-03 09:30:00", "T1", "TRAIN");
        let visit = record.to_visit().unwrap();

        assert_eq!(visit.cell.as_str(), "A");
        assert_eq!(visit.trip.as_str(), "T1");
        assert_eq!(visit.mode, TransportMode::Train);
        assert_eq!(visit.departure.to_string(), "2024-11-03 09:30:00");
    }

    #[test]
    fn missing_cell_is_malformed() {
        let mut record = ScheduleRecord::new("A", "2024-11-03 09:30:00", "T1", "BUS");
        record.h3_cell = None;
        assert_eq!(
            record.to_visit(),
            Err(RecordError::MissingField("h3_cell"))
        );

        record.h3_cell = Some("  ".to_string());
        assert_eq!(
            record.to_visit(),
            Err(RecordError::MissingField("h3_cell"))
        );
    }

    #[test]
    fn unparseable_timestamp_is_malformed() {
        let record = ScheduleRecord::new("A", "yesterday", "T1", "BUS");
        assert!(matches!(record.to_visit(), Err(RecordError::Time(_))));
    }

    #[test]
    fn unknown_mode_is_malformed() {
        let record = ScheduleRecord::new("A", "2024-11-03 09:30:00", "T1", "FERRY");
        assert!(matches!(record.to_visit(), Err(RecordError::Mode(_))));
    }

    #[test]
    fn polygon_is_ignored() {
        let mut record = ScheduleRecord::new("A", "2024-11-03 09:30:00", "T1", "REGIONAL");
        record.h3_polygon = Some("POLYGON ((2.3 48.8, 2.4 48.8, 2.3 48.9))".to_string());
        assert!(record.to_visit().is_ok());
    }
}
