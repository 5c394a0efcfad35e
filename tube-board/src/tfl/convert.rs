//! Conversion from TfL DTOs to domain types.

use tracing::warn;

use crate::domain::{Arrival, Stop, StopId};

use super::types::{ArrivalPrediction, StopPoint};

/// Convert raw stop records to domain stops.
///
/// Records with an unusable id are skipped with a warning rather than
/// failing the whole directory. Filtering by stop type and name happens in
/// the directory loader, so `stop_type` is returned alongside each stop.
pub fn convert_stop_points(points: &[StopPoint]) -> Vec<(Stop, Option<String>)> {
    points
        .iter()
        .filter_map(|p| match StopId::parse(&p.id) {
            Ok(id) => {
                let name = p.common_name.clone().unwrap_or_default();
                Some((Stop::new(id, name, p.modes.clone()), p.stop_type.clone()))
            }
            Err(e) => {
                warn!(id = %p.id, error = %e, "skipping stop point");
                None
            }
        })
        .collect()
}

/// Convert arrival predictions to domain arrivals.
///
/// Predictions without a time are dropped. Negative times are clamped to
/// zero. Empty destination strings count as missing.
pub fn convert_arrivals(predictions: Vec<ArrivalPrediction>) -> Vec<Arrival> {
    predictions
        .into_iter()
        .filter_map(|p| {
            let Some(secs) = p.time_to_station else {
                warn!(id = ?p.id, "skipping prediction without timeToStation");
                return None;
            };

            Some(Arrival {
                line_name: p.line_name.unwrap_or_default(),
                destination_name: p.destination_name.filter(|d| !d.is_empty()),
                time_to_station: secs.clamp(0, u32::MAX as i64) as u32,
                platform_name: p.platform_name,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prediction(line: Option<&str>, dest: Option<&str>, secs: Option<i64>) -> ArrivalPrediction {
        ArrivalPrediction {
            id: None,
            line_name: line.map(String::from),
            line_id: None,
            destination_name: dest.map(String::from),
            time_to_station: secs,
            platform_name: Some("Eastbound - Platform 1".into()),
            towards: None,
        }
    }

    #[test]
    fn arrivals_keep_order_and_fields() {
        let arrivals = convert_arrivals(vec![
            prediction(Some("Central"), Some("Epping"), Some(40)),
            prediction(Some("Central"), Some("Hainault"), Some(10)),
        ]);

        assert_eq!(arrivals.len(), 2);
        assert_eq!(arrivals[0].destination_name.as_deref(), Some("Epping"));
        assert_eq!(arrivals[0].time_to_station, 40);
        assert_eq!(
            arrivals[1].platform_name.as_deref(),
            Some("Eastbound - Platform 1")
        );
    }

    #[test]
    fn negative_time_clamped() {
        let arrivals = convert_arrivals(vec![prediction(Some("Central"), Some("Epping"), Some(-5))]);
        assert_eq!(arrivals[0].time_to_station, 0);
    }

    #[test]
    fn missing_time_dropped() {
        let arrivals = convert_arrivals(vec![prediction(Some("Central"), Some("Epping"), None)]);
        assert!(arrivals.is_empty());
    }

    #[test]
    fn empty_destination_is_missing() {
        let arrivals = convert_arrivals(vec![prediction(None, Some(""), Some(10))]);
        assert_eq!(arrivals[0].destination_name, None);
        assert_eq!(arrivals[0].line_name, "");
    }

    #[test]
    fn bad_stop_ids_skipped() {
        let points = vec![
            StopPoint {
                id: "940GZZLUOXC".into(),
                naptan_id: None,
                common_name: Some("Oxford Circus Underground Station".into()),
                modes: vec!["tube".into()],
                stop_type: Some("NaptanMetroStation".into()),
            },
            StopPoint {
                id: "bad id".into(),
                naptan_id: None,
                common_name: Some("Broken".into()),
                modes: vec![],
                stop_type: None,
            },
        ];

        let stops = convert_stop_points(&points);
        assert_eq!(stops.len(), 1);
        assert_eq!(stops[0].0.id.as_str(), "940GZZLUOXC");
        assert_eq!(stops[0].1.as_deref(), Some("NaptanMetroStation"));
    }
}
