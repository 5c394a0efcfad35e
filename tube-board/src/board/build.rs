//! Arrivals → board transform.
//!
//! Pure functions, no I/O. The poller calls [`build_board`] once per cycle
//! with whatever the API returned.

use std::collections::HashMap;

use crate::domain::Arrival;

use super::lines::line_colour;
use super::{BoardView, DepartureRow, PlatformGroup};

/// Build the board view from a raw arrivals list.
///
/// 1. Drop arrivals without a destination.
/// 2. Stable sort by seconds to station.
/// 3. Group by platform label, in order of first appearance.
/// 4. Stable sort groups by the first number in the platform label.
/// 5. Keep the first `max_rows` departures of each group.
pub fn build_board(arrivals: Vec<Arrival>, max_rows: usize) -> BoardView {
    let mut arrivals: Vec<Arrival> = arrivals
        .into_iter()
        .filter(|a| a.destination_name.is_some())
        .collect();

    arrivals.sort_by_key(|a| a.time_to_station);

    if arrivals.is_empty() {
        return BoardView::NoDepartures;
    }

    let mut groups = group_by_platform(arrivals);
    groups.sort_by_key(|(platform, _)| platform_rank(platform));

    let platforms = groups
        .into_iter()
        .map(|(platform, arrivals)| PlatformGroup {
            platform,
            rows: arrivals
                .into_iter()
                .take(max_rows)
                .filter_map(departure_row)
                .collect(),
        })
        .collect();

    BoardView::Departures { platforms }
}

/// Group arrivals by platform label, preserving first-appearance order of
/// platforms and input order within each platform.
pub fn group_by_platform(arrivals: Vec<Arrival>) -> Vec<(String, Vec<Arrival>)> {
    let mut groups: Vec<(String, Vec<Arrival>)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for arrival in arrivals {
        let label = arrival.platform_label().to_string();
        match index.get(&label) {
            Some(&i) => groups[i].1.push(arrival),
            None => {
                index.insert(label.clone(), groups.len());
                groups.push((label, vec![arrival]));
            }
        }
    }

    groups
}

/// Sort key for a platform label: the first run of ASCII digits, read as
/// an integer. Labels without digits rank as 0.
///
/// ```
/// use tube_board::board::platform_rank;
///
/// assert_eq!(platform_rank("Westbound - Platform 12"), 12);
/// assert_eq!(platform_rank("Platform 3a"), 3);
/// assert_eq!(platform_rank("Unknown Platform"), 0);
/// ```
pub fn platform_rank(label: &str) -> u64 {
    let digits: String = label
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();

    if digits.is_empty() {
        return 0;
    }

    // Only overflow can fail here; such labels sort last.
    digits.parse().unwrap_or(u64::MAX)
}

fn departure_row(arrival: Arrival) -> Option<DepartureRow> {
    let minutes = arrival.minutes();
    Some(DepartureRow {
        line_colour: line_colour(&arrival.line_name),
        line: arrival.line_name,
        destination: arrival.destination_name?,
        minutes,
    })
}
