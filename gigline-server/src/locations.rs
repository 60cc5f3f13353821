//! Venue grouping by location
//!
//! The store leaves group order unspecified, so the grouping fixes a
//! deterministic one: groups ascend by (state, city), venues keep their
//! id order within a group.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::VenueSummary;

#[derive(Debug, Serialize)]
pub struct LocationGroup {
    pub city: String,
    pub state: String,
    pub venues: Vec<LocationVenue>,
}

#[derive(Debug, Serialize)]
pub struct LocationVenue {
    pub id: i64,
    pub name: String,
    pub num_upcoming_shows: i64,
}

pub fn group_by_location(venues: Vec<VenueSummary>) -> Vec<LocationGroup> {
    let mut groups: BTreeMap<(String, String), Vec<LocationVenue>> = BTreeMap::new();

    for venue in venues {
        groups
            .entry((venue.state, venue.city))
            .or_default()
            .push(LocationVenue {
                id: venue.id,
                name: venue.name,
                num_upcoming_shows: venue.num_upcoming_shows,
            });
    }

    groups
        .into_iter()
        .map(|((state, city), venues)| LocationGroup {
            city,
            state,
            venues,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(id: i64, name: &str, city: &str, state: &str) -> VenueSummary {
        VenueSummary {
            id,
            name: name.to_string(),
            city: city.to_string(),
            state: state.to_string(),
            num_upcoming_shows: 0,
        }
    }

    #[test]
    fn venues_group_by_city_state_pair() {
        let groups = group_by_location(vec![
            summary(1, "The Musical Hop", "San Francisco", "CA"),
            summary(2, "The Dueling Pianos Bar", "New York", "NY"),
            summary(3, "Park Square Live Music & Coffee", "San Francisco", "CA"),
        ]);

        assert_eq!(groups.len(), 2);

        // CA sorts before NY.
        assert_eq!(groups[0].state, "CA");
        assert_eq!(groups[0].city, "San Francisco");
        let names: Vec<&str> = groups[0].venues.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["The Musical Hop", "Park Square Live Music & Coffee"]
        );

        assert_eq!(groups[1].state, "NY");
        assert_eq!(groups[1].venues.len(), 1);
    }

    #[test]
    fn same_city_name_in_two_states_stays_separate() {
        let groups = group_by_location(vec![
            summary(1, "Hall A", "Springfield", "IL"),
            summary(2, "Hall B", "Springfield", "MA"),
        ]);

        assert_eq!(groups.len(), 2);
    }

    #[test]
    fn no_venues_means_no_groups() {
        assert!(group_by_location(Vec::new()).is_empty());
    }
}
