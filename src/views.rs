//! Pure catalog-to-view transformation. The handler passes the freshly
//! fetched catalog in; nothing here touches the network or the session.

use crate::api::ActivityCatalog;

pub struct ActivityCard {
    pub name: String,
    pub description: String,
    pub schedule: String,
    /// `max_participants - participants.len()`, not clamped — goes
    /// negative when the upstream overbooks.
    pub spots_left: i64,
    pub participants: Vec<String>,
}

pub fn build_cards(catalog: &ActivityCatalog) -> Vec<ActivityCard> {
    catalog
        .iter()
        .map(|(name, activity)| ActivityCard {
            name: name.clone(),
            description: activity.description.clone(),
            schedule: activity.schedule.clone(),
            spots_left: activity.max_participants - activity.participants.len() as i64,
            participants: activity.participants.clone(),
        })
        .collect()
}
