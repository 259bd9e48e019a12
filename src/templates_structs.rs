use askama::Template;

use crate::flash::Flash;
use crate::views::ActivityCard;

#[derive(Template)]
#[template(path = "activities.html")]
pub struct ActivitiesTemplate {
    pub cards: Vec<ActivityCard>,
    pub flash: Option<Flash>,
    /// Set when the upstream fetch failed; the list region then shows a
    /// static failure notice instead of cards.
    pub load_failed: bool,
}
