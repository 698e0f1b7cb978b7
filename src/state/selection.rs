//! Focused-airport selection and route highlighting.

use crate::data::Route;

/// At most one focused airport.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Selection {
    #[default]
    Unselected,
    Selected(String),
}

impl Selection {
    /// Applies a click on `airport_id`: selects it, switches to it directly
    /// from another selection, or clears it if it is already selected.
    pub fn click(&mut self, airport_id: &str) {
        *self = match &*self {
            Selection::Selected(current) if current == airport_id => Selection::Unselected,
            _ => Selection::Selected(airport_id.to_string()),
        };
    }

    pub fn clear(&mut self) {
        *self = Selection::Unselected;
    }

    pub fn selected(&self) -> Option<&str> {
        match self {
            Selection::Unselected => None,
            Selection::Selected(id) => Some(id),
        }
    }

    pub fn is_selected(&self, airport_id: &str) -> bool {
        self.selected() == Some(airport_id)
    }

    /// A route is highlighted when one of its endpoints is selected.
    pub fn highlights(&self, route: &Route) -> bool {
        self.selected().is_some_and(|id| route.touches(id))
    }

    /// Highlight flag for each route, aligned with `routes`.
    pub fn highlight_flags(&self, routes: &[Route]) -> Vec<bool> {
        routes.iter().map(|r| self.highlights(r)).collect()
    }
}
