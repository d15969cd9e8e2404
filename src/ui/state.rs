//! The map view's interaction state
//!
//! One enum replaces the scattered visibility flags of a typical web view:
//! exactly one of these situations holds at any time and the host derives
//! what to draw (popup, form, confirmation) from it.

use crate::data::station::StationId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormKind {
    /// Creating a station; remembers the selection to return to
    Create { selected: Option<StationId> },
    /// Editing the given station
    Update(StationId),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ViewState {
    /// Waiting for the first station list
    #[default]
    Loading,
    Idle,
    /// A marker was clicked; its popup is visible
    StationSelected(StationId),
    FormOpen(FormKind),
    /// Waiting for the user to confirm deleting the station
    ConfirmDelete(StationId),
}

impl ViewState {
    /// The station whose marker is highlighted, if any
    pub fn selected(&self) -> Option<&StationId> {
        match self {
            ViewState::StationSelected(id)
            | ViewState::ConfirmDelete(id)
            | ViewState::FormOpen(FormKind::Update(id)) => Some(id),
            ViewState::FormOpen(FormKind::Create { selected }) => selected.as_ref(),
            ViewState::Loading | ViewState::Idle => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }

    /// Whether the popup for the selected station is visible
    pub fn shows_popup(&self) -> bool {
        matches!(
            self,
            ViewState::StationSelected(_) | ViewState::ConfirmDelete(_)
        )
    }

    pub fn form(&self) -> Option<&FormKind> {
        match self {
            ViewState::FormOpen(kind) => Some(kind),
            _ => None,
        }
    }

    /// State after a marker click, `None` when clicks are ignored
    pub fn select(&self, id: StationId) -> Option<ViewState> {
        match self {
            ViewState::Loading | ViewState::ConfirmDelete(_) => None,
            ViewState::FormOpen(FormKind::Create { .. }) => {
                Some(ViewState::FormOpen(FormKind::Create { selected: Some(id) }))
            }
            ViewState::Idle | ViewState::StationSelected(_) | ViewState::FormOpen(_) => {
                Some(ViewState::StationSelected(id))
            }
        }
    }

    /// State after the form closes, by cancel or by a successful submit
    pub fn close_form(&self) -> Option<ViewState> {
        match self {
            ViewState::FormOpen(FormKind::Update(id)) => Some(ViewState::StationSelected(id.clone())),
            ViewState::FormOpen(FormKind::Create { selected }) => Some(
                selected
                    .clone()
                    .map_or(ViewState::Idle, ViewState::StationSelected),
            ),
            _ => None,
        }
    }

    /// Drops references to a station that no longer exists
    pub fn forget(&self, gone: &StationId) -> ViewState {
        match self {
            ViewState::FormOpen(FormKind::Create { selected }) if selected.as_ref() == Some(gone) => {
                ViewState::FormOpen(FormKind::Create { selected: None })
            }
            state if state.selected() == Some(gone) => ViewState::Idle,
            state => state.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> StationId {
        StationId::new(s)
    }

    #[test]
    fn test_selected() {
        assert_eq!(ViewState::Loading.selected(), None);
        assert_eq!(ViewState::Idle.selected(), None);
        assert_eq!(ViewState::StationSelected(id("a")).selected(), Some(&id("a")));
        assert_eq!(
            ViewState::FormOpen(FormKind::Update(id("b"))).selected(),
            Some(&id("b"))
        );
        assert_eq!(
            ViewState::FormOpen(FormKind::Create { selected: None }).selected(),
            None
        );
        assert!(ViewState::ConfirmDelete(id("c")).shows_popup());
        assert!(!ViewState::FormOpen(FormKind::Update(id("c"))).shows_popup());
    }

    #[test]
    fn test_select_transitions() {
        assert_eq!(ViewState::Loading.select(id("a")), None);
        assert_eq!(ViewState::ConfirmDelete(id("a")).select(id("b")), None);
        assert_eq!(
            ViewState::Idle.select(id("a")),
            Some(ViewState::StationSelected(id("a")))
        );
        assert_eq!(
            ViewState::FormOpen(FormKind::Update(id("a"))).select(id("b")),
            Some(ViewState::StationSelected(id("b")))
        );
        assert_eq!(
            ViewState::FormOpen(FormKind::Create { selected: None }).select(id("b")),
            Some(ViewState::FormOpen(FormKind::Create {
                selected: Some(id("b"))
            }))
        );
    }

    #[test]
    fn test_close_form_returns_to_selection() {
        assert_eq!(
            ViewState::FormOpen(FormKind::Update(id("a"))).close_form(),
            Some(ViewState::StationSelected(id("a")))
        );
        assert_eq!(
            ViewState::FormOpen(FormKind::Create { selected: None }).close_form(),
            Some(ViewState::Idle)
        );
        assert_eq!(ViewState::Idle.close_form(), None);
    }

    #[test]
    fn test_forget() {
        assert_eq!(ViewState::StationSelected(id("a")).forget(&id("a")), ViewState::Idle);
        assert_eq!(
            ViewState::StationSelected(id("a")).forget(&id("b")),
            ViewState::StationSelected(id("a"))
        );
        assert_eq!(
            ViewState::FormOpen(FormKind::Create {
                selected: Some(id("a"))
            })
            .forget(&id("a")),
            ViewState::FormOpen(FormKind::Create { selected: None })
        );
        assert_eq!(
            ViewState::FormOpen(FormKind::Update(id("a"))).forget(&id("a")),
            ViewState::Idle
        );
    }
}
