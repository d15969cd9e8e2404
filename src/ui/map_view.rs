//! Map view orchestration
//!
//! [`MapView`] owns everything the dashboard shows: the station list, the
//! marker layer, the viewport, both forms, the notification queue and the
//! [`ViewState`]. It never performs I/O itself. User actions that need the
//! server return a [`PendingRequest`]; whoever executes it (the
//! [`crate::runtime::RequestRunner`] in the desktop app, [`MapView::dispatch`]
//! when headless) hands the outcome back through [`MapView::complete`].
//!
//! Two guards keep responses from trampling each other: only one mutating
//! request may be in flight, and a station list older than the newest list
//! requested is dropped.

use crate::constants::{MSG_INCOMPLETE_FORM, MSG_REQUEST_FAILED, MSG_REQUEST_OK};
use crate::core::{config::AppConfig, geo::Point, viewport::Viewport};
use crate::data::{
    request::{StationRequest, StationResponse},
    service::StationApi,
    station::{DtoStation, Station, StationId},
};
use crate::layers::manager::MarkerLayer;
use crate::ui::{
    form::{FormErrors, StationForm},
    notification::{NotificationIcon, NotificationQueue},
    popup::StationPopup,
    state::{FormKind, ViewState},
};
use crate::Result;

/// Identifies one issued request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ticket(u64);

/// A request the view wants executed
#[derive(Debug, Clone, PartialEq)]
pub struct PendingRequest {
    pub ticket: Ticket,
    pub request: StationRequest,
}

/// The newest station list asked for, and whether its arrival refits the map
#[derive(Debug, Clone, Copy)]
struct ListTicket {
    ticket: Ticket,
    refit: bool,
}

pub struct MapView {
    config: AppConfig,
    state: ViewState,
    stations: Vec<Station>,
    markers: MarkerLayer,
    viewport: Viewport,
    create_form: StationForm,
    update_form: StationForm,
    form_errors: Option<FormErrors>,
    notifications: NotificationQueue,
    next_ticket: u64,
    latest_list: Option<ListTicket>,
    in_flight: Option<Ticket>,
}

impl MapView {
    pub fn new(config: AppConfig) -> Self {
        let viewport = Viewport::new(
            config.view.fallback_center,
            config.view.initial_zoom,
            config.view.size,
        );
        Self {
            markers: MarkerLayer::new(config.markers.clone()),
            config,
            state: ViewState::Loading,
            stations: Vec::new(),
            viewport,
            create_form: StationForm::new(),
            update_form: StationForm::new(),
            form_errors: None,
            notifications: NotificationQueue::new(),
            next_ticket: 0,
            latest_list: None,
            in_flight: None,
        }
    }

    fn issue(&mut self, request: StationRequest) -> PendingRequest {
        let ticket = Ticket(self.next_ticket);
        self.next_ticket += 1;
        if request.is_mutation() {
            self.in_flight = Some(ticket);
        }
        log::debug!("issuing {:?} {}", ticket, request);
        PendingRequest { ticket, request }
    }

    fn issue_list(&mut self, refit: bool) -> PendingRequest {
        let pending = self.issue(StationRequest::List);
        self.latest_list = Some(ListTicket {
            ticket: pending.ticket,
            refit,
        });
        pending
    }

    /// Fetches the stations and redraws every marker once they arrive
    pub fn begin_load(&mut self) -> PendingRequest {
        self.issue_list(true)
    }

    /// Refreshes the stations without moving the map
    pub fn reload(&mut self) -> PendingRequest {
        self.issue_list(false)
    }

    /// True while a create, update or delete awaits its response
    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    // --- selection and popup ---

    /// Marker click; returns whether the selection changed
    pub fn select_station(&mut self, id: &StationId) -> bool {
        if self.station(id).is_none() {
            log::warn!("ignoring selection of unknown station {}", id);
            return false;
        }
        match self.state.select(id.clone()) {
            Some(next) => {
                if matches!(self.state, ViewState::FormOpen(FormKind::Update(_))) {
                    self.form_errors = None;
                }
                self.set_state(next);
                true
            }
            None => false,
        }
    }

    /// Click at a container pixel; selects the topmost marker there
    pub fn select_at(&mut self, pixel: Point) -> Option<StationId> {
        let id = self.markers.hit_test(&self.viewport, &pixel)?.clone();
        if self.select_station(&id) {
            Some(id)
        } else {
            None
        }
    }

    pub fn close_popup(&mut self) {
        if let ViewState::StationSelected(_) = self.state {
            self.set_state(ViewState::Idle);
        }
    }

    pub fn popup(&self) -> Option<StationPopup<'_>> {
        if !self.state.shows_popup() {
            return None;
        }
        self.selected_station()
            .map(|station| StationPopup::new(station, &self.config.markers))
    }

    // --- forms ---

    /// Opens the update form prefilled with the selected station
    pub fn open_update_form(&mut self) -> bool {
        let ViewState::StationSelected(id) = &self.state else {
            return false;
        };
        let id = id.clone();
        let Some(form) = self.station(&id).map(StationForm::from_station) else {
            return false;
        };
        self.update_form = form;
        self.form_errors = None;
        self.set_state(ViewState::FormOpen(FormKind::Update(id)));
        true
    }

    pub fn open_create_form(&mut self) -> bool {
        let selected = match &self.state {
            ViewState::Idle => None,
            ViewState::StationSelected(id) => Some(id.clone()),
            _ => return false,
        };
        self.form_errors = None;
        self.set_state(ViewState::FormOpen(FormKind::Create { selected }));
        true
    }

    pub fn cancel_form(&mut self) {
        if let Some(next) = self.state.close_form() {
            self.form_errors = None;
            self.set_state(next);
        }
    }

    pub fn submit_create(&mut self) -> Option<PendingRequest> {
        if !matches!(self.state, ViewState::FormOpen(FormKind::Create { .. })) {
            return None;
        }
        let dto = self.checked_payload(FormKind::Create { selected: None })?;
        Some(self.issue(StationRequest::Create(dto)))
    }

    pub fn submit_update(&mut self) -> Option<PendingRequest> {
        let ViewState::FormOpen(FormKind::Update(id)) = &self.state else {
            return None;
        };
        let id = id.clone();
        let dto = self.checked_payload(FormKind::Update(id.clone()))?;
        Some(self.issue(StationRequest::Update { id, dto }))
    }

    /// Validates the form of `kind`, telling the user what is wrong on failure
    fn checked_payload(&mut self, kind: FormKind) -> Option<DtoStation> {
        if self.is_busy() {
            log::info!("submit ignored, a request is still in flight");
            return None;
        }
        let form = match kind {
            FormKind::Create { .. } => &self.create_form,
            FormKind::Update(_) => &self.update_form,
        };
        match form.validate(&self.config.client_tag) {
            Ok(dto) => {
                self.form_errors = None;
                Some(dto)
            }
            Err(errors) => {
                log::debug!("form rejected: {:?}", errors);
                self.notifications.display(
                    NotificationIcon::Error,
                    format!("{}\n{}", MSG_INCOMPLETE_FORM, errors),
                );
                self.form_errors = Some(errors);
                None
            }
        }
    }

    // --- delete ---

    /// Asks for confirmation before deleting the selected station
    pub fn request_delete(&mut self) -> bool {
        let id = match &self.state {
            ViewState::StationSelected(id) | ViewState::FormOpen(FormKind::Update(id)) => id.clone(),
            _ => return false,
        };
        self.form_errors = None;
        self.set_state(ViewState::ConfirmDelete(id));
        true
    }

    pub fn cancel_delete(&mut self) {
        if let ViewState::ConfirmDelete(id) = &self.state {
            let id = id.clone();
            self.set_state(ViewState::StationSelected(id));
        }
    }

    pub fn confirm_delete(&mut self) -> Option<PendingRequest> {
        let ViewState::ConfirmDelete(id) = &self.state else {
            return None;
        };
        let id = id.clone();
        if self.is_busy() {
            log::info!("delete ignored, a request is still in flight");
            return None;
        }
        self.set_state(ViewState::StationSelected(id.clone()));
        Some(self.issue(StationRequest::Delete(id)))
    }

    // --- responses ---

    /// Applies the outcome of `pending`; may ask for a follow-up request
    pub fn complete(
        &mut self,
        pending: &PendingRequest,
        result: Result<StationResponse>,
    ) -> Option<PendingRequest> {
        if self.in_flight == Some(pending.ticket) {
            self.in_flight = None;
        }

        match (&pending.request, result) {
            (StationRequest::List, result) => {
                let Some(latest) = self.latest_list.filter(|l| l.ticket == pending.ticket) else {
                    log::debug!("dropping stale station list {:?}", pending.ticket);
                    return None;
                };
                match result {
                    Ok(StationResponse::Listed(stations)) => {
                        self.apply_station_list(stations, latest.refit)
                    }
                    Ok(other) => log::warn!("unexpected response to list: {:?}", other),
                    Err(e) => {
                        self.report_failure(&pending.request, &e);
                        if self.state.is_loading() {
                            self.set_state(ViewState::Idle);
                            self.fit_to_markers();
                        }
                    }
                }
                None
            }
            (StationRequest::Create(dto), Ok(StationResponse::Created(body))) => {
                let echoed = self.apply_created(dto, body);
                Some(self.issue_list(!echoed))
            }
            (StationRequest::Update { id, dto }, Ok(StationResponse::Updated(_))) => {
                self.apply_updated(id, dto);
                Some(self.issue_list(false))
            }
            (StationRequest::Delete(id), Ok(StationResponse::Deleted(_))) => {
                self.apply_deleted(id);
                Some(self.issue_list(false))
            }
            (request, Err(e)) => {
                self.report_failure(request, &e);
                None
            }
            (request, Ok(response)) => {
                log::warn!("response {:?} does not match request {}", response, request);
                None
            }
        }
    }

    /// Executes `pending` and every follow-up it triggers
    pub async fn dispatch(&mut self, api: &dyn StationApi, pending: PendingRequest) {
        let mut next = Some(pending);
        while let Some(pending) = next {
            let result = pending.request.execute(api).await;
            next = self.complete(&pending, result);
        }
    }

    /// Initial load without a runner
    pub async fn load(&mut self, api: &dyn StationApi) {
        let pending = self.begin_load();
        self.dispatch(api, pending).await;
    }

    fn apply_station_list(&mut self, stations: Vec<Station>, refit: bool) {
        log::debug!("applying {} stations", stations.len());
        self.stations = stations;

        let mut state = self.state.clone();
        let first_load = state.is_loading();
        if first_load {
            state = ViewState::Idle;
        }
        if let Some(selected) = state.selected().cloned() {
            if self.station(&selected).is_none() {
                state = state.forget(&selected);
            }
        }
        self.markers.rebuild(&self.stations, state.selected());
        self.state = state;

        if refit || first_load {
            self.fit_to_markers();
        }
    }

    /// Returns whether the server echoed the record, so its marker is already placed
    fn apply_created(&mut self, dto: &DtoStation, body: serde_json::Value) -> bool {
        let echoed = match serde_json::from_value::<Station>(body) {
            Ok(station) => {
                log::info!("created station {}", station.id);
                self.markers.insert(&station, false);
                self.stations.push(station);
                true
            }
            Err(_) => {
                log::info!(
                    "created {:?}; server did not echo the record, waiting for the list",
                    dto.ubication
                );
                false
            }
        };
        self.create_form.reset();
        self.form_errors = None;
        if let ViewState::FormOpen(FormKind::Create { .. }) = self.state {
            self.cancel_form();
        }
        self.fit_to_markers();
        self.notifications
            .display(NotificationIcon::Success, MSG_REQUEST_OK);
        echoed
    }

    fn apply_updated(&mut self, id: &StationId, dto: &DtoStation) {
        let selected = self.state.selected() == Some(id);
        if let Some(station) = self.stations.iter_mut().find(|s| &s.id == id) {
            station.apply(dto);
            self.markers.insert(station, selected);
        }
        if self.state == ViewState::FormOpen(FormKind::Update(id.clone())) {
            self.form_errors = None;
            self.set_state(ViewState::StationSelected(id.clone()));
        }
        self.fit_to_markers();
        self.notifications
            .display(NotificationIcon::Success, MSG_REQUEST_OK);
    }

    fn apply_deleted(&mut self, id: &StationId) {
        self.stations.retain(|s| &s.id != id);
        self.markers.remove(id);
        let next = self.state.forget(id);
        self.set_state(next);
        self.fit_to_markers();
        self.notifications
            .display(NotificationIcon::Success, MSG_REQUEST_OK);
    }

    fn report_failure(&mut self, request: &StationRequest, error: &crate::Error) {
        log::error!("{} failed: {}", request, error);
        self.notifications
            .display(NotificationIcon::Error, MSG_REQUEST_FAILED);
    }

    fn set_state(&mut self, next: ViewState) {
        if next != self.state {
            log::debug!("view state {:?} -> {:?}", self.state, next);
        }
        self.state = next;
        self.markers.set_selected(self.state.selected());
    }

    // --- viewport ---

    /// Frames every marker, or the fallback view when there are none
    pub fn fit_to_markers(&mut self) {
        match self.markers.bounds() {
            Some(bounds) => self.viewport.fit_bounds(&bounds, self.config.view.fit_padding),
            None => self
                .viewport
                .set_view(self.config.view.fallback_center, self.config.view.fallback_zoom),
        }
    }

    pub fn set_viewport_size(&mut self, size: Point) {
        self.viewport.set_size(size);
    }

    // --- accessors ---

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    pub fn station(&self, id: &StationId) -> Option<&Station> {
        self.stations.iter().find(|s| &s.id == id)
    }

    pub fn selected_station(&self) -> Option<&Station> {
        self.state.selected().and_then(|id| self.station(id))
    }

    pub fn markers(&self) -> &MarkerLayer {
        &self.markers
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    pub fn create_form(&self) -> &StationForm {
        &self.create_form
    }

    pub fn create_form_mut(&mut self) -> &mut StationForm {
        &mut self.create_form
    }

    pub fn update_form(&self) -> &StationForm {
        &self.update_form
    }

    pub fn update_form_mut(&mut self) -> &mut StationForm {
        &mut self.update_form
    }

    /// Rules broken by the last rejected submit of the open form
    pub fn form_errors(&self) -> Option<&FormErrors> {
        self.form_errors.as_ref()
    }

    pub fn notifications(&self) -> &NotificationQueue {
        &self.notifications
    }

    pub fn notifications_mut(&mut self) -> &mut NotificationQueue {
        &mut self.notifications
    }
}
