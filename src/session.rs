//! Cinema booking session
//!
//! Owns the layout, seat store, reservation log and storage. Components
//! receive explicit references from here; nothing is global. After every
//! state change the session tells its observer, and every user-facing
//! outcome (success or rejection) goes through the same observer.

use glam::Vec2;

use crate::error::{BookingError, Result};
use crate::layout::LayoutConfig;
use crate::persistence::{
    KeyValueStore, clear_seat_data, load_occupied, load_reservations, save_occupied,
    save_reservations,
};
use crate::platform::now_ms;
use crate::renderer::{self, DrawingSurface};
use crate::seats::{SeatId, SeatState, SeatStore};
use crate::selection::SeatPicker;
use crate::settings::{HallSize, Settings};
use crate::tickets::{PartyInfo, Receipt, ReservationLog, TicketDesk};

/// Snapshot of the current selection for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionSummary {
    /// Selected seats, row-major
    pub seats: Vec<SeatId>,
    pub total_price: u32,
    /// Formatted total, e.g. `¥90`
    pub total_text: String,
}

impl SelectionSummary {
    /// `Row 1 Seat 2, Row 1 Seat 3` or `None`
    pub fn seats_text(&self) -> String {
        if self.seats.is_empty() {
            return "None".to_string();
        }
        self.seats
            .iter()
            .map(SeatId::label)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Receives session notifications
///
/// Both methods default to no-ops so hosts implement only what they show.
pub trait SessionObserver {
    /// Seat states or the selection changed
    fn changed(&mut self, _summary: &SelectionSummary) {}
    /// A message for the user (success notice or rejection reason)
    fn notify(&mut self, _message: &str) {}
}

/// Single-user booking session
pub struct CinemaSession {
    settings: Settings,
    layout: LayoutConfig,
    seats: SeatStore,
    picker: SeatPicker,
    reservations: ReservationLog,
    storage: Box<dyn KeyValueStore>,
    observer: Option<Box<dyn SessionObserver>>,
}

impl CinemaSession {
    /// Open a session on a canvas of the given size, restoring saved data
    pub fn new(storage: Box<dyn KeyValueStore>, canvas_width: f32, canvas_height: f32) -> Self {
        let settings = Settings::load(storage.as_ref());
        let layout = LayoutConfig::for_hall(settings.hall, canvas_width, canvas_height);
        Self::open(storage, settings, layout)
    }

    /// Open a session with a custom layout
    pub fn with_layout(storage: Box<dyn KeyValueStore>, layout: LayoutConfig) -> Result<Self> {
        layout.validate()?;
        let settings = Settings::load(storage.as_ref());
        Ok(Self::open(storage, settings, layout))
    }

    fn open(storage: Box<dyn KeyValueStore>, settings: Settings, layout: LayoutConfig) -> Self {
        let seats = SeatStore::new(&layout);
        let reservations = ReservationLog::from_records(load_reservations(storage.as_ref()));
        let mut session = Self {
            settings,
            layout,
            seats,
            picker: SeatPicker::new(),
            reservations,
            storage,
            observer: None,
        };
        session.restore();
        log::info!(
            "Session ready: {} hall, {} seats",
            session.settings.hall.as_str(),
            session.layout.capacity()
        );
        session
    }

    /// Attach the observer
    pub fn with_observer(mut self, observer: Box<dyn SessionObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    pub fn seats(&self) -> &SeatStore {
        &self.seats
    }

    pub fn reservations(&self) -> &ReservationLog {
        &self.reservations
    }

    pub fn storage(&self) -> &dyn KeyValueStore {
        self.storage.as_ref()
    }

    /// Reapply persisted sold seats and open reservations
    fn restore(&mut self) {
        let mut sold = 0;
        for id in load_occupied(self.storage.as_ref()) {
            if !self.layout.contains(id) {
                log::warn!("Skipping sold seat {id} outside the {} hall", self.settings.hall.as_str());
                continue;
            }
            if self.seats.transition(id, &[SeatState::Available], SeatState::Occupied) {
                sold += 1;
            }
        }
        let mut held = 0;
        for id in self.reservations.reserved_seats() {
            if self.seats.transition(id, &[SeatState::Available], SeatState::Reserved) {
                held += 1;
            }
        }
        if sold + held > 0 {
            log::info!("Restored {sold} sold and {held} reserved seat(s)");
        }
    }

    fn persist(&mut self) {
        let occupied = self.seats.ids_in(SeatState::Occupied);
        save_occupied(self.storage.as_mut(), &occupied);
        save_reservations(self.storage.as_mut(), self.reservations.records());
    }

    /// Current selection with its total price
    pub fn summary(&self) -> SelectionSummary {
        let seats = self.seats.selection().sorted();
        let total_price = seats.len() as u32 * self.settings.ticket_price;
        SelectionSummary {
            total_text: self.settings.format_price(total_price),
            seats,
            total_price,
        }
    }

    fn emit_changed(&mut self) {
        let summary = self.summary();
        if let Some(observer) = self.observer.as_mut() {
            observer.changed(&summary);
        }
    }

    fn notify(&mut self, message: &str) {
        if let Some(observer) = self.observer.as_mut() {
            observer.notify(message);
        }
    }

    fn reject(&mut self, err: &BookingError) {
        log::warn!("Rejected: {err}");
        self.notify(&err.to_string());
    }

    /// Report a selection change or its failure
    fn selected<T>(&mut self, result: Result<T>) -> Result<T> {
        match &result {
            Ok(_) => self.emit_changed(),
            Err(e) => self.reject(e),
        }
        result
    }

    /// Persist and report a lifecycle operation or its failure
    fn committed(&mut self, result: Result<Receipt>) -> Result<Receipt> {
        match &result {
            Ok(receipt) => {
                self.persist();
                let message = receipt.message(&self.settings);
                self.notify(&message);
                self.emit_changed();
            }
            Err(e) => self.reject(e),
        }
        result
    }

    fn desk(&self) -> TicketDesk {
        TicketDesk::new(self.settings.ticket_price)
    }

    /// Draw the seat map
    pub fn render(&self, surface: &mut dyn DrawingSurface) {
        renderer::render(surface, &self.layout, &self.seats);
    }

    /// Pointer tap in drawing-surface coordinates
    pub fn tap(&mut self, x: f32, y: f32, multi: bool) -> Option<SeatId> {
        let hit = self
            .picker
            .tap(&self.layout, &mut self.seats, Vec2::new(x, y), multi);
        if hit.is_some() {
            self.emit_changed();
        }
        hit
    }

    pub fn clear_selection(&mut self) {
        self.seats.clear_selection();
        self.emit_changed();
    }

    /// Auto-select one seat suited to `age`
    pub fn auto_select_individual(&mut self, age: u32) -> Result<SeatId> {
        let result = self
            .picker
            .auto_select_individual(&self.layout, &mut self.seats, age);
        self.selected(result)
    }

    /// Auto-select a contiguous block suited to every age in `ages`
    pub fn auto_select_group(&mut self, ages: &[u32]) -> Result<Vec<SeatId>> {
        let result = self
            .picker
            .auto_select_group(&self.layout, &mut self.seats, ages);
        self.selected(result)
    }

    /// Check the selection can be booked before party details are read
    pub fn check_selection(&mut self) -> Result<()> {
        let result = TicketDesk::check_selection(&self.seats).map(|_| ());
        if let Err(e) = &result {
            self.reject(e);
        }
        result
    }

    /// Reserve the selected seats
    pub fn reserve(&mut self, party: &PartyInfo) -> Result<Receipt> {
        let result = self
            .desk()
            .reserve(&mut self.seats, &mut self.reservations, party, now_ms());
        self.committed(result)
    }

    /// Buy the selected seats directly
    pub fn purchase(&mut self, party: &PartyInfo) -> Result<Receipt> {
        let result = self
            .desk()
            .purchase(&mut self.seats, &mut self.reservations, party, now_ms());
        self.committed(result)
    }

    /// Turn the selected reservations into purchases
    pub fn confirm_purchase(&mut self) -> Result<Receipt> {
        let result = self
            .desk()
            .confirm_purchase(&mut self.seats, &mut self.reservations, now_ms());
        self.committed(result)
    }

    /// Cancel the selected reservations
    pub fn cancel_reservation(&mut self) -> Result<Receipt> {
        let result = self
            .desk()
            .cancel_reservation(&mut self.seats, &mut self.reservations);
        self.committed(result)
    }

    /// Refund the selected sold seats
    pub fn refund(&mut self) -> Result<Receipt> {
        let result = self.desk().refund(&mut self.seats, &mut self.reservations);
        self.committed(result)
    }

    /// Switch to another hall preset
    ///
    /// Resets every seat and the selection and drops persisted seat data.
    pub fn configure(&mut self, hall: HallSize) {
        self.settings.hall = hall;
        self.settings.save(self.storage.as_mut());

        self.layout = LayoutConfig::for_hall(hall, self.layout.canvas_width, self.layout.canvas_height);
        self.seats.initialize(&self.layout);
        self.picker.reset();
        self.reservations.clear();
        clear_seat_data(self.storage.as_mut());

        log::info!("Configured {} hall ({} seats)", hall.as_str(), self.layout.capacity());
        self.emit_changed();
    }

    /// Switch hall by seat count; unknown counts leave everything untouched
    pub fn configure_capacity(&mut self, capacity: u32) -> Result<HallSize> {
        match HallSize::from_capacity(capacity) {
            Some(hall) => {
                self.configure(hall);
                Ok(hall)
            }
            None => {
                let err = BookingError::UnsupportedHall(capacity);
                self.reject(&err);
                Err(err)
            }
        }
    }
}
