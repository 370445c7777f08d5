//! Cinema Seats entry point
//!
//! On the web, wires the page's canvas, buttons and forms to a booking
//! session. Natively, runs a short scripted booking against memory storage.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlElement, HtmlInputElement, MouseEvent};

    use cinema_seats::consts::MAX_GROUP_SIZE;
    use cinema_seats::platform::LocalStorage;
    use cinema_seats::tickets::{MemberForm, PartyForm, PartyInfo};
    use cinema_seats::{BookingError, CinemaSession, SelectionSummary, SessionObserver};

    fn page_document() -> Option<Document> {
        web_sys::window()?.document()
    }

    fn alert(message: &str) {
        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message(message);
        }
    }

    fn input_value(document: &Document, selector: &str) -> Option<String> {
        let input: HtmlInputElement = document.query_selector(selector).ok()??.dyn_into().ok()?;
        Some(input.value())
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_visible(document: &Document, id: &str, visible: bool) {
        let el = document
            .get_element_by_id(id)
            .and_then(|el| el.dyn_into::<HtmlElement>().ok());
        if let Some(el) = el {
            let _ = el.style().set_property("display", if visible { "" } else { "none" });
        }
    }

    /// Pushes session notifications into the page
    struct DomObserver;

    impl SessionObserver for DomObserver {
        fn changed(&mut self, summary: &SelectionSummary) {
            if let Some(document) = page_document() {
                set_text(&document, "selectedSeatsDisplay", &summary.seats_text());
                set_text(&document, "totalPrice", &summary.total_text);
            }
        }

        fn notify(&mut self, message: &str) {
            alert(message);
        }
    }

    /// Generated member rows, in order
    fn read_members(document: &Document) -> Vec<MemberForm> {
        let count = document
            .query_selector_all("#groupMembers .group-member")
            .map(|list| list.length())
            .unwrap_or(0);
        (1..=count)
            .map(|i| MemberForm {
                name: input_value(document, &format!("input[name=\"memberName{i}\"]")).unwrap_or_default(),
                age: input_value(document, &format!("input[name=\"memberAge{i}\"]")).unwrap_or_default(),
            })
            .collect()
    }

    /// Group form regardless of which ticket type is checked
    fn read_group_form(document: &Document) -> PartyForm {
        PartyForm::Group {
            size: input_value(document, "#groupSize").unwrap_or_default(),
            members: read_members(document),
        }
    }

    /// Read the customer/group form as typed
    fn read_party_form(document: &Document) -> PartyForm {
        let ticket_type = input_value(document, "input[name=\"ticketType\"]:checked");
        match ticket_type.as_deref() {
            Some("individual") => PartyForm::Individual {
                name: input_value(document, "#customerName").unwrap_or_default(),
                age: input_value(document, "#customerAge").unwrap_or_default(),
            },
            Some("group") => read_group_form(document),
            _ => PartyForm::Unselected,
        }
    }

    /// Session plus the canvas it draws on
    struct App {
        session: CinemaSession,
        ctx: CanvasRenderingContext2d,
    }

    impl App {
        fn redraw(&mut self) {
            self.session.render(&mut self.ctx);
        }

        /// Check the selection, then parse the form and hand the party to `action`
        fn with_party(&mut self, action: impl FnOnce(&mut CinemaSession, &PartyInfo)) {
            let Some(document) = page_document() else { return };
            if self.session.check_selection().is_err() {
                return;
            }
            match read_party_form(&document).parse() {
                Ok(party) => action(&mut self.session, &party),
                Err(e) => alert(&e.to_string()),
            }
        }

        fn reserve(&mut self) {
            self.with_party(|session, party| {
                let _ = session.reserve(party);
            });
        }

        fn purchase(&mut self) {
            self.with_party(|session, party| {
                let _ = session.purchase(party);
            });
        }

        fn confirm(&mut self) {
            let _ = self.session.confirm_purchase();
        }

        fn cancel(&mut self) {
            let _ = self.session.cancel_reservation();
        }

        fn refund(&mut self) {
            let _ = self.session.refund();
        }

        fn auto_select_individual(&mut self) {
            let Some(document) = page_document() else { return };
            let form = PartyForm::Individual {
                name: String::new(),
                age: input_value(&document, "#customerAge").unwrap_or_default(),
            };
            match form.individual_age() {
                Ok(age) => {
                    let _ = self.session.auto_select_individual(age);
                }
                Err(e) => alert(&e.to_string()),
            }
        }

        fn auto_select_group(&mut self) {
            let Some(document) = page_document() else { return };
            match read_group_form(&document).group_ages() {
                Ok(ages) => {
                    let _ = self.session.auto_select_group(&ages);
                }
                Err(e) => alert(&e.to_string()),
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Cinema Seats starting...");

        let document = page_document().expect("no document");
        let canvas: HtmlCanvasElement = document
            .get_element_by_id("seatCanvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");

        let session = CinemaSession::new(
            Box::new(LocalStorage::open()),
            canvas.width() as f32,
            canvas.height() as f32,
        )
        .with_observer(Box::new(DomObserver));

        // Show the initial summary
        let summary = session.summary();
        DomObserver.changed(&summary);

        let app = Rc::new(RefCell::new(App { session, ctx }));
        app.borrow_mut().redraw();

        setup_canvas_click(&canvas, app.clone());
        bind_button(&document, "autoSelectBtn", &app, App::auto_select_individual);
        bind_button(&document, "autoSelectGroupBtn", &app, App::auto_select_group);
        bind_button(&document, "reserveBtn", &app, App::reserve);
        bind_button(&document, "buyBtn", &app, App::purchase);
        bind_button(&document, "confirmBtn", &app, App::confirm);
        bind_button(&document, "cancelBtn", &app, App::cancel);
        bind_button(&document, "refundBtn", &app, App::refund);
        setup_hall_select(&document, app.clone());
        setup_ticket_type_toggle(&document);
        setup_add_members(&document);

        log::info!("Cinema Seats running!");
    }

    fn setup_canvas_click(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) {
        let canvas_clone = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            let rect = canvas_clone.get_bounding_client_rect();
            let x = event.client_x() as f32 - rect.left() as f32;
            let y = event.client_y() as f32 - rect.top() as f32;
            let mut app = app.borrow_mut();
            if app.session.tap(x, y, event.ctrl_key()).is_some() {
                app.redraw();
            }
        });
        let _ = canvas.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn bind_button(document: &Document, id: &str, app: &Rc<RefCell<App>>, action: fn(&mut App)) {
        let Some(btn) = document.get_element_by_id(id) else {
            log::warn!("Button #{id} not found");
            return;
        };
        let app = app.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            let mut app = app.borrow_mut();
            action(&mut app);
            app.redraw();
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_hall_select(document: &Document, app: Rc<RefCell<App>>) {
        let Some(select) = document
            .get_element_by_id("hallSize")
            .and_then(|el| el.dyn_into::<web_sys::HtmlSelectElement>().ok())
        else {
            return;
        };

        // Show the hall restored from settings
        let capacity = app.borrow().session.settings().hall.capacity();
        select.set_value(&capacity.to_string());

        let select_clone = select.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let select = &select_clone;
            let mut app = app.borrow_mut();
            match select.value().trim().parse::<u32>() {
                Ok(capacity) => {
                    if app.session.configure_capacity(capacity).is_ok() {
                        app.redraw();
                    }
                }
                Err(_) => log::warn!("Unsupported hall size: {}", select.value()),
            }
        });
        let _ = select.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_ticket_type_toggle(document: &Document) {
        fn update(document: &Document) {
            let group = input_value(document, "input[name=\"ticketType\"]:checked").as_deref() == Some("group");
            set_visible(document, "groupInfo", group);
            set_visible(document, "individualInfo", !group);
        }

        let Ok(radios) = document.query_selector_all("input[name=\"ticketType\"]") else { return };
        for i in 0..radios.length() {
            let Some(radio) = radios.item(i) else { continue };
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if let Some(document) = page_document() {
                    update(&document);
                }
            });
            let _ = radio.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        update(document);
    }

    fn setup_add_members(document: &Document) {
        let Some(btn) = document.get_element_by_id("addMemberBtn") else { return };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            let Some(document) = page_document() else { return };
            let Some(container) = document.get_element_by_id("groupMembers") else { return };

            // Existing rows must be complete before they are replaced
            let members = read_members(&document);
            if !members.is_empty() {
                let declared = input_value(&document, "#groupSize").and_then(|s| s.trim().parse::<usize>().ok());
                if declared != Some(members.len()) {
                    alert("The member count differs from the group size, finish or fix the size first.");
                    return;
                }
                if let Some(i) = members
                    .iter()
                    .position(|m| m.name.trim().is_empty() || m.age.trim().is_empty())
                {
                    alert(&BookingError::MemberIncomplete(i + 1).to_string());
                    return;
                }
            }

            let size = input_value(&document, "#groupSize")
                .and_then(|s| s.trim().parse::<usize>().ok())
                .filter(|n| (1..=MAX_GROUP_SIZE).contains(n));
            let Some(size) = size else {
                container.set_inner_html(&format!(
                    "<p style=\"color:red;\">Please enter a group size between 1 and {MAX_GROUP_SIZE}</p>"
                ));
                return;
            };

            let rows: String = (1..=size)
                .map(|i| {
                    format!(
                        "<div class=\"group-member\" style=\"margin-bottom:8px;\">\
                         <input type=\"text\" name=\"memberName{i}\" placeholder=\"Member {i} name\" required style=\"margin-right:6px;\">\
                         <input type=\"number\" name=\"memberAge{i}\" placeholder=\"Age\" min=\"1\" max=\"120\" required>\
                         </div>"
                    )
                })
                .collect();
            container.set_inner_html(&rows);
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_app::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use cinema_seats::persistence::MemoryStore;
    use cinema_seats::renderer::CommandBuffer;
    use cinema_seats::tickets::PartyInfo;
    use cinema_seats::{CinemaSession, HallSize, SessionObserver};

    struct LogObserver;

    impl SessionObserver for LogObserver {
        fn notify(&mut self, message: &str) {
            println!("{message}");
        }
    }

    env_logger::init();
    log::info!("Cinema Seats (native) starting...");
    log::info!("The seat map UI is web only, build for wasm32 to use it");

    let mut session = CinemaSession::new(Box::new(MemoryStore::new()), 1000.0, 700.0)
        .with_observer(Box::new(LogObserver));

    // Optional hall name or seat count, e.g. `cinema-seats large`
    if let Some(arg) = std::env::args().nth(1) {
        match HallSize::from_str(&arg) {
            Some(hall) => session.configure(hall),
            None => log::warn!("Unknown hall size {arg:?}, keeping {}", session.settings().hall.as_str()),
        }
    }

    let family = PartyInfo::group([("Ann", 41), ("Ben", 9), ("Cal", 68)]);
    if session.auto_select_group(&[41, 9, 68]).is_ok() {
        println!("Picked: {}", session.summary().seats_text());
        let _ = session.reserve(&family);
    }

    let mut frame = CommandBuffer::new();
    session.render(&mut frame);
    println!("Rendered {} draw commands", frame.len());
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
