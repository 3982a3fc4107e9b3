use boxoffice_hold::TicketService;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub tickets: Arc<TicketService>,
}

impl AppState {
    pub fn new(tickets: Arc<TicketService>) -> Self {
        Self { tickets }
    }
}
