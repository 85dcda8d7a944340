//! Shared application state handed to every request handler.

use std::sync::Arc;

use crate::services::rooms::Rooms;

#[derive(Clone)]
pub struct AppState {
    pub rooms: Arc<Rooms>,
}

impl AppState {
    pub fn new(rooms: Arc<Rooms>) -> Self {
        Self { rooms }
    }
}
