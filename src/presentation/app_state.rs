// Application state for HTTP handlers
use crate::application::character_service::CharacterService;
use crate::application::dashboard_service::DashboardService;

#[derive(Clone)]
pub struct AppState {
    pub character_service: CharacterService,
    pub dashboard_service: DashboardService,
}
