#[derive(Clone)]
pub struct RatingSettings {
    pub k_factor: f64,
    pub default_rating: i32,
    pub rating_floor: i32,
}

impl Default for RatingSettings {
    fn default() -> Self {
        Self {
            k_factor: 32.0,
            default_rating: 1200,
            rating_floor: 0,
        }
    }
}

#[derive(Clone)]
pub struct MatchmakingSettings {
    pub window: i32,
    pub max_candidates: usize,
}

impl Default for MatchmakingSettings {
    fn default() -> Self {
        Self {
            window: 300,
            max_candidates: 20,
        }
    }
}

#[derive(Clone)]
pub struct ServerSettings {
    pub default_page_size: usize,
    pub max_page_size: usize,
    pub recent_matches: usize,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            default_page_size: 100,
            max_page_size: 1000,
            recent_matches: 20,
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub rating: RatingSettings,
    pub matchmaking: MatchmakingSettings,
    pub server: ServerSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self {
            rating: RatingSettings::default(),
            matchmaking: MatchmakingSettings::default(),
            server: ServerSettings::default(),
        }
    }
}
