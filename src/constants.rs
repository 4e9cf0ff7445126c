//! Application constants and configuration

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000";
pub const API_URL_ENV: &str = "MOVIE_API_URL";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// History entries requested from the backend
pub const HISTORY_LIMIT: u32 = 5;

/// Seconds a transient success message stays up (e.g. after clearing history)
pub const SUCCESS_FLASH_SECS: f32 = 3.0;

pub const EMPTY_PREFERENCE_ERROR: &str =
    "Please enter your movie preferences or select category/year";
pub const RECOMMEND_FAILED: &str = "Failed to get recommendations";
pub const CLEAR_HISTORY_FAILED: &str = "Failed to clear history";
pub const HISTORY_CLEARED: &str = "History cleared successfully!";

pub const GENRES: [&str; 18] = [
    "Action", "Adventure", "Animation", "Biography", "Comedy", "Crime",
    "Documentary", "Drama", "Fantasy", "History", "Horror", "Mystery",
    "Romance", "Sci-Fi", "Sports", "Thriller", "War", "Western",
];

pub const YEAR_RANGES: [&str; 18] = [
    "2025", "2024", "2023", "2022", "2021", "2020",
    "2019", "2018", "2017", "2016", "2015", "2014",
    "2013", "2012", "2011", "2010", "2000-2009", "1980-1999",
];

pub const TRAILER_SEARCH_URL: &str = "https://www.youtube.com/results";
