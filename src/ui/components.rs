//! Reusable UI components
//!
//! Formatting helpers and small widgets shared by the views.

use crate::constants::TRAILER_SEARCH_URL;
use crate::theme;
use crate::types::Movie;
use eframe::egui;

/// Five-star display for a 0-10 rating, rounded to the nearest half star
pub fn render_stars(rating: f64) -> String {
    let halves = (rating.clamp(0.0, 10.0)).round() as usize;
    let full = halves / 2;
    let half = halves % 2;
    let empty = 5 - full - half;
    "★".repeat(full) + &"⯪".repeat(half) + &"☆".repeat(empty)
}

/// Backend timestamps are naive ISO-8601; show the date part, or the raw
/// string if it does not parse.
pub fn format_created_at(timestamp: &str) -> String {
    chrono::NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|dt| dt.format("%b %-d, %Y").to_string())
        .unwrap_or_else(|_| timestamp.to_string())
}

/// YouTube search for the movie's trailer
pub fn trailer_url(movie: &Movie) -> String {
    let query = format!("{} {} trailer", movie.title, movie.year);
    reqwest::Url::parse_with_params(TRAILER_SEARCH_URL, &[("search_query", query.as_str())])
        .map(|url| url.to_string())
        .unwrap_or_else(|_| TRAILER_SEARCH_URL.to_string())
}

/// Clipboard text for the Share action
pub fn share_text(movie: &Movie) -> String {
    format!("{} ({})", movie.title, movie.year)
}

/// Icon + message row inside a tinted banner
pub fn banner(ui: &mut egui::Ui, icon: &str, message: &str, color: egui::Color32) {
    theme::banner_frame(color).show(ui, |ui| {
        ui.set_min_width(ui.available_width());
        ui.add(
            egui::Label::new(
                egui::RichText::new(format!("{}  {}", icon, message))
                    .size(theme::FONT_BODY)
                    .color(color),
            )
            .wrap(),
        );
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(title: &str, year: i32) -> Movie {
        Movie {
            id: None,
            title: title.into(),
            year,
            genre: "Drama".into(),
            rating: 8.0,
            description: String::new(),
        }
    }

    #[test]
    fn stars_round_to_half() {
        assert_eq!(render_stars(10.0), "★★★★★");
        assert_eq!(render_stars(8.3), "★★★★☆");
        assert_eq!(render_stars(7.5), "★★★★☆");
        assert_eq!(render_stars(6.9), "★★★⯪☆");
        assert_eq!(render_stars(-1.0), "☆☆☆☆☆");
    }

    #[test]
    fn created_at_formats_date_or_passes_through() {
        assert_eq!(format_created_at("2025-01-02T10:11:12.123456"), "Jan 2, 2025");
        assert_eq!(format_created_at("2025-11-30T00:00:00"), "Nov 30, 2025");
        assert_eq!(format_created_at("yesterday"), "yesterday");
    }

    #[test]
    fn trailer_url_encodes_title() {
        let url = trailer_url(&movie("Amélie & Co", 2001));
        assert!(url.starts_with("https://www.youtube.com/results?search_query="));
        assert!(!url.contains(' '));
        assert!(url.contains("2001"));
    }

    #[test]
    fn share_text_is_title_and_year() {
        assert_eq!(share_text(&movie("Heat", 1995)), "Heat (1995)");
    }
}
