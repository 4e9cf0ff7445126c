//! The two front ends shipped from this crate
//!
//! CineAI and FlickFinder share every line of behavior; a `Brand` only picks
//! the window title, the client-storage namespace and the accent palette.

use egui::Color32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Brand {
    CineAi,
    FlickFinder,
}

impl Brand {
    pub fn display_name(self) -> &'static str {
        match self {
            Brand::CineAi => "CineAI",
            Brand::FlickFinder => "FlickFinder",
        }
    }

    /// Client-storage key holding the session id
    pub fn storage_key(self) -> &'static str {
        match self {
            Brand::CineAi => "cineai_session_id",
            Brand::FlickFinder => "flickfinder_session_id",
        }
    }

    /// Binary/log-file stem
    pub fn slug(self) -> &'static str {
        match self {
            Brand::CineAi => "cineai",
            Brand::FlickFinder => "flickfinder",
        }
    }

    /// Directory under the platform data dir
    pub fn data_dir_name(self) -> &'static str {
        self.display_name()
    }

    pub fn log_file_name(self) -> String {
        format!("{}.log", self.slug())
    }

    pub fn tagline(self) -> &'static str {
        match self {
            Brand::CineAi => "Describe your mood and let AI curate your next movie night",
            Brand::FlickFinder => "Find the perfect flick for tonight",
        }
    }

    /// (primary, secondary) accent
    pub fn accent(self) -> (Color32, Color32) {
        match self {
            Brand::CineAi => (
                Color32::from_rgb(0x60, 0xa5, 0xfa), // blue-400
                Color32::from_rgb(0x63, 0x66, 0xf1), // indigo-500
            ),
            Brand::FlickFinder => (
                Color32::from_rgb(0xf4, 0x72, 0xb6), // pink-400
                Color32::from_rgb(0xa8, 0x55, 0xf7), // purple-500
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_keys_are_namespaced_per_brand() {
        assert_eq!(Brand::CineAi.storage_key(), "cineai_session_id");
        assert_eq!(Brand::FlickFinder.storage_key(), "flickfinder_session_id");
        assert_ne!(Brand::CineAi.slug(), Brand::FlickFinder.slug());
    }

    #[test]
    fn log_file_follows_slug() {
        assert_eq!(Brand::FlickFinder.log_file_name(), "flickfinder.log");
        assert_eq!(Brand::CineAi.data_dir_name(), "CineAI");
    }
}
