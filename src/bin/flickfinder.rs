#![windows_subsystem = "windows"]
//! FlickFinder - Main entry point

use mimalloc::MiMalloc;
use movie_recommender::Brand;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

fn main() -> eframe::Result<()> {
    movie_recommender::run(Brand::FlickFinder)
}
