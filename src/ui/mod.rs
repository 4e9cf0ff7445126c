//! UI module - reusable rendering helpers shared by the app views

pub mod components;
