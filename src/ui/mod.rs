//! UI module - reusable rendering components

pub mod components;
