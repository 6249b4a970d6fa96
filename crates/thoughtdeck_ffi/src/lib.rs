//! FFI crate exposing the ThoughtDeck core store to the UI runtime.

pub mod api;
