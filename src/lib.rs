//! Spreadsheet-backed hanzi flashcards.
//!
//! The sheet holds one word per row (`term, hint, translation, tone, too easy, to learn`).
//! [`deck`] partitions it into study queues and drives the front/back card flow, and
//! [`store`] reads the sheet and writes the two flag columns back.

pub mod core;
pub mod deck;
pub mod gui;
pub mod persistence;
pub mod store;
