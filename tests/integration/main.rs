//! Integration tests for wallsync

mod cli_test;
mod display_test;
mod helpers;
mod playlist_test;
