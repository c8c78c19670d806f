/// Session management module - Gateway

mod controller;
mod history;
mod seeding;
mod state;

pub use controller::{SessionController, Turn};
pub use history::{History, CLEAR_CONFIRMATION};
pub use seeding::{ensure_seeded, seed_session, SeedOutcome};
pub use state::Session;
