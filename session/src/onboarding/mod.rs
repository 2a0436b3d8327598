//! Stepwise collection of address → chain → name for a new token.

pub mod manager;
pub mod model;

pub use manager::OnboardingManager;
pub use model::{OnboardingState, Prompt, Step, TokenDraft};
