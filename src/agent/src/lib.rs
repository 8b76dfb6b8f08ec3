pub mod frequency;
pub mod opponent;
pub mod selector;
pub mod strategy;
