pub mod error;
pub mod utility;
pub mod websocket;

pub mod message {
    pub mod game_server;
}

pub mod model {
    pub mod game;
    pub mod messages;
}

pub use reqwest;
