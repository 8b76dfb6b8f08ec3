pub mod entrypoint;
pub mod error;
pub mod session;
pub mod terminal;

pub mod model {
    pub mod internal;
}

pub mod service {
    pub mod game_manager;
    pub mod game_socket;
    pub mod game_thread;
}
