pub mod common;
pub mod config;

pub mod market {
    pub mod entity;
    pub mod error;
    pub mod port;
}

pub mod screen {
    pub mod entity;
    pub mod error;
    pub mod port;
}
