pub mod collision;
pub mod config;
pub mod effect;
pub mod error;
pub mod food;
pub mod game;
pub mod input;
pub mod logger;
pub mod renderer;
pub mod screen;
pub mod snake;
pub mod terminal_runtime;
pub mod timers;
pub mod turns;
pub mod ui;
pub mod view;
