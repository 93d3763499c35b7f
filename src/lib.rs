pub mod api_connection;
pub mod cli;
pub mod fallback_parser;
pub mod menu;
pub mod menu_extractor;
pub mod pdf_convert;
pub mod strategy;
pub mod strategy_generator;
