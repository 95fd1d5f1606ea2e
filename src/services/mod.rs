pub mod round_service;

pub use round_service::RoundService;
