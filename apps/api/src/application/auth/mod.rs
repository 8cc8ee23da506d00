pub mod dto;
pub mod gate;
pub mod token;
pub mod use_case;
