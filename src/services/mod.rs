// Service module exports

pub mod codec;
pub mod grid;
pub mod hebcal;
pub mod session;
pub mod settings;
pub mod split;
pub mod url_state;
