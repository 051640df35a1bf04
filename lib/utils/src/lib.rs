pub mod colors;
pub mod constants;
pub mod errors;
pub mod icons;
pub mod node_utils;
pub mod routes;
pub mod unpack;
pub mod widget;
