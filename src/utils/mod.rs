pub mod logging;
pub mod output;
