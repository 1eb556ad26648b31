pub mod billing;
pub mod daily;
pub mod reading;
pub mod season;

pub use billing::*;
pub use daily::*;
pub use reading::*;
pub use season::*;
