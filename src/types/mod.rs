pub mod outcome;
pub mod history;
pub mod platform;
pub mod session;

pub use outcome::*;
pub use history::*;
pub use platform::*;
pub use session::*;
