mod application;
mod project;
mod room;
mod score;
mod session;
mod user;

pub use self::application::*;
pub use self::project::*;
pub use self::room::*;
pub use self::score::*;
pub use self::session::*;
pub use self::user::*;
