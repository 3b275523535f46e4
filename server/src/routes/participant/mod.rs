mod dashboard;
mod save_project;
mod save_team;

pub use self::dashboard::*;
pub use self::save_project::*;
pub use self::save_team::*;
