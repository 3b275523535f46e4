mod application_score;
mod assign_project;
mod assign_user;
mod create_room;
mod list_applications;
mod list_rooms;
mod set_application_status;
mod unassign_project;

pub use self::application_score::*;
pub use self::assign_project::*;
pub use self::assign_user::*;
pub use self::create_room::*;
pub use self::list_applications::*;
pub use self::list_rooms::*;
pub use self::set_application_status::*;
pub use self::unassign_project::*;
