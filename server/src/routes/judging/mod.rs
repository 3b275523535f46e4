mod assigned_teams;
mod submit_score;
mod team_detail;

pub use self::assigned_teams::*;
pub use self::submit_score::*;
pub use self::team_detail::*;
