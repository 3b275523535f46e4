mod login;
mod logout;
mod register;

pub use self::login::*;
pub use self::logout::*;
pub use self::register::*;
