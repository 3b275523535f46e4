use dotenv::dotenv;

use auth::Role;
use db::{get_conn, models::User, new_pool};

fn main() {
    dotenv().ok();

    let pool = new_pool();
    let conn = get_conn(&pool).unwrap();

    let email = "admin@example.com";
    if User::find_by_email(&conn, email).unwrap().is_none() {
        User::create(&conn, "Admin", email, "admin123", Role::Admin).unwrap();
        println!("Created admin account {}", email);
    } else {
        println!("Admin account {} already exists", email);
    }
}
