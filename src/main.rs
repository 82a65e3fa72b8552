#[rocket::launch]
fn rocket() -> _ {
    agency_api::rocket()
}
