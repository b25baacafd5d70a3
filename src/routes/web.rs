use std::path::PathBuf;
use rocket::{get, routes, uri, Build, Rocket};
use rocket::response::content::RawHtml;
use rocket::response::Redirect;
use crate::app_constants::WEB_PREFIX;
use crate::routes::api::session_guard::OrganizerAccess;

// The pages are shells: the browser bundle takes over client side. The
// gate lives here, not in the bundle.

#[get("/")]
fn index() -> RawHtml<&'static str> {
    RawHtml(
        "<!DOCTYPE html><html><head><title>tiko</title></head>\
            <body><div id=\"app\" data-page=\"storefront\"></div></body></html>",
    )
}

#[get("/login?<next>")]
fn login_page(next: Option<String>) -> RawHtml<String> {
    let next = next.unwrap_or_else(|| "/".to_owned());
    RawHtml(
        format!(
            "<!DOCTYPE html><html><head><title>tiko - sign in</title></head>\
                <body><div id=\"app\" data-page=\"login\" data-next=\"{}\"></div></body></html>",
            next.replace('"', "&quot;"),
        )
    )
}

#[get("/dashboard/<path..>")]
fn dashboard(_access: OrganizerAccess, path: PathBuf) -> RawHtml<String> {
    RawHtml(
        format!(
            "<!DOCTYPE html><html><head><title>tiko - dashboard</title></head>\
                <body><div id=\"app\" data-page=\"dashboard\" data-section=\"{}\"></div></body></html>",
            path.display(),
        )
    )
}

// anything the guard refused goes to login, destination preserved
#[get("/dashboard/<path..>", rank = 2)]
fn dashboard_login_redirect(path: PathBuf) -> Redirect {
    let destination = format!("/dashboard/{}", path.display());
    Redirect::to(uri!(login_page(next = Some(destination))))
}

pub trait WebRocketBuildExt {
    fn install_tikogate_web(self) -> Self;
}

impl WebRocketBuildExt for Rocket<Build> {
    fn install_tikogate_web(self) -> Self {
        self.mount(
            WEB_PREFIX,
            routes![
                index,
                login_page,
                dashboard,
                dashboard_login_redirect,
            ]
        )
    }
}
