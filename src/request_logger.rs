use rocket::fairing::{Fairing, Info, Kind};
use rocket::{Data, Request, Response};
use std::time::Instant;

/// One log line per request with method, path, status, and timing. Server
/// errors log at warn so they stand out under the default filter.
pub struct RequestLogger;

// Swagger/RapiDoc asset fetches would drown out the API traffic.
const QUIET_PREFIX: &str = "/api/docs";

#[rocket::async_trait]
impl Fairing for RequestLogger {
    fn info(&self) -> Info {
        Info {
            name: "Request Logger",
            kind: Kind::Request | Kind::Response,
        }
    }

    async fn on_request(&self, request: &mut Request<'_>, _: &mut Data<'_>) {
        request.local_cache(Instant::now);
    }

    async fn on_response<'r>(&self, request: &'r Request<'_>, response: &mut Response<'r>) {
        if request.uri().path().as_str().starts_with(QUIET_PREFIX) {
            return;
        }

        let elapsed = request.local_cache(Instant::now).elapsed();
        let status = response.status();
        let line = format!(
            "{} {} -> {} ({:.2}ms)",
            request.method(),
            request.uri(),
            status.code,
            elapsed.as_secs_f64() * 1000.0
        );

        if status.code >= 500 {
            log::warn!("{line}");
        } else {
            log::info!("{line}");
        }
    }
}
