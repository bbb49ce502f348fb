use crate::app::App;
use crate::auth::identity::require_user;
use crate::domain::time::now_unix;
use crate::errors::ServerError;
use crate::handlers::{auth, board, rents, spots};
use crate::requests::parse_id;
use crate::responses::ResultResp;
use astra::Request;
use tracing::debug;

pub fn handle(mut req: Request, app: &App) -> ResultResp {
    let method = req.method().as_str().to_owned();
    let path = req.uri().path().to_owned();
    let segments: Vec<&str> = path.trim_matches('/').split('/').collect();
    let now = now_unix();

    debug!(%method, %path, "request");

    match (method.as_str(), segments.as_slice()) {
        ("GET", [""]) => board::show(app),

        // Identity
        ("POST", ["api", "v1", "auth", "register"]) => auth::register(&mut req, app, now),
        ("POST", ["api", "v1", "auth", "login"]) => auth::login(&mut req, app, now),
        ("POST", ["api", "v1", "auth", "logout"]) => auth::logout(&req, app, now),

        // Everything else under /api/v1 needs a session.
        (_, ["api", "v1", rest @ ..]) => {
            let user_id = require_user(&req, &app.db, now)?;
            route_authenticated(&mut req, app, method.as_str(), rest, user_id, now)
        }

        _ => Err(ServerError::NotFound(format!("no route for {method} {path}"))),
    }
}

fn route_authenticated(
    req: &mut Request,
    app: &App,
    method: &str,
    segments: &[&str],
    user_id: i64,
    now: i64,
) -> ResultResp {
    match (method, segments) {
        ("GET", ["parking-spots"]) => spots::list_all(app),
        ("POST", ["parking-spots"]) => spots::create(req, app, now),
        ("GET", ["parking-spots", "available"]) => spots::list_available(app),
        ("GET", ["parking-spots", "changes"]) => spots::changes(req, app),
        ("GET", ["parking-spots", id]) => spots::get_one(app, parse_id(id, "spot")?),
        ("PUT", ["parking-spots", id, "price"]) => {
            spots::change_price(req, app, parse_id(id, "spot")?)
        }

        ("POST", ["rents", "book", id]) => {
            rents::book(req, app, user_id, parse_id(id, "spot")?, now)
        }
        ("POST", ["rents", "cancel", id]) => rents::cancel(app, user_id, parse_id(id, "rent")?),
        ("GET", ["rents", "my-active"]) => rents::my_active(app, user_id),
        ("GET", ["rents", "my"]) => rents::my_history(app, user_id),

        _ => Err(ServerError::NotFound(format!(
            "no route for {method} /api/v1/{}",
            segments.join("/")
        ))),
    }
}
