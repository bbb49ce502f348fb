// src/handlers/rents.rs
use astra::Request;

use crate::app::App;
use crate::domain::rent::BookingBody;
use crate::domain::time::parse_rfc3339;
use crate::engine::booking::BookingRequest;
use crate::requests::read_optional_json;
use crate::responses::{json_response, no_content, ResultResp};

pub fn book(req: &mut Request, app: &App, user_id: i64, spot_id: i64, now: i64) -> ResultResp {
    let body: BookingBody = read_optional_json(req)?;
    let end_time = body.end_time.as_deref().map(parse_rfc3339).transpose()?;

    let rent = app.engine.book(
        BookingRequest {
            spot_id,
            user_id,
            end_time,
        },
        now,
    )?;
    json_response(201, &rent)
}

pub fn cancel(app: &App, user_id: i64, rent_id: i64) -> ResultResp {
    app.engine.cancel(rent_id, user_id)?;
    no_content()
}

/// The caller's active rent, or JSON `null`.
pub fn my_active(app: &App, user_id: i64) -> ResultResp {
    let rent = app.engine.active_rent_for(user_id)?;
    json_response(200, &rent)
}

pub fn my_history(app: &App, user_id: i64) -> ResultResp {
    let rents = app.engine.rent_history(user_id)?;
    json_response(200, &rents)
}
