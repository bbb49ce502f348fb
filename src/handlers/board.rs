// src/handlers/board.rs
use crate::app::App;
use crate::db::spots;
use crate::responses::{html_response, ResultResp};
use crate::templates::pages::board_page;

pub fn show(app: &App) -> ResultResp {
    let spots = app.db.with_conn(|conn| spots::list_spots(conn))?;
    html_response(board_page(&spots))
}
