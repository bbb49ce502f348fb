// templates/pages/board.rs

use crate::domain::spot::ParkingSpot;
use crate::templates::{
    components::{availability_badge, card},
    desktop_layout,
};
use maud::{html, Markup};

pub fn board_page(spots: &[ParkingSpot]) -> Markup {
    let free = spots.iter().filter(|s| s.available).count();

    desktop_layout(
        "Parking availability",
        html! {
            h1 { "Parking availability" }
            p { (free) " of " (spots.len()) " spots free" }

            (card("Spots", html! {
                @if spots.is_empty() {
                    p { "No parking spots registered yet." }
                } @else {
                    table {
                        thead {
                            tr { th { "Spot" } th { "Price / hour" } th { "Status" } }
                        }
                        tbody {
                            @for spot in spots {
                                tr {
                                    td { (spot.location) }
                                    td { (spot.price_per_hour) }
                                    td { (availability_badge(spot.available)) }
                                }
                            }
                        }
                    }
                }
            }))
        },
    )
}
