use maud::{html, Markup};

pub fn card(title: &str, body: Markup) -> Markup {
    html! {
        div class="card" {
            h2 { (title) }
            div class="card-body" {
                (body)
            }
        }
    }
}

pub fn availability_badge(available: bool) -> Markup {
    html! {
        @if available {
            span class="badge badge-free" { "Free" }
        } @else {
            span class="badge badge-taken" { "Taken" }
        }
    }
}
