use maud::{html, Markup, DOCTYPE};

pub fn desktop_layout(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style {
                    "body { font-family: system-ui, sans-serif; max-width: 860px; margin: 2rem auto; padding: 0 1rem; }"
                    "table { width: 100%; border-collapse: collapse; }"
                    "th, td { text-align: left; padding: 0.4rem 0.6rem; border-bottom: 1px solid #ddd; }"
                    ".badge { padding: 0.1rem 0.5rem; border-radius: 6px; font-size: 0.9rem; }"
                    ".badge-free { background: #e3f6e8; color: #17692f; }"
                    ".badge-taken { background: #fbe4e4; color: #8a1c1c; }"
                }
            }
            body {
                header {
                    h3 { "Parking" }
                    nav {
                        a href="/" { "Availability" }
                        " · "
                        a href="/api/v1/parking-spots/available" { "API" }
                    }
                }
                (content)
            }
        }
    }
}
