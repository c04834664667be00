// HTML templates compiled into the binary
use minijinja::{Environment, Value};

const TEMPLATES: &[(&str, &str)] = &[
    ("layout.html", include_str!("../../templates/layout.html")),
    ("home.html", include_str!("../../templates/home.html")),
    ("about.html", include_str!("../../templates/about.html")),
    ("services.html", include_str!("../../templates/services.html")),
    ("contact.html", include_str!("../../templates/contact.html")),
    ("dashboards.html", include_str!("../../templates/dashboards.html")),
    ("dashboard_detail.html", include_str!("../../templates/dashboard_detail.html")),
    ("embed_panel.html", include_str!("../../templates/embed_panel.html")),
];

/// `.html` templates are auto-escaped; URLs go through `url_attr` so
/// slashes survive unescaped inside attributes
pub fn build_environment() -> Result<Environment<'static>, minijinja::Error> {
    let mut env = Environment::new();
    env.add_filter("url_attr", url_attr);
    for &(name, source) in TEMPLATES {
        env.add_template(name, source)?;
    }
    Ok(env)
}

fn url_attr(value: String) -> Value {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    Value::from_safe_string(escaped)
}
