//! Page templates, embedded at compile time and rendered with minijinja.
//!
//! `.html` templates are auto-escaped; graph and igv.js payloads go through
//! `tojson`.

use std::sync::OnceLock;

use minijinja::Environment;
use serde::Serialize;

const TEMPLATES: &[(&str, &str)] = &[
    ("base.html", include_str!("../templates/base.html")),
    ("nav.html", include_str!("../templates/nav.html")),
    ("network.html", include_str!("../templates/network.html")),
    ("node_details.html", include_str!("../templates/node_details.html")),
    ("igv_browser.html", include_str!("../templates/igv_browser.html")),
    ("error.html", include_str!("../templates/error.html")),
];

fn environment() -> &'static Environment<'static> {
    static ENV: OnceLock<Environment<'static>> = OnceLock::new();
    ENV.get_or_init(|| {
        let mut env = Environment::new();
        env.set_loader(|name| {
            Ok(TEMPLATES
                .iter()
                .find(|(n, _)| *n == name)
                .map(|(_, source)| source.to_string()))
        });
        env
    })
}

pub fn render<S: Serialize>(name: &str, ctx: S) -> Result<String, minijinja::Error> {
    environment().get_template(name)?.render(ctx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use minijinja::context;

    #[test]
    fn test_every_template_parses() {
        for (name, _) in TEMPLATES {
            assert!(environment().get_template(name).is_ok(), "{name}");
        }
    }

    #[test]
    fn test_error_page_escapes_message() {
        let html = render(
            "error.html",
            context! { title => "Error", status => 404, message => "<script>", back_url => "/" },
        )
        .unwrap();
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_unknown_template() {
        assert!(render("missing.html", context! {}).is_err());
    }
}
