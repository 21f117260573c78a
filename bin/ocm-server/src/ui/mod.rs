//! Server-rendered HTML views: the public gallery and the admin panel.
//!
//! Templates are compiled into the binary and parsed once at startup.

use minijinja::Environment;
use serde::Serialize;

const TEMPLATES: &[(&str, &str)] = &[
    ("base.html", include_str!("templates/base.html")),
    ("gallery.html", include_str!("templates/gallery.html")),
    ("login.html", include_str!("templates/login.html")),
    ("admin.html", include_str!("templates/admin.html")),
];

pub struct Views {
    env: Environment<'static>,
}

impl Views {
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        for (name, source) in TEMPLATES {
            env.add_template(name, source)?;
        }
        Ok(Self { env })
    }

    pub fn render<S: Serialize>(&self, name: &str, ctx: S) -> Result<String, minijinja::Error> {
        self.env.get_template(name)?.render(ctx)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use minijinja::context;
    use ocm_types::seed_materials;

    #[test]
    fn gallery_lists_every_material_and_escapes_text() {
        let views = Views::new().unwrap();
        let mut materials = seed_materials(0);
        materials[0].title = "<b>bold</b>".into();

        let html = views
            .render(
                "gallery.html",
                context! {
                    materials => materials,
                    categories => vec!["All", "Texture"],
                    selected => "All",
                    q => "",
                    total => 3,
                },
            )
            .unwrap();

        assert!(html.contains("&lt;b&gt;bold&lt;/b&gt;"));
        assert!(html.contains("Watercolor brush pack"));
        assert!(html.contains("/ui/materials/2/download"));
    }

    #[test]
    fn login_shows_error_text() {
        let views = Views::new().unwrap();
        let html = views
            .render("login.html", context! { error => "invalid username or password" })
            .unwrap();
        assert!(html.contains("invalid username or password"));
    }

    #[test]
    fn admin_delete_asks_for_confirmation() {
        let views = Views::new().unwrap();
        let html = views
            .render(
                "admin.html",
                context! {
                    materials => seed_materials(0),
                    all_categories => vec!["Texture", "Reference", "Brush", "Background"],
                    form => ocm_types::NewMaterial::default(),
                    notice => None::<&str>,
                },
            )
            .unwrap();
        assert_eq!(html.matches("onsubmit=\"return confirm(").count(), 3);
        assert!(html.contains("Delete this material?"));
    }
}
