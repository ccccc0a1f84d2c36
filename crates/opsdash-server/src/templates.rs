use std::path::PathBuf;

/// File-per-identifier HTML template lookup with graceful fallback.
///
/// Page identifiers come straight from the URL path, so lookups are
/// restricted to simple names inside the template directory. A missing
/// template never becomes an error: the page route always renders
/// something, falling back to `default.html` and then to a built-in body.
pub struct TemplateRegistry {
    dir: PathBuf,
}

const DEFAULT_INDEX: &str = "<!DOCTYPE html>\n<html>\n<head><title>opsdash</title></head>\n<body><h1>opsdash</h1><p>Internal reporting dashboard.</p></body>\n</html>\n";

const DEFAULT_PAGE: &str = "<!DOCTYPE html>\n<html>\n<head><title>opsdash</title></head>\n<body><h1>{{team_id}}</h1><p>No page has been configured for this team yet.</p></body>\n</html>\n";

impl TemplateRegistry {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        if !dir.is_dir() {
            tracing::warn!(dir = %dir.display(), "Template directory not found, built-in pages will be served");
        }
        Self { dir }
    }

    /// Renders the landing page (`index.html`).
    pub fn render_index(&self) -> String {
        self.read("index")
            .unwrap_or_else(|| DEFAULT_INDEX.to_string())
    }

    /// Renders the page for `team_id`, degrading to `default.html` and then
    /// to the built-in default. Substitutes a `{{team_id}}` placeholder
    /// when the template carries one.
    pub fn render_page(&self, team_id: &str) -> String {
        let body = self
            .read(team_id)
            .or_else(|| self.read("default"))
            .unwrap_or_else(|| DEFAULT_PAGE.to_string());
        body.replace("{{team_id}}", team_id)
    }

    fn read(&self, name: &str) -> Option<String> {
        if !is_safe_name(name) {
            return None;
        }
        std::fs::read_to_string(self.dir.join(format!("{name}.html"))).ok()
    }
}

/// Template identifiers must stay inside the template directory.
fn is_safe_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn registry_with(files: &[(&str, &str)]) -> (TempDir, TemplateRegistry) {
        let dir = TempDir::new().unwrap();
        for (name, body) in files {
            std::fs::write(dir.path().join(format!("{name}.html")), body).unwrap();
        }
        let registry = TemplateRegistry::new(dir.path());
        (dir, registry)
    }

    #[test]
    fn renders_named_template_with_substitution() {
        let (_dir, registry) =
            registry_with(&[("team1", "<h1>Team {{team_id}}</h1>")]);
        assert_eq!(registry.render_page("team1"), "<h1>Team team1</h1>");
    }

    #[test]
    fn falls_back_to_default_template() {
        let (_dir, registry) = registry_with(&[("default", "<p>default for {{team_id}}</p>")]);
        assert_eq!(
            registry.render_page("unknownteam"),
            "<p>default for unknownteam</p>"
        );
    }

    #[test]
    fn falls_back_to_builtin_page_when_directory_is_empty() {
        let (_dir, registry) = registry_with(&[]);
        let body = registry.render_page("team9");
        assert!(body.contains("team9"));
        assert!(body.contains("<!DOCTYPE html>"));
    }

    #[test]
    fn rejects_path_traversal_identifiers() {
        let (_dir, registry) = registry_with(&[("default", "safe")]);
        assert_eq!(registry.render_page("../etc/passwd"), "safe");
        assert!(!is_safe_name("../default"));
        assert!(!is_safe_name(""));
        assert!(is_safe_name("team_1-a"));
    }
}
