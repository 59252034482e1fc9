//! Fixture file loading.

use crate::{parse_fixture, ModalityFixture, SpecError, SpecResult};
use std::fs;
use std::path::Path;

/// Load a single fixture file.
pub fn load_fixture(path: &Path) -> SpecResult<ModalityFixture> {
    let content = fs::read_to_string(path).map_err(|e| SpecError::Load {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    parse_fixture(&content).map_err(|e| match e {
        SpecError::Parse { line, message } => SpecError::Load {
            path: path.display().to_string(),
            message: format!("line {line}: {message}"),
        },
        other => other,
    })
}

/// Load every `*.toml` fixture under `dir`, keyed by relative path and
/// sorted by it.
pub fn load_all_fixtures(dir: &Path) -> SpecResult<Vec<(String, ModalityFixture)>> {
    let mut fixtures = Vec::new();
    load_fixtures_recursive(dir, dir, &mut fixtures)?;
    fixtures.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(fixtures)
}

fn load_fixtures_recursive(
    base: &Path,
    dir: &Path,
    fixtures: &mut Vec<(String, ModalityFixture)>,
) -> SpecResult<()> {
    if !dir.is_dir() {
        return Ok(());
    }

    let read_error = |e: std::io::Error| SpecError::Load {
        path: dir.display().to_string(),
        message: e.to_string(),
    };

    for entry in fs::read_dir(dir).map_err(read_error)? {
        let path = entry.map_err(read_error)?.path();

        if path.is_dir() {
            load_fixtures_recursive(base, &path, fixtures)?;
        } else if path.extension().map_or(false, |e| e == "toml") {
            let relative = path.strip_prefix(base).unwrap_or(&path);
            let name = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            log::debug!("loading fixture {name}");
            fixtures.push((name, load_fixture(&path)?));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn fixtures_dir() -> std::path::PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures")
    }

    #[test]
    fn test_load_fixture() {
        let fixture = load_fixture(&fixtures_dir().join("single-sentence.toml")).unwrap();
        assert!(fixture.title.is_some());
        assert!(fixture.case("arithmetic").is_some());
    }

    #[test]
    fn test_load_all_fixtures_sorted() {
        let fixtures = load_all_fixtures(&fixtures_dir()).unwrap();
        let names = fixtures.iter().map(|(name, _)| name.as_str()).collect::<Vec<_>>();
        assert_eq!(
            names,
            vec![
                "edge-cases.toml",
                "paragraphs/mixed.toml",
                "paragraphs/uniform.toml",
                "single-sentence.toml",
            ]
        );
    }

    #[test]
    fn test_missing_dir_is_empty() {
        let fixtures = load_all_fixtures(Path::new("/nonexistent/fixtures")).unwrap();
        assert!(fixtures.is_empty());
    }

    #[test]
    fn test_load_error_names_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        let mut file = fs::File::create(&path).unwrap();
        writeln!(file, "[[case]]\nname = \"x\"").unwrap();

        let err = load_all_fixtures(dir.path()).unwrap_err();
        assert!(err.to_string().contains("broken.toml"), "{err}");
    }

    #[test]
    fn test_non_toml_files_ignored() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("notes.txt"), "not a fixture").unwrap();
        fs::write(
            dir.path().join("ok.toml"),
            "[[case]]\nname = \"x\"\ntext = \"Hello.\"\n",
        )
        .unwrap();

        let fixtures = load_all_fixtures(dir.path()).unwrap();
        assert_eq!(fixtures.len(), 1);
        assert_eq!(fixtures[0].0, "ok.toml");
    }
}
