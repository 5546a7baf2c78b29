use std::path::{Path, PathBuf};

use tracing::debug;

/// Expand `~`, `$VAR` and `${VAR}` in a user-supplied path.
///
/// Paths that are not valid UTF-8 or reference unset variables are returned unchanged.
pub fn expand_path(path: &Path) -> PathBuf {
    let Some(raw) = path.to_str() else {
        return path.to_path_buf();
    };
    match shellexpand::full(raw) {
        Ok(expanded) => PathBuf::from(expanded.as_ref()),
        Err(e) => {
            debug!("cannot expand {}: {}", raw, e);
            path.to_path_buf()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_plain_path_when_expanding_then_unchanged() {
        assert_eq!(expand_path(Path::new("model.xml")), PathBuf::from("model.xml"));
    }

    #[test]
    fn given_unset_variable_when_expanding_then_returns_input() {
        let path = Path::new("$CCREPORT_SURELY_UNSET_VARIABLE/model.xml");
        assert_eq!(expand_path(path), path.to_path_buf());
    }
}
