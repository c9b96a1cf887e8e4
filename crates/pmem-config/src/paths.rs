use std::path::PathBuf;

/// XDG app name for user-level config.
pub const APP_NAME: &str = "project-memory";

/// Directory (relative to the project root) holding memory files and the
/// project-level config.
pub const PROJECT_DIR_NAME: &str = ".pmem";

pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Resolve the user config directory, e.g. `~/.config/project-memory`.
///
/// Returns None when no home directory can be determined (e.g. containers
/// without HOME).
pub fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", APP_NAME).map(|dirs| dirs.config_dir().to_path_buf())
}

pub fn user_config_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join(CONFIG_FILE_NAME))
}

pub fn project_config_path(project_root: &std::path::Path) -> PathBuf {
    project_root.join(PROJECT_DIR_NAME).join(CONFIG_FILE_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn project_config_path_lives_in_memory_dir() {
        let path = project_config_path(Path::new("/work/app"));
        assert_eq!(path, PathBuf::from("/work/app/.pmem/config.toml"));
    }

    #[test]
    fn user_config_path_ends_with_app_name() {
        if let Some(path) = user_config_path() {
            assert!(path.ends_with(Path::new(APP_NAME).join(CONFIG_FILE_NAME)));
        }
    }
}
