use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigPathScope {
    User,
    Workspace,
}

/// Resolve where `cekilis.toml` is looked up.
///
/// An explicit `CEKILIS_CONFIG` wins for both scopes.
#[must_use]
pub fn resolve_cekilis_config_path(scope: ConfigPathScope) -> PathBuf {
    if let Some(explicit) = non_empty_env(crate::ENV_CEKILIS_CONFIG) {
        return PathBuf::from(explicit);
    }
    match scope {
        ConfigPathScope::User => {
            if let Some(xdg_config_home) = non_empty_env("XDG_CONFIG_HOME") {
                return PathBuf::from(xdg_config_home)
                    .join("cekilis")
                    .join("cekilis.toml");
            }
            if let Some(home) = non_empty_env("HOME") {
                return PathBuf::from(home)
                    .join(".config")
                    .join("cekilis")
                    .join("cekilis.toml");
            }
            PathBuf::from(".cekilis").join("cekilis.toml")
        }
        ConfigPathScope::Workspace => PathBuf::from(".cekilis").join("cekilis.toml"),
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
