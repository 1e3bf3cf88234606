#[cfg(test)]
pub mod fixtures {
    use crate::config::TargetConfig;
    use crate::store::MemoryStore;
    use std::path::PathBuf;

    /// Root of every in-memory fixture project.
    pub const PROJECT_ROOT: &str = "/project";

    /// Builds an in-memory project under [`PROJECT_ROOT`] holding `files`
    /// (paths relative to the root), each with a one-line body.
    pub fn ts_project(files: &[&str]) -> MemoryStore {
        let store = MemoryStore::new().with_dir(PROJECT_ROOT);
        for file in files {
            store.add_file(
                PathBuf::from(PROJECT_ROOT).join(file),
                &format!("export const name = \"{file}\";"),
            );
        }
        store
    }

    /// Builds a target from string slices.
    pub fn target(src: &[&str], exclude: &[&str], dest: Option<&str>) -> TargetConfig {
        TargetConfig::new(
            src.iter().map(ToString::to_string).collect(),
            exclude.iter().map(ToString::to_string).collect(),
            dest.map(PathBuf::from),
        )
    }
}
