
const ROOT_PREFIX: &str = "POLYREPAIR";

pub(crate) mod svg {
    use std::{env, path};

    const GROUP_PREFIX: &str = "SVG";

    pub(crate) fn output_path() -> Option<path::PathBuf> {
        const KEY: &str = "OUTPUT_PATH";
        let key = format!("{}_{}_{}", super::ROOT_PREFIX, GROUP_PREFIX, KEY);

        if let Ok(value) = env::var(key) {
            Some(path::PathBuf::from(value))
        } else {
            None
        }
    }

    pub(crate) fn show_constraints() -> bool {
        // Note the show/hide inversion
        const KEY: &str = "HIDE_CONSTRAINTS";
        let key = format!("{}_{}_{}", super::ROOT_PREFIX, GROUP_PREFIX, KEY);

        env::var(key).is_err()
    }
}
