use std::path::{Path, PathBuf};

use ringmenu::{options::Options, Viewer};

/// Directory searched for named option presets.
const PRESET_DIR: &str = "presets";

/// Resolve the command-line argument to an options file: an existing path,
/// or the name of a preset in [`PRESET_DIR`].
fn resolve_options_path(input: &str) -> Result<PathBuf, String> {
    let path = Path::new(input);
    if path.exists() {
        return Ok(path.to_path_buf());
    }
    let presets = Path::new(PRESET_DIR);
    if Options::list_presets(presets).iter().any(|name| name == input) {
        return Ok(presets.join(format!("{input}.toml")));
    }
    Err(format!(
        "no options file or preset named {input:?} (presets: {:?})",
        Options::list_presets(presets)
    ))
}

fn main() {
    env_logger::init();

    let options = match std::env::args().nth(1) {
        None => Options::default(),
        Some(arg) => {
            let loaded = resolve_options_path(&arg).and_then(|path| {
                log::info!("loading options from {}", path.display());
                Options::load(&path).map_err(|e| e.to_string())
            });
            match loaded {
                Ok(options) => options,
                Err(e) => {
                    log::error!("{e}");
                    log::error!("Usage: ringmenu [OPTIONS_TOML | PRESET]");
                    std::process::exit(1);
                }
            }
        }
    };

    let title = options.menu.title.clone();
    if let Err(e) = Viewer::builder()
        .with_options(options)
        .with_title(title)
        .build()
        .run()
    {
        log::error!("{e}");
        std::process::exit(1);
    }
}
