//! Headless playback: drives an installation for a few seconds of simulated
//! time and logs what each frame produces.
//!
//! Usage:
//! ```text
//! cargo run --example playback                        # every preset, in order
//! cargo run --example playback -- 2                   # one preset by index
//! cargo run --example playback -- --json gallery.json # an installation file
//! ```

use lightform::installation::{Installation, InstallationConfig};
use lightform::Result;

const FRAME_MS: f64 = 1000.0 / 60.0;
const SECONDS: usize = 5;

fn main() -> Result<()> {
    // Default: WARN for everything, INFO for lightform.
    // Override with RUST_LOG env var (e.g. RUST_LOG=lightform=trace).
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("playback=info".parse().unwrap_or_default())
        .add_directive("lightform=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (mut installation, indices) = match args.as_slice() {
        [flag, path] if flag == "--json" => {
            let json = std::fs::read_to_string(path).map_err(|e| {
                lightform::error::ConfigError::Parse(format!("read '{path}': {e}"))
            })?;
            (Installation::new(vec![InstallationConfig::from_json(&json)?])?, vec![0])
        }
        [index] => {
            let index = index.parse::<usize>().map_err(|e| {
                lightform::error::ConfigError::Invalid(format!("installation index '{index}': {e}"))
            })?;
            (Installation::with_presets()?, vec![index])
        }
        _ => {
            let installation = Installation::with_presets()?;
            let all = (0..installation.installation_count()).collect();
            (installation, all)
        }
    };

    for index in indices {
        installation.switch_to(index)?;
        let name = installation.config().name.clone();
        for frame in 0..SECONDS * 60 {
            let lines = installation.frame(FRAME_MS, None);
            if frame % 60 == 0 {
                let triangles: usize = lines.iter().map(|l| l.membrane.indices.len()).sum();
                let planes: usize = lines.iter().map(|l| l.clip_planes.len()).sum();
                tracing::info!(installation = %name, frame, lines = lines.len(), triangles, planes, "frame");
            }
        }
    }
    Ok(())
}
