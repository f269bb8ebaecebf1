use std::fs;

use anyhow::{bail, Context};
use zoomap_tools::{export_interactive_svg, render_preview, ConfigurationStore};

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let mut args = std::env::args().skip(1);
    let svg_path = args.next().unwrap_or_else(|| "fixtures/zoo_map.svg".to_string());
    let config_path = args
        .next()
        .unwrap_or_else(|| "fixtures/zoo_config.json".to_string());

    let svg_text =
        fs::read_to_string(&svg_path).with_context(|| format!("cannot read {}", svg_path))?;
    let config_json = fs::read_to_string(&config_path)
        .with_context(|| format!("cannot read {}", config_path))?;

    let mut store = ConfigurationStore::new();
    let imported = store.from_snapshot(&config_json)?;
    log::info!("Imported {} configurations from {}", imported, config_path);

    let preview = render_preview(&svg_text, &store);
    fs::write("preview.svg", preview.text()).context("cannot write preview.svg")?;
    log::info!("Preview saved to preview.svg");

    let export = export_interactive_svg(&svg_text, &store);
    if let Some(e) = export.error() {
        bail!("Export of {} failed: {}", svg_path, e);
    }
    fs::write("interactive.svg", export.text()).context("cannot write interactive.svg")?;
    log::info!("Interactive map saved to interactive.svg");
    Ok(())
}
