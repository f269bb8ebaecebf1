use std::fs;

use anyhow::Context;
use chrono::Local;
use zoomap_tools::{
    models::area::{AreaType, FacilityType, Zone},
    session::{json_export_file_name, svg_export_file_name},
    ConfigurationForm, EditorSession,
};

fn main() -> anyhow::Result<()> {
    // RUST_LOG overrides the default level
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let svg_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "fixtures/zoo_map.svg".to_string());
    log::info!("Loading map from {}", svg_path);
    let svg_text =
        fs::read_to_string(&svg_path).with_context(|| format!("cannot read {}", svg_path))?;

    let mut session = EditorSession::new();
    let count = session.load_svg(svg_text)?;
    log::info!("Found {} configurable elements", count);
    for element in session.elements()? {
        log::debug!("{:?} {}", element.tag, element.id);
    }

    session.select("savana")?;
    let report = session.add_bulk_animals("🦒 Žirafa\n🦓 Zebra\nPakůň\n🦒 Žirafa")?;
    log::info!(
        "Bulk add: {} added, duplicates {:?}",
        report.added_count(),
        report.duplicates
    );
    session.add_preset_animal("🦏")?;
    session.save(&ConfigurationForm {
        area_type: Some(AreaType::EnclosureSafari),
        enclosure_name: "Africká savana".to_string(),
        enclosure_description: "Smíšený výběh kopytníků".to_string(),
        zone: Zone::Africa,
        feeding_times: vec!["9:00".to_string(), "14:30".to_string()],
        ..ConfigurationForm::default()
    })?;

    session.select("wc-vstup")?;
    session.save(&ConfigurationForm {
        area_type: Some(AreaType::Facility),
        facility_type: FacilityType::Wc,
        facility_name: "Toalety u vstupu".to_string(),
        ..ConfigurationForm::default()
    })?;

    let progress = session.progress();
    log::info!(
        "Configured {} of {} elements ({}%)",
        progress.configured,
        progress.total,
        progress.percent()
    );

    let now = Local::now().naive_local();
    let export = session.export_svg()?;
    if let Some(e) = export.error() {
        log::error!("Export failed, keeping the original map: {}", e);
    }
    let svg_name = svg_export_file_name(&now);
    fs::write(&svg_name, export.text()).with_context(|| format!("cannot write {}", svg_name))?;
    log::info!("Interactive map saved to {}", svg_name);

    let json_name = json_export_file_name(&now);
    fs::write(&json_name, session.export_snapshot()?)
        .with_context(|| format!("cannot write {}", json_name))?;
    log::info!("Configuration saved to {}", json_name);
    Ok(())
}
