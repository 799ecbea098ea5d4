//! Extrinsic modal: desktop host for the transaction submission modal

use std::path::Path;

use eframe::egui;
use eyre::WrapErr;

use extrinsic_modal_adapters::{ModalAdapterConfig, StaticTranslator};

mod app;
mod bridge;
mod modal_ui;
mod state;
mod ui;

const CONFIG_ENV: &str = "EXTRINSIC_MODAL_CONFIG";

fn main() -> eyre::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    tracing::info!("Starting extrinsic-modal");

    let config = load_config()?;
    let translator = load_translator(&config)?;
    let app = app::App::new(config, translator)?;

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Extrinsic Modal")
            .with_inner_size([820.0, 640.0])
            .with_min_inner_size([520.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "extrinsic-modal",
        native_options,
        Box::new(move |_cc| Ok(Box::new(app))),
    )
    .map_err(|e| eyre::eyre!("eframe exited with error: {e}"))
}

fn load_config() -> eyre::Result<ModalAdapterConfig> {
    let Some(path) = std::env::var_os(CONFIG_ENV) else {
        return Ok(ModalAdapterConfig::default());
    };
    let text = std::fs::read_to_string(&path)
        .wrap_err_with(|| format!("reading {}", Path::new(&path).display()))?;
    let config = ModalAdapterConfig::from_json(&text)?;
    tracing::info!(path = %Path::new(&path).display(), "loaded adapter config");
    Ok(config)
}

fn load_translator(config: &ModalAdapterConfig) -> eyre::Result<StaticTranslator> {
    let Some(path) = config.translations_path.as_ref() else {
        return Ok(StaticTranslator::default());
    };
    let text = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("reading translations {}", path.display()))?;
    let translator = StaticTranslator::from_json(&text)?;
    tracing::info!(entries = translator.len(), "loaded translations");
    Ok(translator)
}
