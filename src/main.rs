use anyhow::{Context, anyhow};
use eframe::egui;

use measuring_stick::app::{OverlayApp, viewport};
use measuring_stick::capture::XcapScreen;
use measuring_stick::cli::{CliArgs, USAGE};
use measuring_stick::config::AppConfig;
use measuring_stick::export::DesktopSink;
use measuring_stick::session::SessionController;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("measuring_stick=info,warn"),
    )
    .init();

    let args = CliArgs::parse(std::env::args().skip(1)).map_err(|err| anyhow!("{err}\n\n{USAGE}"))?;
    if args.help {
        println!("{USAGE}");
        return Ok(());
    }

    let config = match &args.config {
        Some(path) => AppConfig::load_from(path),
        None => AppConfig::load(),
    };
    log::debug!("Loaded config: {config:?}");

    let mut controller =
        SessionController::new(Box::new(XcapScreen), DesktopSink::new(), config);
    let bounds = controller
        .start(args.mode)
        .with_context(|| format!("Failed to capture the screen for {} mode", args.mode))?
        .snapshot()
        .bounds_on_screen();

    let native_options = eframe::NativeOptions {
        viewport: viewport(&bounds),
        ..Default::default()
    };

    eframe::run_native(
        "MeasuringStick",
        native_options,
        Box::new(move |cc| {
            cc.egui_ctx.send_viewport_cmd(egui::ViewportCommand::Focus);
            Ok(Box::new(OverlayApp::new(controller)))
        }),
    )
    .map_err(|err| anyhow!("Overlay window failed: {err}"))?;

    Ok(())
}
