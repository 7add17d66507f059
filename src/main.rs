mod app;

use std::path::PathBuf;

use defect_annotate::config::{AppConfig, LogLevel};
use eframe::egui;

use app::DefectAnnotateApp;

const USAGE: &str = "Usage: defect-annotate [--config <file.json>] [image.png|jpg]";

struct Args {
    config: Option<PathBuf>,
    image: Option<PathBuf>,
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args {
        config: None,
        image: None,
    };
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => {
                let path = iter.next().ok_or("--config needs a path")?;
                args.config = Some(PathBuf::from(path));
            }
            "-h" | "--help" => return Err(String::new()),
            _ if args.image.is_none() => args.image = Some(PathBuf::from(arg)),
            _ => return Err(format!("unexpected argument: {}", arg)),
        }
    }
    Ok(args)
}

fn init_logging(level: LogLevel) {
    // RUST_LOG, when set, overrides the configured level.
    env_logger::Builder::new()
        .filter_level(level.to_level_filter())
        .parse_default_env()
        .init();
}

fn main() {
    let args = match parse_args() {
        Ok(args) => args,
        Err(msg) => {
            if !msg.is_empty() {
                eprintln!("{}", msg);
            }
            eprintln!("{}", USAGE);
            std::process::exit(1);
        }
    };

    let config_path = AppConfig::locate(args.config);
    let loaded = config_path.as_deref().map(AppConfig::load);
    let config = match &loaded {
        Some(Ok(config)) => config.clone(),
        _ => AppConfig::default(),
    };
    init_logging(config.log_level);
    match (&config_path, &loaded) {
        (Some(path), Some(Ok(_))) => log::info!("Loaded configuration from {:?}", path),
        (Some(path), Some(Err(e))) => log::warn!("Ignoring config file {:?}: {}", path, e),
        _ => log::debug!("Using default configuration"),
    }

    if let Some(ref image) = args.image {
        if !image.exists() {
            log::error!("File not found: {}", image.display());
            std::process::exit(1);
        }
    }

    let title = match args.image.as_ref().and_then(|p| p.file_name()).and_then(|n| n.to_str()) {
        Some(name) => format!("defect-annotate — {}", name),
        None => "defect-annotate".to_string(),
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_title(&title),
        ..Default::default()
    };

    let surface = config.surface;
    if let Err(e) = eframe::run_native(
        &title,
        options,
        Box::new(move |_cc| Ok(Box::new(DefectAnnotateApp::new(args.image, surface)))),
    ) {
        log::error!("Application error: {}", e);
        std::process::exit(1);
    }
}
